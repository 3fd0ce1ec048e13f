//! Voter origin extraction.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Origin hints for a request, highest priority first: the first
/// `X-Forwarded-For` entry, `X-Real-IP`, then the peer address.
///
/// Blank values are kept; identity hashing skips them.
pub fn origin_candidates(headers: &HeaderMap, peer: Option<SocketAddr>) -> Vec<String> {
    let mut candidates = Vec::with_capacity(3);

    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        // X-Forwarded-For can have multiple IPs: client, proxy1, proxy2
        if let Some(client) = forwarded.split(',').next() {
            candidates.push(client.trim().to_string());
        }
    }
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        candidates.push(real_ip.trim().to_string());
    }
    if let Some(addr) = peer {
        candidates.push(addr.ip().to_string());
    }

    candidates
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

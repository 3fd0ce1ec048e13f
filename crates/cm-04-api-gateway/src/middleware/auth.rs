//! Admin gate.
//!
//! Moderator routes need a caller the gate accepts. How a moderator proves
//! who they are is the gate's business; the routes only ask yes or no.

use crate::domain::error::ApiError;
use crate::router::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Decides whether a request comes from a moderator.
pub trait AdminGate: Send + Sync {
    fn is_admin(&self, headers: &HeaderMap) -> bool;
}

/// Accepts a shared secret as `Authorization: Bearer <key>` or `X-API-Key`.
pub struct ApiKeyGate {
    key: String,
}

impl ApiKeyGate {
    /// Returns `None` for a blank key so that an empty secret can never
    /// unlock the admin routes.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return None;
        }
        Some(Self { key })
    }
}

impl AdminGate for ApiKeyGate {
    fn is_admin(&self, headers: &HeaderMap) -> bool {
        // Check Authorization header (Bearer token)
        if let Some(auth) = headers.get("authorization") {
            if let Ok(auth_str) = auth.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    return constant_time_compare(token, &self.key);
                }
            }
        }

        // Check X-API-Key header
        if let Some(api_key) = headers.get("x-api-key") {
            if let Ok(key_str) = api_key.to_str() {
                return constant_time_compare(key_str, &self.key);
            }
        }

        false
    }
}

/// Rejects everyone. Used when no admin credential is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAllGate;

impl AdminGate for DenyAllGate {
    fn is_admin(&self, _headers: &HeaderMap) -> bool {
        false
    }
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Both inputs are padded to the longer length with different fill bytes, so
/// neither the position of the first mismatch nor a length difference changes
/// the running time.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

/// Route layer for the admin router.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.gate.is_admin(request.headers()) {
        warn!(path = %request.uri().path(), "admin access denied");
        return ApiError::unauthorized().into_response();
    }
    next.run(request).await
}

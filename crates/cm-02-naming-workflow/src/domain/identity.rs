//! # Voter Identity
//!
//! Collapses a requester's network origin into a pseudonymous identifier.
//! The raw origin is never stored.

use sha2::{Digest, Sha256};
use shared_types::VoterIdentity;

/// Origin hashed when no candidate is usable.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Hash the first usable origin candidate.
///
/// Candidates are tried in priority order; the first one that is non-empty
/// after trimming wins. With no usable candidate the sentinel
/// [`UNKNOWN_ORIGIN`] is hashed, so every origin-less caller shares one
/// identity.
pub fn derive_voter_identity<S: AsRef<str>>(candidates: &[S]) -> VoterIdentity {
    let origin = candidates
        .iter()
        .map(|c| c.as_ref().trim())
        .find(|c| !c.is_empty())
        .unwrap_or(UNKNOWN_ORIGIN);

    VoterIdentity(hex::encode(Sha256::digest(origin.as_bytes())))
}

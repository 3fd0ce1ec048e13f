//! # Core Records
//!
//! The three persisted records and the naming lifecycle.
//!
//! ## Ownership
//!
//! - **Cat** is the aggregate root.
//! - **NameSuggestion** and **Vote** belong to exactly one cat and are
//!   cascade-deleted with it (or when the cat's naming workflow is reset).

use crate::ids::{CatId, SuggestionId, VoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamps are always UTC.
pub type Timestamp = DateTime<Utc>;

/// Default latitude for sightings submitted without coordinates (Malta).
pub const DEFAULT_LATITUDE: f64 = 35.9;

/// Default longitude for sightings submitted without coordinates (Malta).
pub const DEFAULT_LONGITUDE: f64 = 14.5;

// =============================================================================
// NAMING LIFECYCLE
// =============================================================================

/// Where a cat is in the naming workflow.
///
/// ```text
/// none ──start_suggesting──→ suggesting ──start_voting──→ voting ──complete──→ complete
///   ↑                                                                              │
///   └──────────────────────────────── reset (from any state) ─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingStatus {
    #[default]
    None,
    Suggesting,
    Voting,
    Complete,
}

impl VotingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Suggesting => "suggesting",
            Self::Voting => "voting",
            Self::Complete => "complete",
        }
    }

    /// Whether the public can currently interact with the cat's naming round.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Suggesting | Self::Voting)
    }
}

impl fmt::Display for VotingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VotingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "suggesting" => Ok(Self::Suggesting),
            "voting" => Ok(Self::Voting),
            "complete" => Ok(Self::Complete),
            other => Err(format!("unknown voting status: {}", other)),
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A documented street cat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: CatId,
    /// `None` until the cat is named by moderation or by a completed vote.
    pub name: Option<String>,
    pub photos: Vec<String>,
    pub primary_photo: String,
    pub location_lat: f64,
    pub location_lng: f64,
    pub location_name: String,
    pub breed: Option<String>,
    pub color: String,
    pub age: Option<String>,
    pub is_stray: bool,
    pub background_story: Option<String>,
    pub voting_status: VotingStatus,
    /// Moderation gate, independent of the naming workflow.
    pub approved: bool,
    pub created_at: Timestamp,
}

impl Cat {
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// A candidate name proposed by the public for an unnamed cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSuggestion {
    pub id: SuggestionId,
    pub cat_id: CatId,
    /// Already trimmed and validated.
    pub suggested_name: String,
    pub vote_count: u64,
    pub created_at: Timestamp,
}

impl NameSuggestion {
    pub fn new(cat_id: CatId, suggested_name: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id: SuggestionId::new(),
            cat_id,
            suggested_name: suggested_name.into(),
            vote_count: 0,
            created_at,
        }
    }
}

/// Pseudonymous voter, a lowercase hex SHA-256 digest of the request origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterIdentity(pub String);

impl VoterIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One endorsement of one suggestion. At most one per (cat, voter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub suggestion_id: SuggestionId,
    /// Copied from the suggestion so the uniqueness key is local to the row.
    pub cat_id: CatId,
    pub voter_identity: VoterIdentity,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn new(
        suggestion: &NameSuggestion,
        voter_identity: VoterIdentity,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: VoteId::new(),
            suggestion_id: suggestion.id,
            cat_id: suggestion.cat_id,
            voter_identity,
            created_at,
        }
    }
}

/// A cat in an open naming round together with its ranked suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatWithSuggestions {
    #[serde(flatten)]
    pub cat: Cat,
    pub suggestions: Vec<NameSuggestion>,
}

/// Ranking used everywhere suggestions are listed: most votes first, then the
/// oldest suggestion, then the smallest id.
pub fn rank_suggestions(suggestions: &mut [NameSuggestion]) {
    suggestions.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

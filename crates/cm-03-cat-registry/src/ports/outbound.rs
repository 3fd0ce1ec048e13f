//! Driven Ports (SPI - Outbound Dependencies)

use shared_types::CatId;
use thiserror::Error;

/// What moderators are told about a new sighting.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionNotice {
    pub cat_id: CatId,
    pub location_name: String,
    pub color: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub is_stray: bool,
    pub background_story: Option<String>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier not configured: {0}")]
    NotConfigured(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Tells moderators a sighting is waiting for review.
///
/// Called after the cat is committed. Implementations should not block for
/// long; the caller ignores errors beyond logging them.
pub trait SubmissionNotifier: Send + Sync {
    fn notify_submission(&self, notice: &SubmissionNotice) -> Result<(), NotifyError>;
}

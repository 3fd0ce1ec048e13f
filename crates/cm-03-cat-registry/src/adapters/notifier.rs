//! Notifier adapters. Mail delivery is out of scope; `LogNotifier` records
//! what would have been sent.

use crate::ports::outbound::{NotifyError, SubmissionNotice, SubmissionNotifier};
use tracing::info;

/// Logs each submission as a structured event addressed to the moderator.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    admin_email: Option<String>,
    site_url: String,
}

impl LogNotifier {
    pub fn new(admin_email: Option<String>, site_url: impl Into<String>) -> Self {
        Self {
            admin_email,
            site_url: site_url.into(),
        }
    }

    /// Where the moderator reviews submissions.
    pub fn review_url(&self) -> String {
        format!("{}/admin", self.site_url.trim_end_matches('/'))
    }
}

impl SubmissionNotifier for LogNotifier {
    fn notify_submission(&self, notice: &SubmissionNotice) -> Result<(), NotifyError> {
        let to = self
            .admin_email
            .as_deref()
            .ok_or_else(|| NotifyError::NotConfigured("no admin email".into()))?;

        info!(
            target: "cm::notify",
            to,
            cat_id = %notice.cat_id,
            subject = %format!("New Cat Submission - {}", notice.location_name),
            color = %notice.color,
            breed = notice.breed.as_deref().unwrap_or("-"),
            age = notice.age.as_deref().unwrap_or("-"),
            stray = notice.is_stray,
            review_url = %self.review_url(),
            "submission notification"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl SubmissionNotifier for NoopNotifier {
    fn notify_submission(&self, _notice: &SubmissionNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

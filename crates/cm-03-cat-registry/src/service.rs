//! Cat Registry Service
//!
//! Moderation and public listings over the shared record store. Workflow
//! status is read here but only ever written by the naming service.

use crate::domain::cat_update::CatUpdate;
use crate::domain::new_cat::NewCat;
use crate::domain::sighting::SightingSubmission;
use crate::ports::inbound::CatRegistryApi;
use crate::ports::outbound::{SubmissionNotice, SubmissionNotifier};
use cm_01_record_store::RecordStore;
use cm_02_naming_workflow::{Clock, SystemClock};
use shared_types::{Cat, CatId, CatWithSuggestions, NamingError};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CatRegistryService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn SubmissionNotifier>,
    clock: Arc<dyn Clock>,
}

impl CatRegistryService {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn SubmissionNotifier>) -> Self {
        Self::with_clock(store, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn SubmissionNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    fn insert(&self, cat: Cat) -> Result<Cat, NamingError> {
        let mut tx = self.store.begin()?;
        tx.insert_cat(cat.clone())?;
        tx.commit()?;
        Ok(cat)
    }
}

impl CatRegistryApi for CatRegistryService {
    fn create_cat(&self, new_cat: NewCat) -> Result<Cat, NamingError> {
        let cat = new_cat
            .into_cat(self.clock.now())
            .inspect_err(|e| debug!(error = %e, "create cat rejected"))?;
        let cat = self.insert(cat)?;
        info!(cat_id = %cat.id, approved = cat.approved, "cat created");
        Ok(cat)
    }

    fn get_cat(&self, id: CatId) -> Result<Cat, NamingError> {
        let tx = self.store.begin()?;
        tx.get_cat(id)?
            .ok_or_else(|| NamingError::not_found("Cat", id))
    }

    fn list_cats(&self) -> Result<Vec<Cat>, NamingError> {
        let tx = self.store.begin()?;
        Ok(tx.list_cats()?)
    }

    fn update_cat(&self, id: CatId, update: CatUpdate) -> Result<Cat, NamingError> {
        let mut tx = self.store.begin()?;
        let mut cat = tx
            .get_cat(id)?
            .ok_or_else(|| NamingError::not_found("Cat", id))?;
        update
            .apply(&mut cat)
            .inspect_err(|e| debug!(cat_id = %id, error = %e, "cat update rejected"))?;
        tx.update_cat(cat.clone())?;
        tx.commit()?;

        info!(cat_id = %id, approved = cat.approved, "cat updated");
        Ok(cat)
    }

    fn delete_cat(&self, id: CatId) -> Result<(), NamingError> {
        let mut tx = self.store.begin()?;
        let suggestions = tx.count_suggestions(id)?;
        let votes = tx.count_votes(id)?;
        if !tx.delete_cat(id)? {
            return Err(NamingError::not_found("Cat", id));
        }
        tx.commit()?;

        info!(cat_id = %id, suggestions, votes, "cat deleted");
        Ok(())
    }

    fn list_voting_cats(&self) -> Result<Vec<CatWithSuggestions>, NamingError> {
        // One transaction so every cat is paired with a consistent tally.
        let tx = self.store.begin()?;
        let mut out = Vec::new();
        for cat in tx.list_cats()? {
            if !(cat.approved && cat.voting_status.is_open()) {
                continue;
            }
            let suggestions = tx.list_suggestions(cat.id)?;
            out.push(CatWithSuggestions { cat, suggestions });
        }
        Ok(out)
    }

    fn list_gallery(&self) -> Result<Vec<Cat>, NamingError> {
        let tx = self.store.begin()?;
        let mut cats = tx.list_cats()?;
        cats.retain(|c| c.approved);
        Ok(cats)
    }

    fn submit_sighting(&self, submission: SightingSubmission) -> Result<Cat, NamingError> {
        let cat = submission
            .into_cat(self.clock.now())
            .inspect_err(|e| debug!(error = %e, "sighting rejected"))?;
        let cat = self.insert(cat)?;
        info!(cat_id = %cat.id, location = %cat.location_name, "sighting submitted");

        let notice = SubmissionNotice {
            cat_id: cat.id,
            location_name: cat.location_name.clone(),
            color: cat.color.clone(),
            breed: cat.breed.clone(),
            age: cat.age.clone(),
            is_stray: cat.is_stray,
            background_story: cat.background_story.clone(),
        };
        if let Err(e) = self.notifier.notify_submission(&notice) {
            warn!(cat_id = %cat.id, error = %e, "submission notification failed");
        }
        Ok(cat)
    }
}

// src/db/memory.rs

use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::db::repository::{next_id, MatchRepository, SavedSearchRepository, ShortlistRepository};
use crate::domain::account::{
    require_name, Match, MatchUpdate, NewMatch, NewSavedSearch, NewShortlist, SavedSearch,
    SavedSearchUpdate, Shortlist, ShortlistUpdate,
};
use crate::domain::listing::ListingRef;
use crate::errors::ServerError;

/// Account collections held in process memory. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: RwLock<Vec<Match>>,
    shortlists: RwLock<Vec<Shortlist>>,
    searches: RwLock<Vec<SavedSearch>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds from `matches.json`, `shortlists.json` and `savedSearches.json`
    /// in `dir`. Missing files just mean an empty collection.
    pub fn seeded(dir: &Path) -> Result<Self, ServerError> {
        let store = Self {
            matches: RwLock::new(read_optional(&dir.join("matches.json"))?),
            shortlists: RwLock::new(read_optional(&dir.join("shortlists.json"))?),
            searches: RwLock::new(read_optional(&dir.join("savedSearches.json"))?),
        };
        tracing::info!(
            matches = store.matches.read().len(),
            shortlists = store.shortlists.read().len(),
            saved_searches = store.searches.read().len(),
            "seeded in-memory account store"
        );
        Ok(store)
    }
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServerError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no seed file");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ServerError::LoadFailure(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| ServerError::LoadFailure(format!("{}: {e}", path.display())))
}

impl MatchRepository for MemoryStore {
    fn list_matches(&self) -> Result<Vec<Match>, ServerError> {
        Ok(self.matches.read().clone())
    }

    fn get_match(&self, id: i64) -> Result<Match, ServerError> {
        self.matches
            .read()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Match"))
    }

    fn create_match(&self, new: NewMatch, score: u8) -> Result<Match, ServerError> {
        let mut matches = self.matches.write();
        let now = Utc::now();
        let created = Match {
            id: next_id(matches.iter().map(|m| m.id)),
            land_listing_id: new.land_listing_id,
            concept_plan_id: new.concept_plan_id,
            compatibility_score: score,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        matches.insert(0, created.clone());
        Ok(created)
    }

    fn update_match(&self, id: i64, update: MatchUpdate) -> Result<Match, ServerError> {
        let mut matches = self.matches.write();
        let m = matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ServerError::not_found("Match"))?;
        if let Some(notes) = update.notes {
            m.notes = notes;
        }
        m.updated_at = Utc::now();
        Ok(m.clone())
    }

    fn delete_match(&self, id: i64) -> Result<(), ServerError> {
        let mut matches = self.matches.write();
        let idx = matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ServerError::not_found("Match"))?;
        matches.remove(idx);
        Ok(())
    }
}

impl ShortlistRepository for MemoryStore {
    fn list_shortlists(&self) -> Result<Vec<Shortlist>, ServerError> {
        Ok(self.shortlists.read().clone())
    }

    fn get_shortlist(&self, id: i64) -> Result<Shortlist, ServerError> {
        self.shortlists
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Shortlist"))
    }

    fn create_shortlist(&self, new: NewShortlist) -> Result<Shortlist, ServerError> {
        let name = require_name(&new.name)?;
        let mut lists = self.shortlists.write();
        let now = Utc::now();
        let mut created = Shortlist {
            id: next_id(lists.iter().map(|s| s.id)),
            name,
            description: new.description,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        for item in new.items {
            created.add_item(item, now);
        }
        lists.insert(0, created.clone());
        Ok(created)
    }

    fn update_shortlist(&self, id: i64, update: ShortlistUpdate) -> Result<Shortlist, ServerError> {
        let name = update.name.as_deref().map(require_name).transpose()?;
        self.edit_shortlist(id, |s| {
            if let Some(name) = name {
                s.name = name;
            }
            if update.description.is_some() {
                s.description = update.description;
            }
            s.updated_at = Utc::now();
        })
    }

    fn delete_shortlist(&self, id: i64) -> Result<(), ServerError> {
        let mut lists = self.shortlists.write();
        let idx = lists
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServerError::not_found("Shortlist"))?;
        lists.remove(idx);
        Ok(())
    }

    fn add_item_to_shortlist(&self, id: i64, item: ListingRef) -> Result<Shortlist, ServerError> {
        self.edit_shortlist(id, |s| {
            s.add_item(item, Utc::now());
        })
    }

    fn remove_item_from_shortlist(
        &self,
        id: i64,
        item: ListingRef,
    ) -> Result<Shortlist, ServerError> {
        self.edit_shortlist(id, |s| s.remove_item(item, Utc::now()))
    }
}

impl MemoryStore {
    fn edit_shortlist<F>(&self, id: i64, f: F) -> Result<Shortlist, ServerError>
    where
        F: FnOnce(&mut Shortlist),
    {
        let mut lists = self.shortlists.write();
        let s = lists
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServerError::not_found("Shortlist"))?;
        f(s);
        Ok(s.clone())
    }
}

impl SavedSearchRepository for MemoryStore {
    fn list_saved_searches(&self) -> Result<Vec<SavedSearch>, ServerError> {
        Ok(self.searches.read().clone())
    }

    fn get_saved_search(&self, id: i64) -> Result<SavedSearch, ServerError> {
        self.searches
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Saved search"))
    }

    fn create_saved_search(&self, new: NewSavedSearch) -> Result<SavedSearch, ServerError> {
        let name = require_name(&new.name)?;
        let mut searches = self.searches.write();
        let now = Utc::now();
        let created = SavedSearch {
            id: next_id(searches.iter().map(|s| s.id)),
            name,
            criteria: new.criteria,
            alerts_enabled: true,
            created_at: now,
            updated_at: now,
        };
        searches.insert(0, created.clone());
        Ok(created)
    }

    fn update_saved_search(
        &self,
        id: i64,
        update: SavedSearchUpdate,
    ) -> Result<SavedSearch, ServerError> {
        let name = update.name.as_deref().map(require_name).transpose()?;
        let mut searches = self.searches.write();
        let s = searches
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServerError::not_found("Saved search"))?;
        if let Some(name) = name {
            s.name = name;
        }
        if let Some(criteria) = update.criteria {
            s.criteria = criteria;
        }
        if let Some(alerts) = update.alerts_enabled {
            s.alerts_enabled = alerts;
        }
        s.updated_at = Utc::now();
        Ok(s.clone())
    }

    fn delete_saved_search(&self, id: i64) -> Result<(), ServerError> {
        let mut searches = self.searches.write();
        let idx = searches
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServerError::not_found("Saved search"))?;
        searches.remove(idx);
        Ok(())
    }
}

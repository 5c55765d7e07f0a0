// src/db/repository.rs
//
// Account collections sit behind these traits so handlers and tests never
// care whether the records live in memory or in SQLite.

use crate::domain::account::{
    Match, MatchUpdate, NewMatch, NewSavedSearch, NewShortlist, SavedSearch, SavedSearchUpdate,
    Shortlist, ShortlistUpdate,
};
use crate::domain::listing::ListingRef;
use crate::errors::ServerError;

pub trait MatchRepository: Send + Sync {
    /// Newest first.
    fn list_matches(&self) -> Result<Vec<Match>, ServerError>;
    fn get_match(&self, id: i64) -> Result<Match, ServerError>;
    /// `score` is computed by the caller; stores never recompute it.
    fn create_match(&self, new: NewMatch, score: u8) -> Result<Match, ServerError>;
    /// Only the notes are updatable.
    fn update_match(&self, id: i64, update: MatchUpdate) -> Result<Match, ServerError>;
    fn delete_match(&self, id: i64) -> Result<(), ServerError>;
}

pub trait ShortlistRepository: Send + Sync {
    fn list_shortlists(&self) -> Result<Vec<Shortlist>, ServerError>;
    fn get_shortlist(&self, id: i64) -> Result<Shortlist, ServerError>;
    fn create_shortlist(&self, new: NewShortlist) -> Result<Shortlist, ServerError>;
    fn update_shortlist(&self, id: i64, update: ShortlistUpdate) -> Result<Shortlist, ServerError>;
    fn delete_shortlist(&self, id: i64) -> Result<(), ServerError>;
    fn add_item_to_shortlist(&self, id: i64, item: ListingRef) -> Result<Shortlist, ServerError>;
    fn remove_item_from_shortlist(&self, id: i64, item: ListingRef)
        -> Result<Shortlist, ServerError>;
}

pub trait SavedSearchRepository: Send + Sync {
    fn list_saved_searches(&self) -> Result<Vec<SavedSearch>, ServerError>;
    fn get_saved_search(&self, id: i64) -> Result<SavedSearch, ServerError>;
    fn create_saved_search(&self, new: NewSavedSearch) -> Result<SavedSearch, ServerError>;
    fn update_saved_search(
        &self,
        id: i64,
        update: SavedSearchUpdate,
    ) -> Result<SavedSearch, ServerError>;
    fn delete_saved_search(&self, id: i64) -> Result<(), ServerError>;
}

/// Everything the account pages need.
pub trait AccountStore: MatchRepository + ShortlistRepository + SavedSearchRepository {}

impl<T> AccountStore for T where T: MatchRepository + ShortlistRepository + SavedSearchRepository {}

/// Next id for an in-memory collection: one past the largest, starting at 1.
pub fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 9, 4].into_iter()), 10);
    }
}

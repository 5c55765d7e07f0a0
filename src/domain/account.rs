// src/domain/account.rs

use crate::domain::criteria::SearchCriteria;
use crate::domain::listing::ListingRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A user's pairing of one land listing with one concept plan.
///
/// The score is fixed at creation; only the notes can change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub land_listing_id: i64,
    pub concept_plan_id: i64,
    pub compatibility_score: u8,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub land_listing_id: i64,
    pub concept_plan_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    /// Absent leaves the notes alone; `null` clears them.
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

/// Marks a key that was present in the body, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A named collection of listing references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortlist {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<ListingRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shortlist {
    /// Adds `item` unless already present. Returns whether it was added.
    pub fn add_item(&mut self, item: ListingRef, now: DateTime<Utc>) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        self.updated_at = now;
        true
    }

    /// Removes `item` if present; always counts as an edit.
    pub fn remove_item(&mut self, item: ListingRef, now: DateTime<Utc>) {
        self.items.retain(|i| *i != item);
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShortlist {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<ListingRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A stored criteria set the user can re-run later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub criteria: SearchCriteria,
    #[serde(default = "default_alerts")]
    pub alerts_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_alerts() -> bool {
    true
}

impl SavedSearch {
    /// The criteria as a browse-page query string.
    pub fn query_string(&self) -> String {
        self.criteria.to_query_string()
    }
}

/// A saved search as the API returns it, with the query string the client
/// opens the browse page with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearchView {
    #[serde(flatten)]
    pub search: SavedSearch,
    pub query_string: String,
}

impl From<SavedSearch> for SavedSearchView {
    fn from(search: SavedSearch) -> Self {
        let query_string = search.query_string();
        Self {
            search,
            query_string,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedSearch {
    pub name: String,
    #[serde(default)]
    pub criteria: SearchCriteria,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearchUpdate {
    pub name: Option<String>,
    pub criteria: Option<SearchCriteria>,
    pub alerts_enabled: Option<bool>,
}

/// Rejects blank names the way every create/rename endpoint does.
pub fn require_name(name: &str) -> Result<String, crate::errors::ServerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::errors::ServerError::BadRequest(
            "name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

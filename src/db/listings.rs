// src/db/listings.rs

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::domain::criteria::SearchCriteria;
use crate::domain::listing::{ConceptPlan, LandListing, Listing, ListingKind, ShowcaseProject};
use crate::domain::session::{Generation, Generations};
use crate::domain::{aggregate, filter_listings, sort_listings, SortKey};
use crate::errors::ServerError;

pub const LAND_FILE: &str = "landListings.json";
pub const CONCEPT_FILE: &str = "conceptPlans.json";
pub const SHOWCASE_FILE: &str = "showcaseProjects.json";

/// One consistent view of the three collections.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    pub land: Vec<LandListing>,
    pub concepts: Vec<ConceptPlan>,
    pub showcase: Vec<ShowcaseProject>,
}

impl Snapshot {
    /// Reads all three fixture files concurrently. Each reader waits `latency`
    /// first. Any failure fails the whole load.
    pub fn load(dir: &Path, latency: Duration) -> Result<Self, ServerError> {
        thread::scope(|s| {
            let land = s.spawn(|| read_fixture::<LandListing>(&dir.join(LAND_FILE), latency));
            let concepts =
                s.spawn(|| read_fixture::<ConceptPlan>(&dir.join(CONCEPT_FILE), latency));
            let showcase =
                s.spawn(|| read_fixture::<ShowcaseProject>(&dir.join(SHOWCASE_FILE), latency));

            Ok(Snapshot {
                land: join(land)?,
                concepts: join(concepts)?,
                showcase: join(showcase)?,
            })
        })
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T, ServerError>>) -> Result<T, ServerError> {
    handle.join().map_err(|_| {
        tracing::error!("fixture reader panicked");
        ServerError::InternalError
    })?
}

fn read_fixture<T: DeserializeOwned>(path: &Path, latency: Duration) -> Result<Vec<T>, ServerError> {
    if !latency.is_zero() {
        thread::sleep(latency);
    }
    let raw = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read fixture");
        ServerError::LoadFailure(format!("{}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to parse fixture");
        ServerError::LoadFailure(format!("{}: {e}", path.display()))
    })
}

/// The listing data every browse, search and match page reads from.
///
/// Readers take a cheap `Arc` clone of the current snapshot and hand out
/// owned copies, so a reload never disturbs a request that is mid-flight.
#[derive(Debug)]
pub struct ListingStore {
    source: Option<(PathBuf, Duration)>,
    snapshot: RwLock<Arc<Snapshot>>,
    generations: Generations,
}

impl ListingStore {
    pub fn load(dir: impl Into<PathBuf>, latency: Duration) -> Result<Self, ServerError> {
        let dir = dir.into();
        let snapshot = Snapshot::load(&dir, latency)?;
        tracing::info!(
            dir = %dir.display(),
            land = snapshot.land.len(),
            concepts = snapshot.concepts.len(),
            showcase = snapshot.showcase.len(),
            "listings loaded"
        );
        Ok(Self {
            source: Some((dir, latency)),
            snapshot: RwLock::new(Arc::new(snapshot)),
            generations: Generations::new(),
        })
    }

    /// A store over in-memory collections. It has nothing to reload from.
    #[cfg(test)]
    pub fn from_collections(
        land: Vec<LandListing>,
        concepts: Vec<ConceptPlan>,
        showcase: Vec<ShowcaseProject>,
    ) -> Self {
        Self {
            source: None,
            snapshot: RwLock::new(Arc::new(Snapshot {
                land,
                concepts,
                showcase,
            })),
            generations: Generations::new(),
        }
    }

    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }

    pub fn fetch_land_listings(&self) -> Vec<LandListing> {
        self.current().land.clone()
    }

    pub fn fetch_concept_plans(&self) -> Vec<ConceptPlan> {
        self.current().concepts.clone()
    }

    pub fn fetch_showcase_projects(&self) -> Vec<ShowcaseProject> {
        self.current().showcase.clone()
    }

    pub fn fetch_all(&self) -> Vec<Listing> {
        let snap = self.current();
        aggregate(&snap.land, &snap.concepts, &snap.showcase)
    }

    /// First record carrying `id` in aggregated order (land, then concepts,
    /// then showcase). Ids repeat across collections, so callers that know
    /// the kind should use [`ListingStore::fetch_property`].
    pub fn fetch_property_by_id(&self, id: i64) -> Result<Listing, ServerError> {
        let snap = self.current();
        if let Some(l) = snap.land.iter().find(|l| l.id == id) {
            return Ok(Listing::Land(l.clone()));
        }
        if let Some(c) = snap.concepts.iter().find(|c| c.id == id) {
            return Ok(Listing::Concept(c.clone()));
        }
        snap.showcase
            .iter()
            .find(|s| s.id == id)
            .map(|s| Listing::Showcase(s.clone()))
            .ok_or_else(|| ServerError::not_found("Property"))
    }

    pub fn fetch_property(&self, kind: ListingKind, id: i64) -> Result<Listing, ServerError> {
        let snap = self.current();
        let found = match kind {
            ListingKind::Land => snap
                .land
                .iter()
                .find(|l| l.id == id)
                .map(|l| Listing::Land(l.clone())),
            ListingKind::Concept => snap
                .concepts
                .iter()
                .find(|c| c.id == id)
                .map(|c| Listing::Concept(c.clone())),
            ListingKind::Showcase => snap
                .showcase
                .iter()
                .find(|s| s.id == id)
                .map(|s| Listing::Showcase(s.clone())),
        };
        found.ok_or_else(|| ServerError::not_found("Property"))
    }

    pub fn land_by_id(&self, id: i64) -> Result<LandListing, ServerError> {
        self.current()
            .land
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Land listing"))
    }

    pub fn concept_by_id(&self, id: i64) -> Result<ConceptPlan, ServerError> {
        self.current()
            .concepts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Concept plan"))
    }

    /// Aggregate, filter, then sort.
    pub fn search(&self, criteria: &SearchCriteria, sort: SortKey) -> Vec<Listing> {
        let all = self.fetch_all();
        let parsed = criteria.parse();
        let filtered = filter_listings(&all, &parsed);
        tracing::debug!(
            total = all.len(),
            matched = filtered.len(),
            ?sort,
            "search"
        );
        sort_listings(&filtered, sort)
    }

    /// Re-reads the fixtures. If another reload that started later has
    /// already finished, this result is thrown away and `Ok(false)` returned.
    pub fn reload(&self) -> Result<bool, ServerError> {
        let (dir, latency) = self
            .source
            .as_ref()
            .ok_or_else(|| ServerError::BadRequest("no fixture directory to reload from".into()))?;
        let ticket = self.begin_reload();
        let snapshot = Snapshot::load(dir, *latency)?;
        Ok(self.install(ticket, snapshot))
    }

    pub(crate) fn install(&self, ticket: Generation, snapshot: Snapshot) -> bool {
        let mut slot = self.snapshot.write();
        if !self.generations.accept(ticket) {
            tracing::warn!(
                generation = ticket.value(),
                latest = self.generations.latest_accepted(),
                "discarding stale listing reload"
            );
            return false;
        }
        tracing::info!(
            generation = ticket.value(),
            land = snapshot.land.len(),
            concepts = snapshot.concepts.len(),
            showcase = snapshot.showcase.len(),
            "listings reloaded"
        );
        *slot = Arc::new(snapshot);
        true
    }

    pub(crate) fn begin_reload(&self) -> Generation {
        self.generations.begin()
    }
}

// src/domain/aggregate.rs

use crate::domain::listing::{ConceptPlan, LandListing, Listing, ShowcaseProject};

/// Merges the three collections into one tagged sequence.
///
/// Order is land, then concept plans, then showcase projects, each in its
/// original order. Nothing is deduplicated: equal ids in different
/// collections are different listings.
pub fn aggregate(
    land: &[LandListing],
    concepts: &[ConceptPlan],
    showcase: &[ShowcaseProject],
) -> Vec<Listing> {
    let mut out = Vec::with_capacity(land.len() + concepts.len() + showcase.len());
    out.extend(land.iter().cloned().map(Listing::Land));
    out.extend(concepts.iter().cloned().map(Listing::Concept));
    out.extend(showcase.iter().cloned().map(Listing::Showcase));
    out
}

// src/domain/matching.rs

use crate::domain::listing::{ConceptPlan, LandListing};
use rand::Rng;

pub const BASE_SCORE: u32 = 70;
pub const MAX_SCORE: u8 = 100;

/// Upper bound (exclusive) of the random bump added to every score.
const JITTER: u32 = 10;

/// Zero is treated the same as missing, as the listing forms never send a real 0.
fn present_f64(v: Option<f64>) -> Option<f64> {
    v.filter(|x| *x > 0.0)
}

fn present_i64(v: Option<i64>) -> Option<i64> {
    v.filter(|x| *x != 0)
}

/// Deterministic part of the score: base plus the area and budget bonuses.
pub fn base_compatibility(land: &LandListing, concept: &ConceptPlan) -> u32 {
    let mut score = BASE_SCORE;

    // Footprint of the house relative to the section.
    if let (Some(area), Some(floor)) = (present_f64(land.area), present_f64(concept.floor_area)) {
        let ratio = floor / area;
        score += if (0.2..=0.4).contains(&ratio) {
            15
        } else if (0.1..=0.6).contains(&ratio) {
            10
        } else {
            5
        };
    }

    // Land plus build.
    if let (Some(price), Some(build)) = (
        present_i64(land.price),
        present_i64(concept.estimated_price),
    ) {
        let total = price + build;
        if total <= 800_000 {
            score += 10;
        } else if total <= 1_200_000 {
            score += 5;
        }
    }

    score
}

/// Compatibility score in `70..=100` using the supplied RNG.
pub fn compatibility_score_with<R: Rng>(
    land: &LandListing,
    concept: &ConceptPlan,
    rng: &mut R,
) -> u8 {
    let raw = base_compatibility(land, concept) + rng.gen_range(0..JITTER);
    raw.min(MAX_SCORE as u32) as u8
}

/// Compatibility score in `70..=100`. Includes a random bump, so two calls
/// with the same pair can disagree.
pub fn compatibility_score(land: &LandListing, concept: &ConceptPlan) -> u8 {
    compatibility_score_with(land, concept, &mut rand::thread_rng())
}

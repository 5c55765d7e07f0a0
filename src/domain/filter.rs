// src/domain/filter.rs

use crate::domain::criteria::Criteria;
use crate::domain::listing::Listing;

/// Returns the listings that satisfy every active criterion, in input order.
///
/// Inputs are never touched; the result is a fresh vector of clones, so it is
/// safe to re-run on every keystroke against the same snapshot.
pub fn filter_listings(listings: &[Listing], criteria: &Criteria) -> Vec<Listing> {
    if criteria.is_empty() {
        return listings.to_vec();
    }
    listings
        .iter()
        .filter(|l| matches(l, criteria))
        .cloned()
        .collect()
}

/// True when `listing` passes all active criteria. Unset criteria pass.
pub fn matches(listing: &Listing, c: &Criteria) -> bool {
    if let Some(term) = &c.search {
        if !matches_search(listing, term) {
            return false;
        }
    }

    if let Some(kind) = &c.kind {
        if listing.kind().as_str() != kind {
            return false;
        }
    }

    if let Some(region) = &c.region {
        if !listing.region().same(region) {
            return false;
        }
    }

    if let Some(location) = &c.location {
        let hit = listing
            .location()
            .map(|loc| loc.to_lowercase().contains(location.as_str()))
            .unwrap_or(false);
        if !hit {
            return false;
        }
    }

    // Missing prices count as 0 here, so a min-price filter keeps nothing
    // priceless but a max-price filter keeps all of them.
    let price = listing.effective_price().unwrap_or(0) as f64;
    if c.min_price.is_some_and(|min| price < min) {
        return false;
    }
    if c.max_price.is_some_and(|max| price > max) {
        return false;
    }

    if !at_least(listing.bedrooms().map(f64::from), c.bedrooms)
        || !at_least(listing.bathrooms().map(f64::from), c.bathrooms)
        || !at_least(listing.garage_spaces().map(f64::from), c.garage_spaces)
        || !at_least(listing.effective_area(), c.min_area)
    {
        return false;
    }

    if let Some(build_type) = &c.build_type {
        let hit = listing
            .build_type()
            .map(|bt| bt.as_str().to_lowercase() == *build_type)
            .unwrap_or(false);
        if !hit {
            return false;
        }
    }

    if let Some(range) = &c.price_range {
        match listing.effective_price() {
            Some(cost) if range.contains(cost as f64 / 1000.0) => {}
            _ => return false,
        }
    }

    true
}

fn matches_search(listing: &Listing, term: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(term);

    let region = listing.region().name();

    hit(listing.title())
        || listing.location().is_some_and(hit)
        || hit(region)
        || hit(&region.replace('\'', ""))
        || listing.descriptions().into_iter().any(hit)
}

/// Threshold check where a missing value never satisfies a set threshold.
fn at_least(value: Option<f64>, threshold: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(min) => value.is_some_and(|v| v >= min),
    }
}

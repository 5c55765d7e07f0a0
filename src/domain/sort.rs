// src/domain/sort.rs

use crate::domain::listing::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
    AreaLargeToSmall,
    AreaSmallToLarge,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "newest" | "newest-first" => Ok(SortKey::Newest),
            "price-low" | "price-low-to-high" => Ok(SortKey::PriceLowToHigh),
            "price-high" | "price-high-to-low" => Ok(SortKey::PriceHighToLow),
            "area-large" | "area-large-to-small" => Ok(SortKey::AreaLargeToSmall),
            "area-small" | "area-small-to-large" => Ok(SortKey::AreaSmallToLarge),
            other => Err(format!("unknown sort '{other}'")),
        }
    }
}

/// Returns a sorted copy. The sort is stable, so ties keep their incoming order.
pub fn sort_listings(listings: &[Listing], key: SortKey) -> Vec<Listing> {
    let mut out = listings.to_vec();
    match key {
        SortKey::Newest => out.sort_by(|a, b| created(b).cmp(&created(a))),
        SortKey::PriceLowToHigh => out.sort_by_key(price),
        SortKey::PriceHighToLow => out.sort_by(|a, b| price(b).cmp(&price(a))),
        SortKey::AreaLargeToSmall => out.sort_by(|a, b| cmp_area(b, a)),
        SortKey::AreaSmallToLarge => out.sort_by(cmp_area),
    }
    out
}

/// Missing timestamps count as the epoch.
fn created(l: &Listing) -> i64 {
    l.created_at().map_or(0, |dt| dt.timestamp_millis())
}

fn price(l: &Listing) -> i64 {
    l.effective_price().unwrap_or(0)
}

fn cmp_area(a: &Listing, b: &Listing) -> Ordering {
    let area = |l: &Listing| l.effective_area().unwrap_or(0.0);
    area(a).total_cmp(&area(b))
}

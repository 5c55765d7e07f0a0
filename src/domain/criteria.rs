// src/domain/criteria.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::listing::Region;

/// Criteria exactly as the browse form (or a saved search) sends them:
/// every value is an optional string, possibly empty, possibly junk.
///
/// Use [`SearchCriteria::parse`] to get the typed form the filter runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub bedrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub bathrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub garage_spaces: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "loose_string")]
    pub min_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
}

/// Saved searches written by hand sometimes carry numbers instead of strings.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Query-string keys, in the order `to_query_string` writes them.
const PARAM_KEYS: [&str; 12] = [
    "search",
    "type",
    "region",
    "location",
    "minPrice",
    "maxPrice",
    "bedrooms",
    "bathrooms",
    "garageSpaces",
    "minArea",
    "buildType",
    "priceRange",
];

impl SearchCriteria {
    /// Picks the recognised keys out of decoded query parameters.
    /// Unknown keys (`sort`, paging, ...) are left for the caller.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |k: &str| params.get(k).cloned();
        Self {
            search: get("search"),
            kind: get("type"),
            region: get("region"),
            location: get("location"),
            min_price: get("minPrice"),
            max_price: get("maxPrice"),
            bedrooms: get("bedrooms"),
            bathrooms: get("bathrooms"),
            garage_spaces: get("garageSpaces"),
            min_area: get("minArea"),
            build_type: get("buildType"),
            price_range: get("priceRange"),
        }
    }

    fn values(&self) -> [Option<&str>; 12] {
        [
            self.search.as_deref(),
            self.kind.as_deref(),
            self.region.as_deref(),
            self.location.as_deref(),
            self.min_price.as_deref(),
            self.max_price.as_deref(),
            self.bedrooms.as_deref(),
            self.bathrooms.as_deref(),
            self.garage_spaces.as_deref(),
            self.min_area.as_deref(),
            self.build_type.as_deref(),
            self.price_range.as_deref(),
        ]
    }

    /// Renders the non-empty criteria as a URL query string, e.g.
    /// `search=pool&region=Waikato`.
    pub fn to_query_string(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in PARAM_KEYS.iter().zip(self.values()) {
            if let Some(v) = non_empty(value) {
                ser.append_pair(key, v);
            }
        }
        ser.finish()
    }

    pub fn parse(&self) -> Criteria {
        Criteria {
            // Spaces inside the term are significant, so only blank terms drop out.
            search: self
                .search
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_lowercase),
            kind: non_empty(self.kind.as_deref())
                .map(str::to_lowercase)
                .filter(|k| k != "all"),
            region: non_empty(self.region.as_deref()).map(Region::parse),
            location: non_empty(self.location.as_deref()).map(str::to_lowercase),
            min_price: parse_number(self.min_price.as_deref()),
            max_price: parse_number(self.max_price.as_deref()),
            bedrooms: parse_number(self.bedrooms.as_deref()),
            bathrooms: parse_number(self.bathrooms.as_deref()),
            garage_spaces: parse_number(self.garage_spaces.as_deref()),
            min_area: parse_number(self.min_area.as_deref()),
            build_type: non_empty(self.build_type.as_deref()).map(str::to_lowercase),
            price_range: non_empty(self.price_range.as_deref()).and_then(PriceRange::parse),
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Junk numbers switch the criterion off rather than failing the search.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    non_empty(raw)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// A price bucket in thousands, e.g. `"400-600"` is $400k to $600k.
/// `"1000-"` has no upper limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn parse(raw: &str) -> Option<Self> {
        let (lo, hi) = raw.trim().split_once('-')?;
        let min = match lo.trim() {
            "" => 0.0,
            s => s.parse::<f64>().ok().filter(|n| n.is_finite())?,
        };
        let max = match hi.trim() {
            "" => None,
            s => Some(s.parse::<f64>().ok().filter(|n| n.is_finite())?),
        };
        Some(Self { min, max })
    }

    /// `thousands` is the cost already divided by 1000.
    pub fn contains(&self, thousands: f64) -> bool {
        thousands >= self.min && self.max.map_or(true, |max| thousands <= max)
    }
}

/// Typed, normalised criteria. `None` means "not filtering on this".
/// Text fields are already lowercased; the region is resolved through its aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub region: Option<Region>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub min_area: Option<f64>,
    pub build_type: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl Criteria {
    pub fn is_empty(&self) -> bool {
        *self == Criteria::default()
    }
}

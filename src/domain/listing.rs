// src/domain/listing.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A named geographic grouping used for browsing and filtering.
///
/// Fixtures spell regions inconsistently ("bay of plenty", "Bay of Plenty"),
/// so parsing is case-insensitive. Anything we don't recognise is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    Northland,
    Auckland,
    Waikato,
    BayOfPlenty,
    HawkesBay,
    Taranaki,
    ManawatuWhanganui,
    Wellington,
    Nelson,
    Marlborough,
    Canterbury,
    Otago,
    Southland,
    Other(String),
}

impl Region {
    /// Accepts display names, URL slugs (`bay-of-plenty`) and the common
    /// apostrophe-free spellings.
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase().replace('-', " ").replace('\'', "");
        match key.as_str() {
            "northland" => Region::Northland,
            "auckland" => Region::Auckland,
            "waikato" => Region::Waikato,
            "bay of plenty" => Region::BayOfPlenty,
            "hawkes bay" => Region::HawkesBay,
            "taranaki" => Region::Taranaki,
            "manawatu whanganui" | "manawatu" => Region::ManawatuWhanganui,
            "wellington" => Region::Wellington,
            "nelson" => Region::Nelson,
            "marlborough" => Region::Marlborough,
            "canterbury" => Region::Canterbury,
            "otago" => Region::Otago,
            "southland" => Region::Southland,
            _ => Region::Other(raw.trim().to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Region::Northland => "Northland",
            Region::Auckland => "Auckland",
            Region::Waikato => "Waikato",
            Region::BayOfPlenty => "Bay of Plenty",
            Region::HawkesBay => "Hawke's Bay",
            Region::Taranaki => "Taranaki",
            Region::ManawatuWhanganui => "Manawatu-Whanganui",
            Region::Wellington => "Wellington",
            Region::Nelson => "Nelson",
            Region::Marlborough => "Marlborough",
            Region::Canterbury => "Canterbury",
            Region::Otago => "Otago",
            Region::Southland => "Southland",
            Region::Other(name) => name,
        }
    }

    /// Same region under any accepted spelling. Unrecognised names compare
    /// case-insensitively.
    pub fn same(&self, other: &Region) -> bool {
        match (self, other) {
            (Region::Other(a), Region::Other(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Region::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Fixed,
    Auction,
    #[serde(alias = "price-on-application", alias = "negotiation")]
    Poa,
}

/// Kind of work a showcase project represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildType {
    Residential,
    Commercial,
    Industrial,
    MixedUse,
    Renovation,
    Extension,
    Other(String),
}

impl BuildType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "residential" => BuildType::Residential,
            "commercial" => BuildType::Commercial,
            "industrial" => BuildType::Industrial,
            "mixed-use" | "mixed use" => BuildType::MixedUse,
            "renovation" => BuildType::Renovation,
            "extension" => BuildType::Extension,
            _ => BuildType::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BuildType::Residential => "residential",
            BuildType::Commercial => "commercial",
            BuildType::Industrial => "industrial",
            BuildType::MixedUse => "mixed-use",
            BuildType::Renovation => "renovation",
            BuildType::Extension => "extension",
            BuildType::Other(raw) => raw,
        }
    }
}

impl Serialize for BuildType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuildType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BuildType::parse(&raw))
    }
}

/// Fixture timestamps are hand-written; a bad one must not sink the whole load.
/// Anything we can't read becomes `None` and sorts as the epoch.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A bare parcel of land for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandListing {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub title: String,
    pub location: String,
    pub region: Region,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub price_type: PriceType,
    /// Square meters.
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A home design that can be built on a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptPlan {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub name: String,
    pub region: Region,
    #[serde(default)]
    pub estimated_price: Option<i64>,
    /// Square meters.
    #[serde(default)]
    pub floor_area: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub garage_spaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lounges: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A completed build, shown off by the builder who did it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseProject {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub title: String,
    pub region: Region,
    #[serde(default)]
    pub estimated_cost: Option<i64>,
    pub build_type: BuildType,
    pub location: String,
    #[serde(default)]
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub builder_id: i64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Discriminant carried by every aggregated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Land,
    Concept,
    Showcase,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Land => "land",
            ListingKind::Concept => "concept",
            ListingKind::Showcase => "showcase",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "land" => Ok(ListingKind::Land),
            "concept" => Ok(ListingKind::Concept),
            "showcase" => Ok(ListingKind::Showcase),
            other => Err(format!("unknown listing type '{other}'")),
        }
    }
}

/// Ids are only unique within one collection, so anything that needs to
/// identify a listing across collections uses the `(type, Id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingRef {
    #[serde(rename = "type")]
    pub kind: ListingKind,
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
}

impl ListingRef {
    pub fn new(kind: ListingKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// An aggregated record: one of the three listing shapes plus its `type` tag.
///
/// Serializes as the inner record with an extra `"type"` field, which is the
/// shape the browse pages consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Listing {
    Land(LandListing),
    Concept(ConceptPlan),
    Showcase(ShowcaseProject),
}

impl Listing {
    pub fn kind(&self) -> ListingKind {
        match self {
            Listing::Land(_) => ListingKind::Land,
            Listing::Concept(_) => ListingKind::Concept,
            Listing::Showcase(_) => ListingKind::Showcase,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Listing::Land(l) => l.id,
            Listing::Concept(c) => c.id,
            Listing::Showcase(s) => s.id,
        }
    }

    /// Title for land and showcase records, name for concept plans.
    pub fn title(&self) -> &str {
        match self {
            Listing::Land(l) => &l.title,
            Listing::Concept(c) => &c.name,
            Listing::Showcase(s) => &s.title,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Listing::Land(l) => Some(&l.location),
            Listing::Concept(_) => None,
            Listing::Showcase(s) => Some(&s.location),
        }
    }

    pub fn region(&self) -> &Region {
        match self {
            Listing::Land(l) => &l.region,
            Listing::Concept(c) => &c.region,
            Listing::Showcase(s) => &s.region,
        }
    }

    /// Free text worth searching: descriptions, plus the story for showcase projects.
    pub fn descriptions(&self) -> Vec<&str> {
        match self {
            Listing::Land(l) => l.description.as_deref().into_iter().collect(),
            Listing::Concept(c) => c.description.as_deref().into_iter().collect(),
            Listing::Showcase(s) => {
                let mut out = vec![s.story.as_str()];
                out.extend(s.description.as_deref());
                out
            }
        }
    }

    /// Price, else estimated price, else estimated cost.
    pub fn effective_price(&self) -> Option<i64> {
        match self {
            Listing::Land(l) => l.price,
            Listing::Concept(c) => c.estimated_price,
            Listing::Showcase(s) => s.estimated_cost,
        }
    }

    /// Land area, else floor area. Showcase projects carry neither.
    pub fn effective_area(&self) -> Option<f64> {
        match self {
            Listing::Land(l) => l.area,
            Listing::Concept(c) => c.floor_area,
            Listing::Showcase(_) => None,
        }
    }

    pub fn bedrooms(&self) -> Option<u32> {
        match self {
            Listing::Concept(c) => c.bedrooms,
            _ => None,
        }
    }

    pub fn bathrooms(&self) -> Option<u32> {
        match self {
            Listing::Concept(c) => c.bathrooms,
            _ => None,
        }
    }

    pub fn garage_spaces(&self) -> Option<u32> {
        match self {
            Listing::Concept(c) => c.garage_spaces,
            _ => None,
        }
    }

    pub fn build_type(&self) -> Option<&BuildType> {
        match self {
            Listing::Showcase(s) => Some(&s.build_type),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Listing::Land(l) => l.created_at,
            Listing::Concept(c) => c.created_at,
            Listing::Showcase(s) => s.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small builders shared by the domain tests.
    use super::*;

    pub fn land(id: i64) -> LandListing {
        LandListing {
            id,
            title: format!("Section {id}"),
            location: "Cambridge".to_string(),
            region: Region::Waikato,
            price: None,
            price_type: PriceType::Fixed,
            area: None,
            images: Vec::new(),
            description: None,
            features: Vec::new(),
            status: None,
            created_at: None,
        }
    }

    pub fn concept(id: i64) -> ConceptPlan {
        ConceptPlan {
            id,
            name: format!("Plan {id}"),
            region: Region::Auckland,
            estimated_price: None,
            floor_area: None,
            bedrooms: None,
            bathrooms: None,
            garage_spaces: None,
            lounges: None,
            description: None,
            images: Vec::new(),
            features: Vec::new(),
            created_at: None,
        }
    }

    pub fn showcase(id: i64) -> ShowcaseProject {
        ShowcaseProject {
            id,
            title: format!("Project {id}"),
            region: Region::Canterbury,
            estimated_cost: None,
            build_type: BuildType::Residential,
            location: "Rolleston".to_string(),
            story: String::new(),
            description: None,
            images: Vec::new(),
            builder_id: 1,
            created_at: None,
        }
    }
}

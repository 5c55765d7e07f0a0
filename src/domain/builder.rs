// src/domain/builder.rs

use crate::domain::account::require_name;
use crate::domain::listing::Region;
use crate::errors::ServerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    pub name: String,
    pub region: Region,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub projects_completed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A "build this for me" request from the custom build page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEnquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub land_listing_id: Option<i64>,
    #[serde(default)]
    pub concept_plan_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryReceipt {
    pub success: bool,
    pub message: String,
    pub enquiry_id: u32,
}

impl BuildEnquiry {
    /// Trimmed name and normalized email, or `BadRequest`.
    pub fn validated(mut self) -> Result<Self, ServerError> {
        self.name = require_name(&self.name)?;
        self.email = normalize_email(&self.email)?;
        Ok(self)
    }
}

pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::BadRequest("invalid email".into()));
    }
    Ok(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enquiry(name: &str, email: &str) -> BuildEnquiry {
        BuildEnquiry {
            name: name.into(),
            email: email.into(),
            phone: None,
            region: Some("Otago".into()),
            budget: Some(650_000),
            message: "Three bedroom on a sloping section".into(),
            land_listing_id: None,
            concept_plan_id: Some(2),
        }
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Aroha@Example.CO.NZ ").unwrap(),
            "aroha@example.co.nz"
        );
    }

    #[test]
    fn normalize_email_rejects_invalid() {
        assert!(normalize_email("").is_err());
        assert!(normalize_email("no-at-symbol").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("test@").is_err());
    }

    #[test]
    fn validated_enquiry_needs_a_name() {
        assert!(enquiry("  ", "a@b.nz").validated().is_err());
        let ok = enquiry(" Sam ", "SAM@B.NZ").validated().unwrap();
        assert_eq!(ok.name, "Sam");
        assert_eq!(ok.email, "sam@b.nz");
    }

    #[test]
    fn builder_region_parses_from_display_name() {
        let b: Builder = serde_json::from_str(
            r#"{"Id":1,"name":"Southern Homes","region":"hawke's bay","rating":4.6}"#,
        )
        .unwrap();
        assert_eq!(b.region, Region::HawkesBay);
        assert_eq!(b.projects_completed, None);
    }
}

// src/db/builders.rs

use rand::Rng;
use std::path::Path;

use crate::domain::builder::{BuildEnquiry, Builder, EnquiryReceipt};
use crate::domain::listing::Region;
use crate::errors::ServerError;

pub const BUILDERS_FILE: &str = "builders.json";

/// Builders who take on custom builds, read once at startup.
#[derive(Debug, Default, Clone)]
pub struct BuilderDirectory {
    builders: Vec<Builder>,
}

impl BuilderDirectory {
    #[cfg(test)]
    pub fn new(builders: Vec<Builder>) -> Self {
        Self { builders }
    }

    /// A missing `builders.json` gives an empty directory; a malformed one is
    /// a load failure.
    pub fn load(dir: &Path) -> Result<Self, ServerError> {
        let path = dir.join(BUILDERS_FILE);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "no builders file, directory is empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| ServerError::LoadFailure(format!("{}: {e}", path.display())))?;
        let builders: Vec<Builder> = serde_json::from_str(&raw)
            .map_err(|e| ServerError::LoadFailure(format!("{}: {e}", path.display())))?;
        tracing::info!(count = builders.len(), "builders loaded");
        Ok(Self { builders })
    }

    pub fn all(&self) -> Vec<Builder> {
        self.builders.clone()
    }

    pub fn by_id(&self, id: i64) -> Result<Builder, ServerError> {
        self.builders
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| ServerError::not_found("Builder"))
    }

    pub fn by_region(&self, region: &str) -> Vec<Builder> {
        let wanted = Region::parse(region);
        self.builders
            .iter()
            .filter(|b| b.region.same(&wanted))
            .cloned()
            .collect()
    }

    /// Accepts a custom build enquiry. Nothing is forwarded yet; the enquiry
    /// is logged and acknowledged.
    pub fn submit_enquiry(&self, enquiry: BuildEnquiry) -> Result<EnquiryReceipt, ServerError> {
        let enquiry = enquiry.validated()?;
        let enquiry_id = rand::thread_rng().gen_range(0..10_000);
        tracing::info!(
            enquiry_id,
            email = %enquiry.email,
            region = enquiry.region.as_deref().unwrap_or("-"),
            budget = enquiry.budget,
            land_listing_id = enquiry.land_listing_id,
            concept_plan_id = enquiry.concept_plan_id,
            "custom build enquiry received"
        );
        Ok(EnquiryReceipt {
            success: true,
            message: "Enquiry submitted successfully".into(),
            enquiry_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(id: i64, region: Region) -> Builder {
        Builder {
            id,
            name: format!("Builder {id}"),
            region,
            specialty: None,
            rating: Some(4.5),
            projects_completed: Some(12),
            phone: None,
            email: None,
        }
    }

    fn directory() -> BuilderDirectory {
        BuilderDirectory::new(vec![
            builder(1, Region::Otago),
            builder(2, Region::BayOfPlenty),
            builder(3, Region::Otago),
        ])
    }

    #[test]
    fn region_lookup_ignores_case() {
        let ids: Vec<i64> = directory().by_region("OTAGO").iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(directory().by_region("bay of plenty").len(), 1);
        assert!(directory().by_region("Southland").is_empty());
    }

    #[test]
    fn region_lookup_accepts_slugs() {
        assert_eq!(directory().by_region("bay-of-plenty").len(), 1);
        assert_eq!(directory().by_region(" otago ").len(), 2);
    }

    #[test]
    fn unknown_builder_is_not_found() {
        assert!(matches!(
            directory().by_id(42),
            Err(ServerError::NotFound(_))
        ));
        assert_eq!(directory().by_id(2).unwrap().region, Region::BayOfPlenty);
    }

    #[test]
    fn enquiry_receipt_id_is_in_range() {
        let receipt = directory()
            .submit_enquiry(BuildEnquiry {
                name: "Mere".into(),
                email: "mere@example.nz".into(),
                phone: None,
                region: None,
                budget: None,
                message: String::new(),
                land_listing_id: Some(1),
                concept_plan_id: None,
            })
            .unwrap();
        assert!(receipt.success);
        assert!(receipt.enquiry_id < 10_000);
    }

    #[test]
    fn loads_bundled_builders() {
        let dir = BuilderDirectory::load(Path::new("data/fixtures")).unwrap();
        assert!(!dir.all().is_empty());
    }

    #[test]
    fn missing_file_is_empty_directory() {
        let dir = BuilderDirectory::load(Path::new("does/not/exist")).unwrap();
        assert!(dir.all().is_empty());
    }
}

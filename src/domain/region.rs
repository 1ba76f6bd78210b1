//! Region domain entity and related types.
//!
//! A region is a National Paralympic Committee, identified by its
//! three-letter NOC code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Three uppercase ASCII letters, e.g. `GBR`
pub static NOC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("NOC pattern is a valid regex"));

/// Region domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Region {
    /// National Paralympic Committee code
    #[serde(rename = "NOC")]
    #[schema(example = "GBR")]
    pub noc: String,
    /// Region name
    #[schema(example = "Great Britain")]
    pub region: String,
    #[schema(example = "Team GB")]
    pub notes: Option<String>,
}

impl Region {
    pub fn new(noc: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            noc: noc.into(),
            region: region.into(),
            notes: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: UpdateRegion) {
        if let Some(region) = update.region {
            self.region = region;
        }
        if let Some(notes) = update.notes {
            // An empty string clears the notes
            self.notes = if notes.is_empty() { None } else { Some(notes) };
        }
    }
}

/// Region creation payload
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NewRegion {
    #[serde(rename = "NOC")]
    #[validate(regex(path = *NOC_PATTERN, message = "NOC must be three uppercase letters"))]
    #[schema(example = "GBR")]
    pub noc: String,
    #[validate(length(min = 1, message = "Region name is required"))]
    #[schema(example = "Great Britain")]
    pub region: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<NewRegion> for Region {
    fn from(new: NewRegion) -> Self {
        Self {
            noc: new.noc,
            region: new.region,
            notes: new.notes.filter(|n| !n.is_empty()),
        }
    }
}

/// Region update payload, absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRegion {
    #[validate(length(min = 1, message = "Region name must not be empty"))]
    #[schema(example = "Great Britain")]
    pub region: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_region(noc: &str) -> NewRegion {
        NewRegion {
            noc: noc.to_string(),
            region: "Somewhere".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_noc_must_be_three_uppercase_letters() {
        assert!(new_region("GBR").validate().is_ok());
        assert!(new_region("gbr").validate().is_err());
        assert!(new_region("GB").validate().is_err());
        assert!(new_region("GBRX").validate().is_err());
        assert!(new_region("G1R").validate().is_err());
    }

    #[test]
    fn test_region_name_required() {
        let mut region = new_region("FRA");
        region.region = String::new();
        assert!(region.validate().is_err());
    }

    #[test]
    fn test_region_serializes_noc_key() {
        let region = Region::new("JPN", "Japan");
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["NOC"], "JPN");
        assert_eq!(json["region"], "Japan");
        assert!(json["notes"].is_null());
    }

    #[test]
    fn test_apply_update() {
        let mut region = Region::new("USA", "United States");
        region.notes = Some("old".to_string());

        region.apply(UpdateRegion {
            region: Some("USA".to_string()),
            notes: Some(String::new()),
        });

        assert_eq!(region.region, "USA");
        assert_eq!(region.notes, None);
    }
}

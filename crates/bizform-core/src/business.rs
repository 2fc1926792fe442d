//! # Business Type — Closed Category Set
//!
//! Defines the `BusinessType` enum used to select a license checklist. The
//! set is closed: every category maps to exactly one license list in the
//! reference tables, and the `Other` category is the catch-all for keys the
//! user interface does not know about.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Business categories offered by the license lookup.
///
/// | Key | Label |
/// |-----|-------|
/// | `restaurant` | Restaurant/Food Service |
/// | `retail` | Retail Store |
/// | `consulting` | Consulting/Professional Services |
/// | `construction` | Construction/Contractor |
/// | `healthcare` | Healthcare Services |
/// | `automotive` | Automotive Services |
/// | `beauty` | Beauty/Salon Services |
/// | `childcare` | Childcare/Education |
/// | `fitness` | Fitness/Gym |
/// | `transportation` | Transportation Services |
/// | `manufacturing` | Manufacturing |
/// | `technology` | Technology/Software |
/// | `other` | Other |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Restaurant,
    Retail,
    Consulting,
    Construction,
    Healthcare,
    Automotive,
    Beauty,
    Childcare,
    Fitness,
    Transportation,
    Manufacturing,
    Technology,
    Other,
}

/// Total number of business categories.
pub const BUSINESS_TYPE_COUNT: usize = 13;

impl BusinessType {
    /// Returns all categories in display order, `Other` last.
    pub fn all() -> &'static [BusinessType] {
        &[
            Self::Restaurant,
            Self::Retail,
            Self::Consulting,
            Self::Construction,
            Self::Healthcare,
            Self::Automotive,
            Self::Beauty,
            Self::Childcare,
            Self::Fitness,
            Self::Transportation,
            Self::Manufacturing,
            Self::Technology,
            Self::Other,
        ]
    }

    /// The lowercase key. Matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Retail => "retail",
            Self::Consulting => "consulting",
            Self::Construction => "construction",
            Self::Healthcare => "healthcare",
            Self::Automotive => "automotive",
            Self::Beauty => "beauty",
            Self::Childcare => "childcare",
            Self::Fitness => "fitness",
            Self::Transportation => "transportation",
            Self::Manufacturing => "manufacturing",
            Self::Technology => "technology",
            Self::Other => "other",
        }
    }

    /// Human-readable label shown in the category picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant/Food Service",
            Self::Retail => "Retail Store",
            Self::Consulting => "Consulting/Professional Services",
            Self::Construction => "Construction/Contractor",
            Self::Healthcare => "Healthcare Services",
            Self::Automotive => "Automotive Services",
            Self::Beauty => "Beauty/Salon Services",
            Self::Childcare => "Childcare/Education",
            Self::Fitness => "Fitness/Gym",
            Self::Transportation => "Transportation Services",
            Self::Manufacturing => "Manufacturing",
            Self::Technology => "Technology/Software",
            Self::Other => "Other",
        }
    }

    /// Parse a key, falling back to [`BusinessType::Other`] for anything
    /// that is not a known category.
    pub fn from_key_or_other(key: &str) -> Self {
        key.parse().unwrap_or(Self::Other)
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = ValidationError;

    /// Parse a category from its lowercase key. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant" => Ok(Self::Restaurant),
            "retail" => Ok(Self::Retail),
            "consulting" => Ok(Self::Consulting),
            "construction" => Ok(Self::Construction),
            "healthcare" => Ok(Self::Healthcare),
            "automotive" => Ok(Self::Automotive),
            "beauty" => Ok(Self::Beauty),
            "childcare" => Ok(Self::Childcare),
            "fitness" => Ok(Self::Fitness),
            "transportation" => Ok(Self::Transportation),
            "manufacturing" => Ok(Self::Manufacturing),
            "technology" => Ok(Self::Technology),
            "other" => Ok(Self::Other),
            other => Err(ValidationError::UnknownBusinessType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_count() {
        assert_eq!(BusinessType::all().len(), BUSINESS_TYPE_COUNT);
        assert_eq!(BusinessType::all().last(), Some(&BusinessType::Other));
    }

    #[test]
    fn test_as_str_roundtrip() {
        for ty in BusinessType::all() {
            let parsed: BusinessType = ty.as_str().parse().unwrap_or_else(|e| {
                panic!("Failed to parse {:?}: {e}", ty.as_str())
            });
            assert_eq!(*ty, parsed);
        }
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for ty in BusinessType::all() {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_other() {
        assert!("unknown-key".parse::<BusinessType>().is_err());
        assert!("Restaurant".parse::<BusinessType>().is_err());
        assert_eq!(BusinessType::from_key_or_other("unknown-key"), BusinessType::Other);
        assert_eq!(BusinessType::from_key_or_other("beauty"), BusinessType::Beauty);
    }

    #[test]
    fn test_labels_non_empty() {
        for ty in BusinessType::all() {
            assert!(!ty.label().is_empty());
        }
    }
}

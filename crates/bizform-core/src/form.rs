//! # Form Kinds
//!
//! The four guided forms of the suite. Each kind owns exactly one
//! persistence table and one dashboard tile.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the guided business-formation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Federal EIN application worksheet.
    Ein,
    /// State LLC formation worksheet.
    Llc,
    /// Business license and permit lookup.
    Licenses,
    /// Business bank account comparison.
    Banking,
}

impl FormKind {
    /// All forms in dashboard order.
    pub fn all() -> &'static [FormKind] {
        &[Self::Ein, Self::Llc, Self::Licenses, Self::Banking]
    }

    /// Route segment and serde key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ein => "ein",
            Self::Llc => "llc",
            Self::Licenses => "licenses",
            Self::Banking => "banking",
        }
    }

    /// Backing table. One row per save, latest `created_at` wins on read.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Ein => "ein_applications",
            Self::Llc => "llc_applications",
            Self::Licenses => "business_licenses",
            Self::Banking => "banking_options",
        }
    }

    /// Dashboard tile title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ein => "EIN Application",
            Self::Llc => "LLC Formation",
            Self::Licenses => "Business Licenses",
            Self::Banking => "Business Banking",
        }
    }

    /// Dashboard tile description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ein => "Get your Federal Tax ID number for free through the IRS",
            Self::Llc => "Form your LLC directly with your state - save on fees",
            Self::Licenses => "Find required licenses and permits for your business type",
            Self::Banking => "Find the best business bank accounts in your area",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ein" => Ok(Self::Ein),
            "llc" => Ok(Self::Llc),
            "licenses" => Ok(Self::Licenses),
            "banking" => Ok(Self::Banking),
            other => Err(ValidationError::UnknownFormKind(other.to_string())),
        }
    }
}

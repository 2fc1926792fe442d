//! # Jurisdiction Codes
//!
//! [`StateCode`] is the closed set of U.S. jurisdictions a business can be
//! formed in: the 50 states, the District of Columbia, and the five
//! inhabited territories. It is the key for every per-state reference table.
//!
//! ## Validation
//!
//! Parsing trims surrounding whitespace and is case-insensitive (`" ca "`
//! parses to [`StateCode::Ca`]). The wire form is always the two-letter
//! uppercase abbreviation. Deserialization routes through the same parser,
//! so an unknown code is rejected at the boundary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

macro_rules! state_codes {
    ($( $variant:ident => ($abbr:literal, $name:literal) ),+ $(,)?) => {
        /// A U.S. state, the District of Columbia, or an inhabited territory.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StateCode {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl StateCode {
            /// All jurisdictions: the states in dropdown order, then DC,
            /// then the territories.
            pub fn all() -> &'static [StateCode] {
                &[$(Self::$variant),+]
            }

            /// Two-letter postal abbreviation (`"CA"`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $abbr,)+
                }
            }

            /// Full display name (`"California"`).
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for StateCode {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase();
                match normalized.as_str() {
                    $($abbr => Ok(Self::$variant),)+
                    _ => Err(ValidationError::UnknownStateCode(s.to_string())),
                }
            }
        }
    };
}

state_codes! {
    Al => ("AL", "Alabama"),
    Ak => ("AK", "Alaska"),
    Az => ("AZ", "Arizona"),
    Ar => ("AR", "Arkansas"),
    Ca => ("CA", "California"),
    Co => ("CO", "Colorado"),
    Ct => ("CT", "Connecticut"),
    De => ("DE", "Delaware"),
    Fl => ("FL", "Florida"),
    Ga => ("GA", "Georgia"),
    Hi => ("HI", "Hawaii"),
    Id => ("ID", "Idaho"),
    Il => ("IL", "Illinois"),
    In => ("IN", "Indiana"),
    Ia => ("IA", "Iowa"),
    Ks => ("KS", "Kansas"),
    Ky => ("KY", "Kentucky"),
    La => ("LA", "Louisiana"),
    Me => ("ME", "Maine"),
    Md => ("MD", "Maryland"),
    Ma => ("MA", "Massachusetts"),
    Mi => ("MI", "Michigan"),
    Mn => ("MN", "Minnesota"),
    Ms => ("MS", "Mississippi"),
    Mo => ("MO", "Missouri"),
    Mt => ("MT", "Montana"),
    Ne => ("NE", "Nebraska"),
    Nv => ("NV", "Nevada"),
    Nh => ("NH", "New Hampshire"),
    Nj => ("NJ", "New Jersey"),
    Nm => ("NM", "New Mexico"),
    Ny => ("NY", "New York"),
    Nc => ("NC", "North Carolina"),
    Nd => ("ND", "North Dakota"),
    Oh => ("OH", "Ohio"),
    Ok => ("OK", "Oklahoma"),
    Or => ("OR", "Oregon"),
    Pa => ("PA", "Pennsylvania"),
    Ri => ("RI", "Rhode Island"),
    Sc => ("SC", "South Carolina"),
    Sd => ("SD", "South Dakota"),
    Tn => ("TN", "Tennessee"),
    Tx => ("TX", "Texas"),
    Ut => ("UT", "Utah"),
    Vt => ("VT", "Vermont"),
    Va => ("VA", "Virginia"),
    Wa => ("WA", "Washington"),
    Wv => ("WV", "West Virginia"),
    Wi => ("WI", "Wisconsin"),
    Wy => ("WY", "Wyoming"),
    Dc => ("DC", "District of Columbia"),
    Pr => ("PR", "Puerto Rico"),
    Gu => ("GU", "Guam"),
    Vi => ("VI", "U.S. Virgin Islands"),
    As => ("AS", "American Samoa"),
    Mp => ("MP", "Northern Mariana Islands"),
}

/// Number of jurisdictions: 50 states, DC, and 5 territories.
pub const STATE_CODE_COUNT: usize = 56;

impl StateCode {
    /// Whether this jurisdiction is one of the 50 states.
    pub fn is_state(&self) -> bool {
        !matches!(
            self,
            Self::Dc | Self::Pr | Self::Gu | Self::Vi | Self::As | Self::Mp
        )
    }

    /// Lowercase abbreviation, used when building `https://{code}.gov` links.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StateCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_count() {
        assert_eq!(StateCode::all().len(), STATE_CODE_COUNT);
        assert_eq!(StateCode::all().iter().filter(|s| s.is_state()).count(), 50);
    }

    #[test]
    fn test_all_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in StateCode::all() {
            assert!(seen.insert(code.as_str()), "Duplicate code: {code}");
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for code in StateCode::all() {
            let parsed: StateCode = code.as_str().parse().unwrap();
            assert_eq!(*code, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" ca ".parse::<StateCode>().unwrap(), StateCode::Ca);
        assert_eq!("ny".parse::<StateCode>().unwrap(), StateCode::Ny);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("".parse::<StateCode>().is_err());
        assert!("XX".parse::<StateCode>().is_err());
        assert!("California".parse::<StateCode>().is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(StateCode::Ca.name(), "California");
        assert_eq!(StateCode::Dc.name(), "District of Columbia");
        assert_eq!(StateCode::Ny.to_lowercase(), "ny");
    }

    #[test]
    fn test_serde_uses_abbreviation() {
        let json = serde_json::to_string(&StateCode::Tx).unwrap();
        assert_eq!(json, "\"TX\"");
        let parsed: StateCode = serde_json::from_str("\"tx\"").unwrap();
        assert_eq!(parsed, StateCode::Tx);
        assert!(serde_json::from_str::<StateCode>("\"ZZ\"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_two_letter_parse_matches_table(s in "[A-Za-z]{2}") {
            let known = StateCode::all()
                .iter()
                .any(|c| c.as_str().eq_ignore_ascii_case(&s));
            proptest::prop_assert_eq!(s.parse::<StateCode>().is_ok(), known);
        }
    }
}

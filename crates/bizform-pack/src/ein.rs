//! # EIN Options
//!
//! Choices offered by the EIN worksheet. The worksheet never files
//! anything; the user completes the real application on the IRS site.

/// IRS page where an EIN is actually obtained.
pub const IRS_EIN_URL: &str =
    "https://www.irs.gov/businesses/small-businesses-self-employed/get-an-employer-identification-number";

/// Entity types listed in the worksheet's business-type picker.
pub fn ein_entity_types() -> &'static [&'static str] {
    &[
        "Sole Proprietorship",
        "Partnership",
        "Corporation",
        "LLC",
        "Non-Profit Organization",
        "Estate",
        "Trust",
        "Other",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_types_end_with_other() {
        let types = ein_entity_types();
        assert_eq!(types.len(), 8);
        assert_eq!(types.last(), Some(&"Other"));
        assert!(types.contains(&"LLC"));
    }

    #[test]
    fn irs_link_is_https() {
        assert!(IRS_EIN_URL.starts_with("https://www.irs.gov/"));
    }
}

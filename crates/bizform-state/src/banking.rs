//! # Banking Comparison Controller
//!
//! Holds a ZIP code and the business checking products found for it.

use serde::{Deserialize, Serialize};

use bizform_core::FormKind;
use bizform_pack::BankOption;
use bizform_resolver::BankDirectory;

use crate::controller::{FormController, FormError};
use crate::notice::Notice;

/// Required ZIP length before a bank search runs.
const ZIP_LEN: usize = 5;

/// The banking comparison worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankingLookup {
    pub zip_code: String,
    pub bank_results: Vec<BankOption>,
}

/// Edits to the banking comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BankingEvent {
    ZipChanged { zip: String },
}

/// State machine for the banking comparison.
#[derive(Debug, Clone, Default)]
pub struct BankingController {
    record: BankingLookup,
}

impl BankingController {
    /// Search banks for the current ZIP code.
    pub fn search(&mut self, directory: &dyn BankDirectory) -> Notice {
        if self.record.zip_code.chars().count() != ZIP_LEN {
            return Notice::warning("Invalid ZIP Code", "Please enter a valid 5-digit ZIP code.");
        }

        match directory.search(&self.record.zip_code) {
            Ok(banks) => {
                let count = banks.len();
                self.record.bank_results = banks;
                Notice::info(
                    "Banks Found",
                    format!("Found {count} business banking options in your area."),
                )
            }
            Err(err) => {
                tracing::warn!(
                    provider = directory.provider_name(),
                    error = %err,
                    "bank search failed"
                );
                Notice::error(
                    "Search Failed",
                    "Could not retrieve banking options. Please try again.",
                )
            }
        }
    }
}

impl FormController for BankingController {
    type Record = BankingLookup;
    type Event = BankingEvent;

    const KIND: FormKind = FormKind::Banking;

    fn from_record(record: BankingLookup) -> Self {
        Self { record }
    }

    fn record(&self) -> &BankingLookup {
        &self.record
    }

    fn apply(&mut self, event: BankingEvent) -> Result<Option<Notice>, FormError> {
        match event {
            BankingEvent::ZipChanged { zip } => self.record.zip_code = zip,
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizform_resolver::{ProviderError, StaticBankDirectory};

    struct DownDirectory;

    impl BankDirectory for DownDirectory {
        fn search(&self, _zip: &str) -> Result<Vec<BankOption>, ProviderError> {
            Err(ProviderError::Unavailable {
                reason: "maintenance".into(),
            })
        }

        fn provider_name(&self) -> &str {
            "DownDirectory"
        }
    }

    fn with_zip(zip: &str) -> BankingController {
        let mut c = BankingController::new();
        c.apply(BankingEvent::ZipChanged { zip: zip.into() }).unwrap();
        c
    }

    #[test]
    fn short_zip_is_rejected() {
        let mut c = with_zip("1000");
        let notice = c.search(&StaticBankDirectory);
        assert_eq!(notice.title, "Invalid ZIP Code");
        assert!(c.record().bank_results.is_empty());
    }

    #[test]
    fn search_stores_results() {
        let mut c = with_zip("10001");
        let notice = c.search(&StaticBankDirectory);
        assert_eq!(notice.title, "Banks Found");
        assert_eq!(notice.message, "Found 10 business banking options in your area.");
        assert_eq!(c.record().bank_results.len(), 10);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut c = with_zip("10001");
        c.search(&StaticBankDirectory);
        let notice = c.search(&DownDirectory);
        assert!(notice.is_error());
        assert_eq!(c.record().bank_results.len(), 10);
    }
}

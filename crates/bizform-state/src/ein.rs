//! # EIN Worksheet Controller
//!
//! Collects the answers the IRS asks for so the user can complete the real
//! application at [`bizform_pack::IRS_EIN_URL`]. Nothing is filed from here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bizform_core::FormKind;

use crate::controller::{unknown_field, FormController, FormError};
use crate::llc::parse_date;
use crate::notice::Notice;

/// The EIN worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinApplication {
    pub business_name: String,
    /// Entity type label, one of [`bizform_pack::ein_entity_types`] in practice.
    pub business_type: String,
    pub responsible_party_name: String,
    pub responsible_party_ssn: String,
    pub business_address: String,
    pub business_city: String,
    pub business_state: String,
    pub business_zip: String,
    pub mailing_address: String,
    pub business_purpose: String,
    pub start_date: Option<NaiveDate>,
    pub employees_expected: u32,
    pub banking_info: String,
    pub federal_tax_deposits: String,
    pub business_activity_code: String,
}

/// Edits to the EIN worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EinEvent {
    SetField { field: String, value: String },
}

/// State machine for the EIN worksheet.
#[derive(Debug, Clone, Default)]
pub struct EinController {
    record: EinApplication,
}

impl EinController {
    fn set_field(&mut self, field: &str, value: String) -> Result<(), FormError> {
        let r = &mut self.record;
        match field {
            "business_name" => r.business_name = value,
            "business_type" => r.business_type = value,
            "responsible_party_name" => r.responsible_party_name = value,
            "responsible_party_ssn" => r.responsible_party_ssn = value,
            "business_address" => r.business_address = value,
            "business_city" => r.business_city = value,
            "business_state" => r.business_state = value,
            "business_zip" => r.business_zip = value,
            "mailing_address" => r.mailing_address = value,
            "business_purpose" => r.business_purpose = value,
            "start_date" => r.start_date = parse_date(&value),
            "employees_expected" => r.employees_expected = value.trim().parse().unwrap_or(0),
            "banking_info" => r.banking_info = value,
            "federal_tax_deposits" => r.federal_tax_deposits = value,
            "business_activity_code" => r.business_activity_code = value,
            other => return Err(unknown_field(FormKind::Ein, other)),
        }
        Ok(())
    }
}

impl FormController for EinController {
    type Record = EinApplication;
    type Event = EinEvent;

    const KIND: FormKind = FormKind::Ein;

    fn from_record(record: EinApplication) -> Self {
        Self { record }
    }

    fn record(&self) -> &EinApplication {
        &self.record
    }

    fn apply(&mut self, event: EinEvent) -> Result<Option<Notice>, FormError> {
        match event {
            EinEvent::SetField { field, value } => self.set_field(&field, value)?,
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(c: &mut EinController, field: &str, value: &str) {
        c.apply(EinEvent::SetField {
            field: field.into(),
            value: value.into(),
        })
        .unwrap();
    }

    #[test]
    fn employees_expected_coerces_to_zero() {
        let mut c = EinController::new();
        set(&mut c, "employees_expected", "12");
        assert_eq!(c.record().employees_expected, 12);
        set(&mut c, "employees_expected", "a dozen");
        assert_eq!(c.record().employees_expected, 0);
        set(&mut c, "employees_expected", "-3");
        assert_eq!(c.record().employees_expected, 0);
    }

    #[test]
    fn text_fields_overwrite() {
        let mut c = EinController::new();
        set(&mut c, "business_name", "Acme");
        set(&mut c, "business_type", "LLC");
        set(&mut c, "responsible_party_ssn", "123-45-6789");
        assert_eq!(c.record().business_name, "Acme");
        assert_eq!(c.record().business_type, "LLC");
        assert_eq!(c.record().responsible_party_ssn, "123-45-6789");
    }

    #[test]
    fn start_date() {
        let mut c = EinController::new();
        set(&mut c, "start_date", "2024-07-04");
        assert_eq!(c.record().start_date, NaiveDate::from_ymd_opt(2024, 7, 4));
        let payload = c.payload().unwrap();
        assert_eq!(payload["start_date"], "2024-07-04");
    }

    #[test]
    fn unknown_field() {
        let mut c = EinController::new();
        let err = c
            .apply(EinEvent::SetField {
                field: "ein".into(),
                value: "12-3456789".into(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("ein form"));
    }

    #[test]
    fn partial_payload_loads_with_defaults() {
        let record: EinApplication =
            serde_json::from_value(serde_json::json!({"business_name": "Acme"})).unwrap();
        assert_eq!(record.business_name, "Acme");
        assert_eq!(record.employees_expected, 0);
        assert!(record.start_date.is_none());
    }
}

//! # LLC Formation Controller
//!
//! Drives the LLC articles worksheet. The interesting part is jurisdiction
//! detection: typing a ZIP code resolves a state, and when a new state is
//! detected the controller overwrites `business_state` and takes a snapshot
//! of that state's [`JurisdictionProfile`] so the view can show filing fees
//! and special requirements.
//!
//! ## Detection Rules
//!
//! - A detected state that differs from the previously detected one
//!   overwrites the state and the snapshot and yields a "State Detected"
//!   notice. A state without a profile clears the snapshot.
//! - Re-detecting the same state does nothing, so an explicit selection
//!   made after detection survives further edits within the same prefix.
//! - A ZIP that resolves to nothing leaves the state and snapshot as they
//!   were. The last detected state stays recorded.
//! - An explicit selection replaces the snapshot silently and does not
//!   touch the last detected state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bizform_core::{FormKind, StateCode};
use bizform_pack::JurisdictionProfile;
use bizform_resolver::{resolve_jurisdiction_profile, resolve_state_from_zip};

use crate::controller::{unknown_field, FormController, FormError};
use crate::notice::Notice;

// ─── Record ──────────────────────────────────────────────────────────

/// How the LLC is managed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagementStructure {
    #[default]
    MemberManaged,
    ManagerManaged,
}

impl ManagementStructure {
    /// Parse the wire key; anything unrecognized is the default.
    pub fn from_key_or_default(key: &str) -> Self {
        match key.trim() {
            "manager-managed" => Self::ManagerManaged,
            _ => Self::MemberManaged,
        }
    }
}

/// How long the LLC exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LlcDuration {
    #[default]
    Perpetual,
    Specific,
}

impl LlcDuration {
    /// Parse the wire key; anything unrecognized is the default.
    pub fn from_key_or_default(key: &str) -> Self {
        match key.trim() {
            "specific" => Self::Specific,
            _ => Self::Perpetual,
        }
    }
}

/// A named person or company with an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: String,
    pub address: String,
}

/// The LLC formation worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlcApplication {
    pub llc_name: String,
    pub business_purpose: String,
    pub business_address: String,
    pub business_city: String,
    pub business_state: Option<StateCode>,
    pub business_zip: String,
    pub registered_agent: Party,
    pub organizer: Party,
    pub management_structure: ManagementStructure,
    /// At least one entry while editing; blanks are dropped on save.
    pub member_names: Vec<String>,
    pub duration: LlcDuration,
    pub effective_date: Option<NaiveDate>,
    /// Copy of the profile taken when the state was detected or selected.
    pub jurisdiction: Option<JurisdictionProfile>,
}

impl Default for LlcApplication {
    fn default() -> Self {
        Self {
            llc_name: String::new(),
            business_purpose: String::new(),
            business_address: String::new(),
            business_city: String::new(),
            business_state: None,
            business_zip: String::new(),
            registered_agent: Party::default(),
            organizer: Party::default(),
            management_structure: ManagementStructure::default(),
            member_names: vec![String::new()],
            duration: LlcDuration::default(),
            effective_date: None,
            jurisdiction: None,
        }
    }
}

// ─── Events ──────────────────────────────────────────────────────────

/// Edits to the LLC worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlcEvent {
    /// Overwrite one text field. `business_zip` and `business_state` are
    /// routed to [`LlcEvent::ZipChanged`] and [`LlcEvent::SelectState`].
    SetField { field: String, value: String },
    /// The ZIP code changed.
    ZipChanged { zip: String },
    /// The user picked a state from the dropdown.
    SelectState { state: Option<StateCode> },
    /// Append an empty member entry.
    AddMember,
    /// Rename the member at `index`.
    UpdateMember { index: usize, name: String },
    /// Remove the member at `index`.
    RemoveMember { index: usize },
}

/// Parse `YYYY-MM-DD`; blank or malformed input is absent.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

// ─── Controller ──────────────────────────────────────────────────────

/// State machine for the LLC worksheet.
#[derive(Debug, Clone)]
pub struct LlcController {
    record: LlcApplication,
    last_detected: Option<StateCode>,
}

impl LlcController {
    /// The state most recently detected from the ZIP code.
    pub fn last_detected(&self) -> Option<StateCode> {
        self.last_detected
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<Option<Notice>, FormError> {
        let r = &mut self.record;
        match field {
            "llc_name" => r.llc_name = value,
            "business_purpose" => r.business_purpose = value,
            "business_address" => r.business_address = value,
            "business_city" => r.business_city = value,
            "business_zip" => return Ok(self.zip_changed(value)),
            "business_state" => {
                self.select_state(value.parse().ok());
                return Ok(None);
            }
            "registered_agent_name" => r.registered_agent.name = value,
            "registered_agent_address" => r.registered_agent.address = value,
            "organizer_name" => r.organizer.name = value,
            "organizer_address" => r.organizer.address = value,
            "management_structure" => {
                r.management_structure = ManagementStructure::from_key_or_default(&value)
            }
            "duration" => r.duration = LlcDuration::from_key_or_default(&value),
            "effective_date" => r.effective_date = parse_date(&value),
            other => return Err(unknown_field(FormKind::Llc, other)),
        }
        Ok(None)
    }

    fn zip_changed(&mut self, zip: String) -> Option<Notice> {
        let detected = resolve_state_from_zip(&zip);
        self.record.business_zip = zip;

        let state = detected?;
        if self.last_detected == Some(state) {
            return None;
        }
        self.last_detected = Some(state);
        self.record.business_state = Some(state);
        self.record.jurisdiction = resolve_jurisdiction_profile(state).cloned();
        tracing::debug!(state = %state, has_profile = self.record.jurisdiction.is_some(), "state detected from zip");

        Some(Notice::info(
            "State Detected",
            format!(
                "Your business is in {}. State-specific requirements have been loaded.",
                state.name()
            ),
        ))
    }

    fn select_state(&mut self, state: Option<StateCode>) {
        self.record.business_state = state;
        self.record.jurisdiction = state.and_then(resolve_jurisdiction_profile).cloned();
    }

    fn check_index(&self, index: usize) -> Result<(), FormError> {
        let len = self.record.member_names.len();
        if index >= len {
            return Err(FormError::MemberIndexOutOfRange { index, len });
        }
        Ok(())
    }
}

impl FormController for LlcController {
    type Record = LlcApplication;
    type Event = LlcEvent;

    const KIND: FormKind = FormKind::Llc;

    fn from_record(mut record: LlcApplication) -> Self {
        if record.member_names.is_empty() {
            record.member_names.push(String::new());
        }
        let last_detected = resolve_state_from_zip(&record.business_zip);
        Self {
            record,
            last_detected,
        }
    }

    fn record(&self) -> &LlcApplication {
        &self.record
    }

    fn apply(&mut self, event: LlcEvent) -> Result<Option<Notice>, FormError> {
        match event {
            LlcEvent::SetField { field, value } => self.set_field(&field, value),
            LlcEvent::ZipChanged { zip } => Ok(self.zip_changed(zip)),
            LlcEvent::SelectState { state } => {
                self.select_state(state);
                Ok(None)
            }
            LlcEvent::AddMember => {
                self.record.member_names.push(String::new());
                Ok(None)
            }
            LlcEvent::UpdateMember { index, name } => {
                self.check_index(index)?;
                self.record.member_names[index] = name;
                Ok(None)
            }
            LlcEvent::RemoveMember { index } => {
                self.check_index(index)?;
                self.record.member_names.remove(index);
                if self.record.member_names.is_empty() {
                    self.record.member_names.push(String::new());
                }
                Ok(None)
            }
        }
    }

    /// The record with blank member names dropped.
    fn payload(&self) -> Result<serde_json::Value, FormError> {
        let mut record = self.record.clone();
        record.member_names.retain(|name| !name.trim().is_empty());
        Ok(serde_json::to_value(record)?)
    }
}

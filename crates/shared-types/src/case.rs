use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Case type ───────────────────────────────────────────────────────

/// Insolvency appointment type. Diary templates are scoped to exactly one
/// of these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CaseType {
    Administration,
    #[serde(rename = "CVL")]
    Cvl,
    #[serde(rename = "MVL")]
    Mvl,
    #[serde(rename = "CWU")]
    Cwu,
    Moratoriums,
    Receiverships,
    #[serde(rename = "CVA")]
    Cva,
    #[serde(rename = "IVA")]
    Iva,
    #[serde(rename = "BKR")]
    Bkr,
    Advisory,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administration => "Administration",
            Self::Cvl => "CVL",
            Self::Mvl => "MVL",
            Self::Cwu => "CWU",
            Self::Moratoriums => "Moratoriums",
            Self::Receiverships => "Receiverships",
            Self::Cva => "CVA",
            Self::Iva => "IVA",
            Self::Bkr => "BKR",
            Self::Advisory => "Advisory",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Reference-point fields ──────────────────────────────────────────

/// The named date fields on a case that diary entries anchor to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaseDateField {
    AppointmentDate,
    BoardMeetingDate,
    BoardResolutionPassedDate,
    MembersMeetingDate,
    DateOfMembersResolutions,
    CreditorsDecisionsDate,
    CreditorsDecisionPassedDate,
    SubsequentDecisionPassedDate,
}

// ── Case record ─────────────────────────────────────────────────────

/// An insolvency case record, read-mostly from the engine's point of view.
/// The date fields are the reference points diary deadlines are computed
/// against; any of them may be unset until the corresponding event occurs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsolvencyCase {
    pub id: Uuid,
    pub case_name: String,
    pub case_type: CaseType,
    pub appointment_date: Option<NaiveDate>,
    pub board_meeting_date: Option<NaiveDate>,
    pub board_resolution_passed_date: Option<NaiveDate>,
    pub members_meeting_date: Option<NaiveDate>,
    pub date_of_members_resolutions: Option<NaiveDate>,
    pub creditors_decisions_date: Option<NaiveDate>,
    pub creditors_decision_passed_date: Option<NaiveDate>,
    pub subsequent_decision_passed_date: Option<NaiveDate>,
    /// Set once diary entries have been generated; guards regeneration.
    pub diary_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InsolvencyCase {
    /// Single access point for reference-point fields.
    pub fn date_field(&self, field: CaseDateField) -> Option<NaiveDate> {
        match field {
            CaseDateField::AppointmentDate => self.appointment_date,
            CaseDateField::BoardMeetingDate => self.board_meeting_date,
            CaseDateField::BoardResolutionPassedDate => self.board_resolution_passed_date,
            CaseDateField::MembersMeetingDate => self.members_meeting_date,
            CaseDateField::DateOfMembersResolutions => self.date_of_members_resolutions,
            CaseDateField::CreditorsDecisionsDate => self.creditors_decisions_date,
            CaseDateField::CreditorsDecisionPassedDate => self.creditors_decision_passed_date,
            CaseDateField::SubsequentDecisionPassedDate => self.subsequent_decision_passed_date,
        }
    }
}

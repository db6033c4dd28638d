//! Domain models for the session ledger and scenario catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recognized simulated-attack step a user can trigger.
///
/// Each variant maps to exactly one flag column of the `user_actions`
/// table. Wire strings that match no variant are handled explicitly as a
/// no-op by the ledger, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// The user clicked the link in the phishing email
    EmailClick,
    /// The user submitted credentials on the fake login page
    FormSubmit,
    /// The user attempted the wire transfer in the CEO-fraud scenario
    CeoTransferAttempt,
    /// The user downloaded the "support tool" in the tech-support scam
    TechSupportAttempt,
    /// The user followed through on a voice-phishing prompt
    VishingAttempt,
    /// The user scanned a fraudulent QR code
    QuishingAttempt,
}

impl ActionKind {
    /// Parse the wire form of an action kind. Returns `None` for
    /// unrecognized input.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "email_click" => Some(Self::EmailClick),
            "form_submit" => Some(Self::FormSubmit),
            "ceo_transfer_attempt" => Some(Self::CeoTransferAttempt),
            "tech_support_attempt" => Some(Self::TechSupportAttempt),
            "vishing_attempt" => Some(Self::VishingAttempt),
            "quishing_attempt" => Some(Self::QuishingAttempt),
            _ => None,
        }
    }

    /// Wire form of this action kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailClick => "email_click",
            Self::FormSubmit => "form_submit",
            Self::CeoTransferAttempt => "ceo_transfer_attempt",
            Self::TechSupportAttempt => "tech_support_attempt",
            Self::VishingAttempt => "vishing_attempt",
            Self::QuishingAttempt => "quishing_attempt",
        }
    }

    /// Column of the `user_actions` table this kind sets
    pub(crate) fn column(&self) -> &'static str {
        match self {
            Self::EmailClick => "email_clicked",
            Self::FormSubmit => "login_submitted",
            Self::CeoTransferAttempt => "ceo_attempt",
            Self::TechSupportAttempt => "tech_support_attempt",
            Self::VishingAttempt => "vishing_attempt",
            Self::QuishingAttempt => "quishing_attempt",
        }
    }
}

/// Per-session ledger state: which steps this session has triggered
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionStats {
    pub email_clicked: bool,
    pub login_submitted: bool,
    pub ceo_attempt: bool,
    pub tech_support_attempt: bool,
    pub vishing_attempt: bool,
    pub quishing_attempt: bool,
    pub flags_identified: i64,
    pub last_active: DateTime<Utc>,
}

/// Response body for the stats endpoint
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub email_clicked: bool,
    pub login_submitted: bool,
    pub flags_identified: i64,
}

impl From<Option<SessionStats>> for StatsResponse {
    /// An absent record serializes as all-false/zero; callers that need to
    /// distinguish absence branch on the `Option` before converting.
    fn from(stats: Option<SessionStats>) -> Self {
        match stats {
            Some(stats) => Self {
                email_clicked: stats.email_clicked,
                login_submitted: stats.login_submitted,
                flags_identified: stats.flags_identified,
            },
            None => Self {
                email_clicked: false,
                login_submitted: false,
                flags_identified: 0,
            },
        }
    }
}

/// A training scenario from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub difficulty: String,
}

use std::fmt;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use standard_error::{StandardError, Status};

use crate::prelude::Result;

/// Workflow state of a lead. Closed set; anything else is rejected at the
/// boundary rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lead_state")]
pub enum LeadState {
    #[sqlx(rename = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
    #[sqlx(rename = "REACHED_OUT")]
    #[serde(rename = "REACHED_OUT")]
    ReachedOut,
}

impl LeadState {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "PENDING" => Ok(LeadState::Pending),
            "REACHED_OUT" => Ok(LeadState::ReachedOut),
            other => Err(StandardError::new(&format!(
                "ERR-VALIDATION-003: unknown lead state '{}', expected PENDING or REACHED_OUT",
                other
            ))
            .code(StatusCode::BAD_REQUEST)),
        }
    }
}

impl fmt::Display for LeadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeadState::Pending => "PENDING",
            LeadState::ReachedOut => "REACHED_OUT",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeadEntry {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub resume_path: String,
    pub state: LeadState,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<i32>,
}

/// Detail view joining the name of the reviewer who last touched the lead.
/// The reference is weak; a removed reviewer renders as no name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeadWithReviewer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub resume_path: String,
    pub state: LeadState,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<i32>,
    pub reviewer_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_states() {
        assert_eq!(LeadState::parse("PENDING").unwrap(), LeadState::Pending);
        assert_eq!(
            LeadState::parse("REACHED_OUT").unwrap(),
            LeadState::ReachedOut
        );
    }

    #[test]
    fn test_parse_rejects_unknown_state() {
        assert!(LeadState::parse("BOGUS").is_err());
        assert!(LeadState::parse("pending").is_err());
        assert!(LeadState::parse("").is_err());
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(LeadState::Pending.to_string(), "PENDING");
        assert_eq!(LeadState::ReachedOut.to_string(), "REACHED_OUT");
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&LeadState::ReachedOut).unwrap();
        assert_eq!(json, r#""REACHED_OUT""#);
        let state: LeadState = serde_json::from_str(r#""PENDING""#).unwrap();
        assert_eq!(state, LeadState::Pending);
    }
}

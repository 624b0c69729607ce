use std::time::Duration;

use axum::http::StatusCode;
use serde::Deserialize;
use standard_error::{StandardError, Status};
use validator::Validate;

use crate::conf::settings;
use crate::pkg::internal::adaptors::leads::mutators::{CreateLeadData, LeadMutator};
use crate::pkg::internal::adaptors::leads::spec::{LeadEntry, LeadState};
use crate::pkg::internal::auth::User;
use crate::pkg::internal::email::confirmation::ProspectConfirmation;
use crate::pkg::internal::email::notification::ReviewerNotification;
use crate::pkg::internal::email::{EmailAttachment, SendEmail};
use crate::pkg::internal::uploads;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::Result;

const MAX_CREATE_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Validate)]
pub struct LeadSubmission {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "a resume file is required"))]
    pub resume_filename: String,
    #[validate(length(min = 1, message = "the resume file is empty"))]
    pub resume_content: Vec<u8>,
}

/// Partial update from a reviewer. `state` is validated against the closed
/// enum; `notes: Some("")` clears stored notes while `None` leaves them be.
#[derive(Debug, Deserialize)]
pub struct LeadPatch {
    pub state: Option<String>,
    pub notes: Option<String>,
}

/// Accepts a submission: validate, persist the resume file, insert the lead
/// with bounded retries, then fire the two best-effort emails. The lead only
/// exists if the insert committed; the file only survives if the lead does.
pub async fn submit(state: &AppState, submission: LeadSubmission) -> Result<LeadEntry> {
    submission.validate().map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION-001: {}", e)).code(StatusCode::BAD_REQUEST)
    })?;
    let ext =
        uploads::validate_extension(&submission.resume_filename, &settings.allowed_extensions())?;

    let stored_name = uploads::store_resume(&ext, &submission.resume_content).await?;

    let mut attempt = 0;
    let lead = loop {
        attempt += 1;
        match create_lead(state, &submission, &stored_name).await {
            Ok(lead) => break lead,
            Err(e) if attempt < MAX_CREATE_ATTEMPTS => {
                tracing::error!("database error on attempt {}: {}", attempt, e);
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                tracing::error!("giving up on lead insert after {} attempts: {}", attempt, e);
                uploads::remove_resume(&stored_name).await;
                return Err(StandardError::new(
                    "ERR-LEAD-001: your application couldn't be processed at this time, please try again later",
                )
                .code(StatusCode::SERVICE_UNAVAILABLE));
            }
        }
    };
    tracing::info!("lead created successfully for {}", &lead.email);

    send_submission_emails(&lead, &ext).await;
    Ok(lead)
}

async fn create_lead(
    state: &AppState,
    submission: &LeadSubmission,
    stored_name: &str,
) -> Result<LeadEntry> {
    let mut tx = state.db_pool.begin_txn().await?;
    let lead = LeadMutator::new(&mut tx)
        .create(CreateLeadData {
            first_name: submission.first_name.clone(),
            last_name: submission.last_name.clone(),
            email: submission.email.clone(),
            resume_path: stored_name.to_string(),
        })
        .await?;
    tx.commit().await?;
    Ok(lead)
}

async fn send_submission_emails(lead: &LeadEntry, ext: &str) {
    let confirmation = ProspectConfirmation {
        first_name: &lead.first_name,
        last_name: &lead.last_name,
        company_name: &settings.company_name,
    };
    if let Err(e) = confirmation.send(&lead.email) {
        tracing::warn!("failed to send confirmation email to {}: {}", lead.email, e);
    }

    let attachment = match tokio::fs::read(uploads::disk_path(&lead.resume_path)).await {
        Ok(content) => Some(EmailAttachment {
            filename: lead.resume_path.clone(),
            content,
            content_type: uploads::mime_type(ext).to_string(),
        }),
        Err(e) => {
            tracing::warn!("failed to attach resume {}: {}", lead.resume_path, e);
            None
        }
    };
    let dashboard_url = format!("{}/dashboard", settings.base_url);
    let notification = ReviewerNotification {
        first_name: &lead.first_name,
        last_name: &lead.last_name,
        prospect_email: &lead.email,
        dashboard_url: &dashboard_url,
        attachment,
    };
    if let Err(e) = notification.send(&settings.reviewer_email) {
        tracing::warn!("failed to send reviewer notification: {}", e);
    }
}

/// Applies a reviewer's state/notes patch atomically and stamps the lead
/// with the reviewer and a fresh `updated_at`.
pub async fn update(
    state: &AppState,
    lead_id: i32,
    reviewer: &User,
    patch: LeadPatch,
) -> Result<LeadEntry> {
    let new_state = match patch.state.as_deref() {
        Some(value) => Some(LeadState::parse(value)?),
        None => None,
    };

    let mut tx = state.db_pool.begin_txn().await?;
    let lead = LeadMutator::new(&mut tx)
        .update(lead_id, new_state, patch.notes, reviewer.id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-LEAD-404: lead not found").code(StatusCode::NOT_FOUND)
        })?;
    tx.commit().await?;

    tracing::info!("lead {} updated by {}", lead.id, &reviewer.email);
    Ok(lead)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> LeadSubmission {
        LeadSubmission {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            resume_filename: "cv.pdf".into(),
            resume_content: b"%PDF-1.4".to_vec(),
        }
    }

    #[test]
    fn test_valid_submission_passes_validation() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut s = submission();
        s.first_name = "".into();
        assert!(s.validate().is_err());

        let mut s = submission();
        s.last_name = "".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut s = submission();
        s.email = "not-an-email".into();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_missing_resume_rejected() {
        let mut s = submission();
        s.resume_filename = "".into();
        assert!(s.validate().is_err());

        let mut s = submission();
        s.resume_content = Vec::new();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_patch_distinguishes_absent_from_empty_notes() {
        let patch: LeadPatch = serde_json::from_str(r#"{"state": "REACHED_OUT"}"#).unwrap();
        assert!(patch.notes.is_none());

        let patch: LeadPatch = serde_json::from_str(r#"{"notes": ""}"#).unwrap();
        assert_eq!(patch.notes.as_deref(), Some(""));

        let patch: LeadPatch =
            serde_json::from_str(r#"{"notes": "Called, left voicemail"}"#).unwrap();
        assert_eq!(patch.notes.as_deref(), Some("Called, left voicemail"));
    }
}

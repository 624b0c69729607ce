use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Multipart, Path as AxumPath, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use standard_error::{Interpolate, StandardError, Status};

use crate::{
    pkg::{
        internal::{
            adaptors::leads::{
                selectors::LeadSelector,
                spec::{LeadEntry, LeadState},
            },
            auth::User,
            intake::{self, LeadPatch, LeadSubmission},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct LeadFilter {
    pub state: Option<String>,
}

pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LeadEntry>> {
    let mut first_name = String::new();
    let mut last_name = String::new();
    let mut email = String::new();
    let mut resume_filename = String::new();
    let mut resume_content = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        StandardError::new(&format!("ERR-VALIDATION-004: malformed form data: {}", e))
            .code(StatusCode::BAD_REQUEST)
    })? {
        match field.name().unwrap_or("") {
            "first_name" => {
                first_name = field.text().await.map_err(|e| {
                    StandardError::new("ERR-VALIDATION-004").interpolate_err(e.to_string())
                })?;
            }
            "last_name" => {
                last_name = field.text().await.map_err(|e| {
                    StandardError::new("ERR-VALIDATION-004").interpolate_err(e.to_string())
                })?;
            }
            "email" => {
                email = field.text().await.map_err(|e| {
                    StandardError::new("ERR-VALIDATION-004").interpolate_err(e.to_string())
                })?;
            }
            "resume" => {
                resume_filename = field.file_name().unwrap_or("").to_string();
                resume_content = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        StandardError::new("ERR-VALIDATION-004").interpolate_err(e.to_string())
                    })?
                    .to_vec();
            }
            _ => {}
        }
    }

    let lead = intake::submit(
        &state,
        LeadSubmission {
            first_name,
            last_name,
            email,
            resume_filename,
            resume_content,
        },
    )
    .await?;
    Ok(Json(lead))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
    Query(filter): Query<LeadFilter>,
) -> Result<Json<Vec<LeadEntry>>> {
    let state_filter = match filter.state.as_deref() {
        Some(value) => Some(LeadState::parse(value)?),
        None => None,
    };

    let mut tx = state.db_pool.begin_txn().await?;
    let mut selector = LeadSelector::new(&mut tx);
    let leads = match state_filter {
        Some(s) => selector.get_by_state(s).await?,
        None => selector.get_all().await?,
    };
    Ok(Json(leads))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<i32>,
) -> Result<Json<LeadEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let lead = LeadSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-LEAD-404: lead not found").code(StatusCode::NOT_FOUND)
        })?;
    Ok(Json(lead))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<i32>,
    Json(patch): Json<LeadPatch>,
) -> Result<Json<LeadEntry>> {
    let lead = intake::update(&state, id, &user, patch).await?;
    Ok(Json(lead))
}

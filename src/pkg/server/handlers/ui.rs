use std::sync::Arc;

use askama::Template;
use axum::{
    Extension,
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Html,
};
use standard_error::{StandardError, Status};

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::leads::{selectors::LeadSelector, spec::LeadState},
            auth::User,
        },
        server::{
            handlers::leads::LeadFilter,
            state::{AppState, GetTxn},
            uispec::{Dashboard, LeadDetail, LeadForm, Login},
        },
    },
    prelude::Result,
};

pub async fn home() -> Result<Html<String>> {
    let template = LeadForm {
        company_name: &settings.company_name,
    };
    Ok(Html(template.render()?))
}

pub async fn login_page() -> Result<Html<String>> {
    Ok(Html(Login {}.render()?))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Query(filter): Query<LeadFilter>,
) -> Result<Html<String>> {
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

    let template = Dashboard {
        username: &user.full_name,
        leads,
        filter: filter.state.as_deref().unwrap_or(""),
    };
    Ok(Html(template.render()?))
}

pub async fn lead_detail(
    State(state): State<AppState>,
    Extension(_user): Extension<Arc<User>>,
    AxumPath(id): AxumPath<i32>,
) -> Result<Html<String>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let lead = LeadSelector::new(&mut tx)
        .get_with_reviewer(id)
        .await?
        .ok_or_else(|| {
            StandardError::new("ERR-LEAD-404: lead not found").code(StatusCode::NOT_FOUND)
        })?;
    Ok(Html(LeadDetail { lead }.render()?))
}

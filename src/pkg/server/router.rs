use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::auth::{login, logout};
use super::handlers::probes::{healthz, livez};
use super::handlers::ui::{dashboard, home, lead_detail, login_page};
use super::middlewares::authn;
use super::state::AppState;
use crate::conf::settings;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/leads", get(handlers::leads::list))
        .route(
            "/leads/{id}",
            get(handlers::leads::retrieve).patch(handlers::leads::update),
        )
        .route("/dashboard", get(dashboard))
        .route("/dashboard/leads/{id}", get(lead_detail))
        .route("/logout", post(logout))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/", get(home))
        .route("/login", get(login_page).post(login))
        .route("/submit_lead", post(handlers::leads::submit))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(DefaultBodyLimit::max(settings.max_upload_size))
        .with_state(state);

    Ok(app)
}

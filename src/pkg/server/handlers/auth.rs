use std::sync::Arc;

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    pkg::{
        internal::auth::{Session, User},
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub expiry: DateTime<Utc>,
}

pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginInput>,
) -> Result<(HeaderMap, Json<SessionResponse>)> {
    let user = User::authenticate(&state, &input.email, &input.password).await?;
    let session = Session::issue(&state, user.id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!(
            "_Host_token={}; Path=/; HttpOnly; SameSite=Lax",
            session.token
        ))?,
    );
    tracing::info!("user {} logged in", &user.email);
    Ok((
        headers,
        Json(SessionResponse {
            token: session.token,
            expiry: session.expiry,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<(HeaderMap, Json<Value>)> {
    Session::revoke(&state, user.id).await?;
    tracing::info!("user {} logged out successfully", &user.full_name);

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str("_Host_token=; Path=/; HttpOnly; Max-Age=0")?,
    );
    Ok((headers, Json(json!({"detail": "logged out"}))))
}

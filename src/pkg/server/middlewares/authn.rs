use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use standard_error::{HtmlRes, StandardError, Status};

use crate::{
    pkg::{
        internal::auth::Session,
        server::{state::AppState, uispec::Login},
    },
    prelude::Result,
};

/// One token scheme, two transports: an `Authorization: Bearer` header for
/// API clients, the `_Host_token` cookie for the dashboard.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }
    let jar = CookieJar::from_headers(headers);
    jar.get("_Host_token")
        .filter(|c| !c.value().is_empty())
        .map(|c| c.value().to_string())
}

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(token) = extract_token(&headers) {
        match Session::check_token_validity(&state, &token).await {
            Ok(user) => {
                request.extensions_mut().insert(Arc::new(user));
                return Ok(next.run(request).await);
            }
            Err(_) => {}
        }
    }
    tracing::warn!("token missing or invalid, authentication denied");
    Err(StandardError::new("ERR-AUTH-001")
        .code(StatusCode::UNAUTHORIZED)
        .template(Login {}.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc-123"));
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("_Host_token=from-cookie"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("_Host_token=from-cookie"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_or_missing_token_yields_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("_Host_token="),
        );
        assert_eq!(extract_token(&headers), None);
    }
}

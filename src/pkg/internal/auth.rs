use crate::{conf::settings, pkg::server::state::AppState, prelude::Result};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sqlx::prelude::{FromRow, Type};
use standard_error::{Interpolate, StandardError, Status};
use uuid::Uuid;

#[derive(Debug, Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Revoked,
}

#[derive(FromRow, Debug)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i32,
    pub expiry: DateTime<Utc>,
    pub status: SessionStatus,
}

#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
}

/// Row shape for the login lookup; the stored hash never leaves this module.
#[derive(FromRow, Debug)]
struct UserCredentials {
    id: i32,
    email: String,
    password: String,
    full_name: String,
    is_active: bool,
}

pub fn hash_password(password: &str) -> Result<String> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher as _, SaltString},
    };
    use rand::RngCore;

    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| StandardError::new("ERR-AUTH-004").interpolate_err(e.to_string()))?;

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StandardError::new("ERR-AUTH-004").interpolate_err(e.to_string()))?
        .to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier as _},
    };

    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

impl User {
    pub async fn create(
        state: &AppState,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Self> {
        let hash = hash_password(password)?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, password)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET full_name = $2, password = $3, is_active = TRUE
            RETURNING id, email, full_name, is_active
            "#,
        )
        .bind(email)
        .bind(full_name)
        .bind(&hash)
        .fetch_one(&*state.db_pool)
        .await?;
        Ok(user)
    }

    pub async fn retrieve(state: &AppState, id: i32) -> Result<Option<Self>> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*state.db_pool)
        .await?)
    }

    pub async fn authenticate(state: &AppState, email: &str, password: &str) -> Result<Self> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, email, password, full_name, is_active
            FROM users
            WHERE email = $1 AND is_active = TRUE
            "#,
        )
        .bind(email)
        .fetch_optional(&*state.db_pool)
        .await?;

        match creds {
            Some(creds) if verify_password(password, &creds.password) => Ok(User {
                id: creds.id,
                email: creds.email,
                full_name: creds.full_name,
                is_active: creds.is_active,
            }),
            _ => {
                tracing::warn!("failed login attempt for {}", email);
                Err(StandardError::new("ERR-AUTH-003: invalid email or password")
                    .code(StatusCode::UNAUTHORIZED))
            }
        }
    }
}

impl Session {
    pub async fn issue(state: &AppState, user_id: i32) -> Result<Self> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, expiry)
            VALUES ($1, NOW() + make_interval(mins => $2))
            RETURNING token, user_id, expiry, status
            "#,
        )
        .bind(user_id)
        .bind(settings.session_ttl_minutes)
        .fetch_one(&*state.db_pool)
        .await?;
        tracing::debug!("issued session for user {}", user_id);
        Ok(session)
    }

    pub async fn check_token_validity(state: &AppState, token_str: &str) -> Result<User> {
        let pool = &*state.db_pool;
        let token = token_str
            .parse::<Uuid>()
            .map_err(|_| StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED))?;

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, expiry, status
            FROM sessions
            WHERE token = $1
              AND status = $2
              AND expiry > now()
            "#,
        )
        .bind(token)
        .bind(SessionStatus::Active)
        .fetch_optional(pool)
        .await?;

        if let Some(session) = session {
            if let Some(user) = sqlx::query_as::<_, User>(
                "SELECT id, email, full_name, is_active FROM users WHERE id = $1 AND is_active = TRUE",
            )
            .bind(session.user_id)
            .fetch_optional(pool)
            .await?
            {
                return Ok(user);
            }
        }
        Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
    }

    pub async fn revoke(state: &AppState, user_id: i32) -> Result<()> {
        sqlx::query("UPDATE sessions SET status = $1 WHERE user_id = $2 AND status = $3")
            .bind(SessionStatus::Revoked)
            .bind(user_id)
            .bind(SessionStatus::Active)
            .execute(&*state.db_pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}

use sqlx::PgConnection;

use crate::pkg::internal::adaptors::leads::spec::{LeadEntry, LeadState, LeadWithReviewer};
use crate::prelude::Result;

pub struct LeadSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> LeadSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        LeadSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<LeadEntry>> {
        let row = sqlx::query_as::<_, LeadEntry>(
            "SELECT id, first_name, last_name, email, resume_path, state, notes, created_at, updated_at, updated_by
             FROM leads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<LeadEntry>> {
        let rows = sqlx::query_as::<_, LeadEntry>(
            "SELECT id, first_name, last_name, email, resume_path, state, notes, created_at, updated_at, updated_by
             FROM leads ORDER BY created_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_by_state(&mut self, state: LeadState) -> Result<Vec<LeadEntry>> {
        let rows = sqlx::query_as::<_, LeadEntry>(
            "SELECT id, first_name, last_name, email, resume_path, state, notes, created_at, updated_at, updated_by
             FROM leads WHERE state = $1 ORDER BY created_at DESC",
        )
        .bind(state)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_with_reviewer(&mut self, id: i32) -> Result<Option<LeadWithReviewer>> {
        let row = sqlx::query_as::<_, LeadWithReviewer>(
            r#"
            SELECT l.id, l.first_name, l.last_name, l.email, l.resume_path, l.state, l.notes,
                   l.created_at, l.updated_at, l.updated_by, u.full_name AS reviewer_name
            FROM leads l
            LEFT JOIN users u ON u.id = l.updated_by
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}

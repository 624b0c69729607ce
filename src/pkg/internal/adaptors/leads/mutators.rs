use sqlx::PgConnection;

use crate::pkg::internal::adaptors::leads::spec::{LeadEntry, LeadState};
use crate::prelude::Result;

pub struct CreateLeadData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub resume_path: String,
}

pub struct LeadMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> LeadMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        LeadMutator { pool }
    }

    pub async fn create(&mut self, lead: CreateLeadData) -> Result<LeadEntry> {
        let row = sqlx::query_as::<_, LeadEntry>(
            r#"
            INSERT INTO leads (first_name, last_name, email, resume_path, state)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, resume_path, state, notes, created_at, updated_at, updated_by
            "#,
        )
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.email)
        .bind(&lead.resume_path)
        .bind(LeadState::Pending)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Applies the provided fields in one statement. `notes` set to an empty
    /// string clears the stored notes; `None` leaves them untouched.
    pub async fn update(
        &mut self,
        id: i32,
        state: Option<LeadState>,
        notes: Option<String>,
        updated_by: i32,
    ) -> Result<Option<LeadEntry>> {
        let mut query =
            String::from("UPDATE leads SET updated_at = CURRENT_TIMESTAMP, updated_by = $2");
        let mut param_count = 2;

        if state.is_some() {
            param_count += 1;
            query.push_str(&format!(", state = ${}", param_count));
        }
        if notes.is_some() {
            param_count += 1;
            query.push_str(&format!(", notes = ${}", param_count));
        }

        query.push_str(" WHERE id = $1 RETURNING id, first_name, last_name, email, resume_path, state, notes, created_at, updated_at, updated_by");

        let mut q = sqlx::query_as::<_, LeadEntry>(&query).bind(id).bind(updated_by);

        if let Some(state) = state {
            q = q.bind(state);
        }
        if let Some(notes) = notes {
            q = q.bind(notes);
        }
        let row = q.fetch_optional(&mut *self.pool).await?;
        Ok(row)
    }
}

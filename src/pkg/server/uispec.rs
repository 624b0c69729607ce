use askama::Template;

use crate::pkg::internal::adaptors::leads::spec::{LeadEntry, LeadWithReviewer};

#[derive(Template)]
#[template(path = "lead_form.html")]
pub struct LeadForm<'a> {
    pub company_name: &'a str,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct Login {}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct Dashboard<'a> {
    pub username: &'a str,
    pub leads: Vec<LeadEntry>,
    pub filter: &'a str,
}

#[derive(Template)]
#[template(path = "lead_detail.html")]
pub struct LeadDetail {
    pub lead: LeadWithReviewer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::adaptors::leads::spec::LeadState;
    use chrono::Utc;

    fn sample_lead() -> LeadEntry {
        LeadEntry {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            resume_path: "6f9fc1f2.pdf".into(),
            state: LeadState::Pending,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            updated_by: None,
        }
    }

    #[test]
    fn test_lead_form_renders_company_name() {
        let html = LeadForm {
            company_name: "Acme Legal",
        }
        .render()
        .unwrap();
        assert!(html.contains("Acme Legal"));
    }

    #[test]
    fn test_login_page_renders() {
        assert!(Login {}.render().unwrap().contains("Reviewer login"));
    }

    #[test]
    fn test_dashboard_renders_leads_and_empty_state() {
        let html = Dashboard {
            username: "Admin User",
            leads: vec![sample_lead()],
            filter: "PENDING",
        }
        .render()
        .unwrap();
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("ada@example.com"));

        let empty = Dashboard {
            username: "Admin User",
            leads: vec![],
            filter: "",
        }
        .render()
        .unwrap();
        assert!(empty.contains("No leads yet"));
    }

    #[test]
    fn test_lead_detail_renders_notes_and_reviewer() {
        let lead = sample_lead();
        let html = LeadDetail {
            lead: LeadWithReviewer {
                id: lead.id,
                first_name: lead.first_name,
                last_name: lead.last_name,
                email: lead.email,
                resume_path: lead.resume_path,
                state: LeadState::ReachedOut,
                notes: Some("Called, left voicemail".into()),
                created_at: lead.created_at,
                updated_at: lead.updated_at,
                updated_by: Some(7),
                reviewer_name: Some("Admin User".into()),
            },
        }
        .render()
        .unwrap();
        assert!(html.contains("Called, left voicemail"));
        assert!(html.contains("Admin User"));
    }
}

use std::fmt::{self, Display};

use super::{EmailAttachment, SendEmail, send_email_with_attachment};

/// Heads-up to the reviewer inbox when a new lead lands; the resume rides
/// along as an attachment when it could be read back from disk.
pub struct ReviewerNotification<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub prospect_email: &'a str,
    pub dashboard_url: &'a str,
    pub attachment: Option<EmailAttachment>,
}

impl<'a> Display for ReviewerNotification<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let html_template = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1.0">
                <title>New Application</title>
                <style>
                    body {{
                        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
                        line-height: 1.6;
                        color: #333;
                        margin: 0;
                        padding: 0;
                    }}
                    .container {{
                        max-width: 600px;
                        margin: 0 auto;
                        padding: 20px;
                    }}
                    .lead-info {{
                        background-color: #f3f4f6;
                        padding: 15px;
                        border-radius: 6px;
                        margin: 20px 0;
                    }}
                    .button {{
                        display: inline-block;
                        padding: 12px 24px;
                        background-color: #0d9488;
                        color: white;
                        text-decoration: none;
                        border-radius: 6px;
                        margin: 20px 0;
                    }}
                </style>
            </head>
            <body>
                <div class="container">
                    <h2>New Application Submitted</h2>
                    <p>A new application has been submitted with the following details:</p>
                    <div class="lead-info">
                        <ul>
                            <li><strong>Name:</strong> {} {}</li>
                            <li><strong>Email:</strong> {}</li>
                        </ul>
                    </div>
                    <p>The applicant's resume is attached to this email. You can also view and
                    manage this application in the dashboard:</p>
                    <div style="text-align: center;">
                        <a href="{}" class="button">Open Dashboard</a>
                    </div>
                </div>
            </body>
            </html>
            "#,
            self.first_name, self.last_name, self.prospect_email, self.dashboard_url
        );
        write!(f, "{}", html_template)
    }
}

impl<'a> SendEmail for ReviewerNotification<'a> {
    fn send(&self, email: &str) -> crate::prelude::Result<()> {
        send_email_with_attachment(
            email,
            &format!("New Application: {} {}", self.first_name, self.last_name),
            &format!("{}", &self),
            self.attachment.clone(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_notification_template_lists_lead_details() {
        let body = ReviewerNotification {
            first_name: "Ada",
            last_name: "Lovelace",
            prospect_email: "ada@example.com",
            dashboard_url: "http://localhost:8000/dashboard",
            attachment: None,
        }
        .to_string();
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("http://localhost:8000/dashboard"));
    }
}

use std::fmt::{self, Display};

use super::{SendEmail, send_email};

pub struct ProspectConfirmation<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub company_name: &'a str,
}

impl<'a> Display for ProspectConfirmation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let html_template = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1.0">
                <title>Application Received</title>
                <style>
                    body {{
                        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
                        line-height: 1.6;
                        color: #333;
                        margin: 0;
                        padding: 0;
                        background-color: #f9fafb;
                    }}
                    .container {{
                        max-width: 600px;
                        margin: 0 auto;
                        padding: 20px;
                    }}
                    .header {{
                        text-align: center;
                        padding: 20px 0;
                        background-color: #0d9488;
                        color: white;
                    }}
                    .content {{
                        padding: 20px;
                        background-color: #ffffff;
                    }}
                    .footer {{
                        text-align: center;
                        padding: 20px;
                        color: #666;
                        font-size: 14px;
                    }}
                </style>
            </head>
            <body>
                <div class="container">
                    <div class="header">
                        <h1>Thank you for your application!</h1>
                    </div>
                    <div class="content">
                        <p>Dear {} {},</p>
                        <p>We have received your application and resume. Our team will review your
                        information and get back to you as soon as possible.</p>
                        <p>If you have any questions in the meantime, please feel free to contact us.</p>
                        <p>Best regards,<br>
                        The {} Team</p>
                    </div>
                    <div class="footer">
                        <p>{}</p>
                    </div>
                </div>
            </body>
            </html>
            "#,
            self.first_name, self.last_name, self.company_name, self.company_name
        );
        write!(f, "{}", html_template)
    }
}

impl<'a> SendEmail for ProspectConfirmation<'a> {
    fn send(&self, email: &str) -> crate::prelude::Result<()> {
        send_email(
            email,
            &format!("Thank you for your application, {}!", self.first_name),
            &format!("{}", &self),
            true,
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
    fn test_confirmation_template_mentions_prospect_and_company() {
        let body = ProspectConfirmation {
            first_name: "Ada",
            last_name: "Lovelace",
            company_name: "Acme Legal",
        }
        .to_string();
        assert!(body.contains("Dear Ada Lovelace"));
        assert!(body.contains("The Acme Legal Team"));
    }
}

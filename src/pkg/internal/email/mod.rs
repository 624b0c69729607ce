use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub mod confirmation;
pub mod notification;

use crate::{conf::settings, prelude::Result};

pub trait SendEmail {
    fn send(&self, email: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

pub fn send_email(email: &str, subject: &str, body: &str, is_html: bool) -> Result<()> {
    dispatch(email, subject, body, is_html, None)
}

pub fn send_email_with_attachment(
    email: &str,
    subject: &str,
    body: &str,
    attachment: Option<EmailAttachment>,
) -> Result<()> {
    dispatch(email, subject, body, true, attachment)
}

fn dispatch(
    email: &str,
    subject: &str,
    body: &str,
    is_html: bool,
    attachment: Option<EmailAttachment>,
) -> Result<()> {
    let (name, _) = email.split_once("@").unwrap_or(("unknown", ""));
    let name = name.to_string();
    let email = email.to_string();
    let subject = subject.to_string();
    let body = body.to_string();
    tracing::debug!("sending email to {}", &email);
    tokio::spawn(async move {
        let recipient = email.clone();
        let result = tokio::task::spawn_blocking(move || {
            let content_type = if is_html {
                ContentType::TEXT_HTML
            } else {
                ContentType::TEXT_PLAIN
            };

            let builder = Message::builder()
                .from(
                    format!("{} <{}>", &settings.service_name, &settings.from_email)
                        .parse()
                        .unwrap(),
                )
                .to(format!("{} <{}>", &name, &email).parse().unwrap())
                .subject(subject);

            let message = match attachment {
                Some(attachment) => {
                    let mime = ContentType::parse(&attachment.content_type)
                        .unwrap_or_else(|_| ContentType::parse("application/octet-stream").unwrap());
                    builder.multipart(
                        MultiPart::mixed()
                            .singlepart(SinglePart::builder().header(content_type).body(body))
                            .singlepart(
                                Attachment::new(attachment.filename)
                                    .body(attachment.content, mime),
                            ),
                    )
                }
                None => builder.header(content_type).body(body),
            }
            .unwrap();

            let creds = Credentials::new(settings.smtp_user.clone(), settings.smtp_pass.clone());

            let mailer = SmtpTransport::relay(&settings.smtp_server)
                .unwrap()
                .credentials(creds)
                .build();

            mailer.send(&message)
        })
        .await;

        match result {
            Ok(Ok(_)) => tracing::info!("email sent successfully to {}", &recipient),
            Ok(Err(e)) => tracing::warn!("could not send email to {}: {e:?}", &recipient),
            Err(e) => tracing::error!("email task failed to execute: {e:?}"),
        }
    });
    Ok(())
}

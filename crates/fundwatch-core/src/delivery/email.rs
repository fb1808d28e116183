use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::notify::ReportClock;
use crate::DeliveryError;

pub const SMTP_PORT: u16 = 587;

/// SMTP connection and addressing settings for the email channel.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

impl Debug for EmailSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Mail delivery seam; [`SmtpMailer`] is the production implementation.
pub trait MailTransport: Send + Sync {
    fn send_html<'a>(
        &'a self,
        subject: &'a str,
        html: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;
}

/// SMTP transport on port 587, upgrading with STARTTLS when the server offers it.
pub struct SmtpMailer {
    settings: EmailSettings,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: EmailSettings) -> Result<Self, DeliveryError> {
        let tls = TlsParameters::new(settings.smtp_host.clone())
            .map_err(|error| DeliveryError::EmailBuild(error.to_string()))?;
        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.smtp_host.as_str())
                .port(SMTP_PORT)
                .tls(Tls::Opportunistic(tls))
                .credentials(Credentials::new(
                    settings.sender.clone(),
                    settings.password.clone(),
                ))
                .build();

        Ok(Self {
            settings,
            transport,
        })
    }

    fn build_message(&self, subject: &str, html: &str) -> Result<Message, DeliveryError> {
        let from = parse_mailbox(&self.settings.sender)?;
        let to = parse_mailbox(&self.settings.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_owned())
            .map_err(|error| DeliveryError::EmailBuild(error.to_string()))
    }
}

impl MailTransport for SmtpMailer {
    fn send_html<'a>(
        &'a self,
        subject: &'a str,
        html: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(async move {
            let message = self.build_message(subject, html)?;
            let response = self
                .transport
                .send(message)
                .await
                .map_err(|error| DeliveryError::Email {
                    content: html.to_owned(),
                    source: Box::new(error),
                })?;
            debug!(code = %response.code(), "smtp accepted message");
            Ok(())
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .parse::<Mailbox>()
        .map_err(|error| DeliveryError::EmailBuild(format!("address '{address}': {error}")))
}

/// Subject line stamped with the report clock's RFC3339 time.
pub fn email_subject(clock: &ReportClock, instant: OffsetDateTime) -> String {
    format!("基金涨跌监控-{}", clock.subject_timestamp(instant))
}

/// Sends `content` as an HTML email. An empty body is a no-op.
pub async fn send_email(
    transport: &dyn MailTransport,
    subject: &str,
    content: &str,
) -> Result<(), DeliveryError> {
    if content.is_empty() {
        return Ok(());
    }
    transport.send_html(subject, content).await?;
    info!(subject, "email sent");
    Ok(())
}

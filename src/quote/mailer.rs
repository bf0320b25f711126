//! SMTP delivery with lettre

use super::{MailTransport, OutgoingEmail};
use crate::config::MailConfig;
use crate::secrets::MailCredentials;
use crate::{MailError, MailResult};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends quote emails through an authenticated SMTP relay
///
/// Built once at startup. When credentials are missing the mailer is still
/// constructed, and every send fails with [`MailError::MissingCredentials`].
pub struct SmtpMailer {
    inner: Option<Ready>,
}

struct Ready {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the SMTP transport for the configured relay host
    ///
    /// # Errors
    ///
    /// Fails if the relay host cannot be used for TLS or the SMTP user is not a
    /// valid email address.
    pub fn new(config: &MailConfig, credentials: Option<MailCredentials>) -> MailResult<Self> {
        let credentials = match credentials {
            Some(credentials) => credentials,
            None => return Ok(Self { inner: None }),
        };

        let address: Address = credentials
            .user
            .parse()
            .map_err(|_| MailError::InvalidAddress(credentials.user.clone()))?;
        let from = Mailbox::new(Some(config.sender_name.clone()), address);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .credentials(Credentials::new(credentials.user, credentials.password));
        if let Some(port) = config.smtp_port {
            builder = builder.port(port);
        }

        tracing::debug!("SMTP transport ready for {}", config.smtp_host);
        Ok(Self {
            inner: Some(Ready {
                transport: builder.build(),
                from,
            }),
        })
    }

    /// Whether credentials were available at startup
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        let ready = self
            .inner
            .as_ref()
            .ok_or_else(|| MailError::MissingCredentials("SMTP user and password".to_string()))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let message = Message::builder()
            .from(ready.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)
            .map_err(|e| MailError::Build(e.to_string()))?;

        ready
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}

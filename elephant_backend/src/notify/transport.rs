use std::{path::{Path, PathBuf}, sync::atomic::{AtomicUsize, Ordering}};

use async_trait::async_trait;
use elephant_entities::prelude::RosterError;
use lettre::{transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, info};

use super::{MailerConfig, OutgoingMessage};


#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), anyhow::Error>;
}

/// Drops every message as an `.eml` file into a directory, numbered in the
/// order they were sent.
pub struct OutboxTransport {
    dir: PathBuf,
    counter: AtomicUsize,
}

impl OutboxTransport {
    pub fn new<P: Into<PathBuf>>(dir: P) -> OutboxTransport {
        OutboxTransport { dir: dir.into(), counter: AtomicUsize::new(0) }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(index: usize, recipient: &str) -> String {
        let recipient: String = recipient.chars().map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '@' | '.' | '-' | '_' | '+' => c,
            _ => '_',
        }).collect();
        format!("{:03}-{}.eml", index, recipient)
    }
}

#[async_trait]
impl MailTransport for OutboxTransport {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), anyhow::Error> {
        std::fs::create_dir_all(&self.dir)?;

        let index = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.dir.join(Self::file_name(index, &message.to));
        std::fs::write(&path, message.render()?)?;

        debug!("Wrote message for {} to {}", message.to, path.display());
        Ok(())
    }
}

/// Sends through an SMTP relay over implicit TLS, logging in as the sender.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &MailerConfig) -> Result<SmtpMailTransport, lettre::transport::smtp::Error> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(config.smtp_server.trim())?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.from_address.trim().to_string(), config.smtp_password.clone()))
            .build();
        Ok(SmtpMailTransport { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), anyhow::Error> {
        let response = self.mailer.send(message.to_email()?).await?;
        debug!("Relay accepted message for {} with {}", message.to, response.code());
        Ok(())
    }
}

/// Picks the outbox when one is configured and the SMTP relay otherwise.
pub fn build_transport(config: &MailerConfig) -> Result<Box<dyn MailTransport>, RosterError> {
    config.validate().map_err(|e| RosterError::InvalidInput(e.to_string()))?;

    match &config.outbox_dir {
        Some(dir) => {
            info!("Writing messages to {}", dir.display());
            Ok(Box::new(OutboxTransport::new(dir)))
        },
        None => {
            info!("Sending messages through {}:{}", config.smtp_server.trim(), config.smtp_port);
            let transport = SmtpMailTransport::new(config).map_err(
                |e| RosterError::InvalidInput(format!("Could not set up SMTP for {}: {}", config.smtp_server, e))
            )?;
            Ok(Box::new(transport))
        }
    }
}

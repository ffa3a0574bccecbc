use std::path::PathBuf;

use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MailerConfigError {
    #[error("Mail configuration is missing {0}")]
    MissingField(&'static str),
    #[error("{0:?} is not a valid sender address")]
    InvalidAddress(String),
}

/// Where and how the number messages are delivered.
///
/// Messages go out over SMTP with implicit TLS unless `outbox_dir` is set,
/// in which case they are written to that directory instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailerConfig {
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_password: String,
    pub from_address: String,
    #[serde(default = "default_event_name")]
    pub event_name: String,
    #[serde(default)]
    pub outbox_dir: Option<PathBuf>,
}

fn default_smtp_port() -> u16 {
    465
}

fn default_event_name() -> String {
    "White Elephant".into()
}

impl MailerConfig {
    pub fn new<S: Into<String>>(from_address: S) -> MailerConfig {
        MailerConfig {
            smtp_server: String::new(),
            smtp_port: default_smtp_port(),
            smtp_password: String::new(),
            from_address: from_address.into(),
            event_name: default_event_name(),
            outbox_dir: None,
        }
    }

    pub fn with_smtp<S: Into<String>, P: Into<String>>(mut self, server: S, password: P) -> MailerConfig {
        self.smtp_server = server.into();
        self.smtp_password = password.into();
        self
    }

    pub fn with_outbox<P: Into<PathBuf>>(mut self, dir: P) -> MailerConfig {
        self.outbox_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<(), MailerConfigError> {
        let from_address = self.from_address.trim();
        if from_address.is_empty() {
            return Err(MailerConfigError::MissingField("from_address"));
        }
        if !from_address.contains('@') {
            return Err(MailerConfigError::InvalidAddress(from_address.to_string()));
        }
        if self.event_name.trim().is_empty() {
            return Err(MailerConfigError::MissingField("event_name"));
        }

        match &self.outbox_dir {
            Some(dir) if dir.as_os_str().is_empty() => Err(MailerConfigError::MissingField("outbox_dir")),
            Some(_) => Ok(()),
            None => {
                if self.smtp_server.trim().is_empty() {
                    return Err(MailerConfigError::MissingField("smtp_server"));
                }
                if self.smtp_port == 0 {
                    return Err(MailerConfigError::MissingField("smtp_port"));
                }
                if self.smtp_password.is_empty() {
                    return Err(MailerConfigError::MissingField("smtp_password"));
                }
                Ok(())
            }
        }
    }
}

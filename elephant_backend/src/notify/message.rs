use chrono::{DateTime, Utc};
use elephant_entities::prelude::*;
use lettre::message::{header::ContentType, Mailbox};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use super::MailerConfig;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("{field} header contains a line break")]
    LineBreakInHeader { field: &'static str },
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("Could not build message: {0}")]
    Build(#[from] lettre::error::Error),
}

impl OutgoingMessage {
    fn check_headers(&self) -> Result<(), MessageError> {
        for (field, value) in [("From", &self.from), ("To", &self.to), ("Subject", &self.subject)] {
            if value.contains(['\r', '\n']) {
                return Err(MessageError::LineBreakInHeader { field });
            }
        }
        Ok(())
    }

    pub fn render(&self) -> Result<String, MessageError> {
        self.render_at(Utc::now())
    }

    /// RFC 5322 text with CRLF line endings.
    pub fn render_at(&self, date: DateTime<Utc>) -> Result<String, MessageError> {
        self.check_headers()?;

        let mut out = String::new();
        out.push_str(&format!("Date: {}\r\n", date.to_rfc2822()));
        out.push_str(&format!("From: {}\r\n", self.from));
        out.push_str(&format!("To: {}\r\n", self.to));
        out.push_str(&format!("Subject: {}\r\n", self.subject));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        out.push_str("\r\n");
        for line in self.body.lines() {
            out.push_str(line);
            out.push_str("\r\n");
        }
        Ok(out)
    }

    /// Builds the message handed to the SMTP relay.
    pub fn to_email(&self) -> Result<lettre::Message, MessageError> {
        self.check_headers()?;

        Ok(lettre::Message::builder()
            .from(self.from.parse::<Mailbox>()?)
            .to(self.to.parse::<Mailbox>()?)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())?)
    }
}

/// Full turn order, addressed to whoever goes first.
pub fn compose_summary(config: &MailerConfig, ordered: &OrderedRoster) -> OutgoingMessage {
    let mut body = "See below for the full list of numbers:".to_string();
    for participant in ordered {
        body.push_str(&format!("\n{}: {}", participant.number, participant.name));
    }

    OutgoingMessage {
        from: config.from_address.clone(),
        to: ordered.first().email.clone(),
        subject: format!("Full list of {} Numbers", config.event_name),
        body,
    }
}

pub fn compose_individual(config: &MailerConfig, participant: &OrderedParticipant) -> OutgoingMessage {
    OutgoingMessage {
        from: config.from_address.clone(),
        to: participant.email.clone(),
        subject: format!("{} Number", config.event_name),
        body: format!("{}, your number for {} is {}!", participant.name, config.event_name, participant.number),
    }
}

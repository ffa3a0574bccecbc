use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use super::{compose_individual, compose_summary, MailTransport, MailerConfig, OutgoingMessage};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    pub name: String,
    pub email: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub sent: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    async fn deliver<T>(&mut self, transport: &T, name: &str, message: &OutgoingMessage) where T: MailTransport + ?Sized {
        let result = if message.to.trim().is_empty() {
            Err(anyhow::anyhow!("no email address on record"))
        } else {
            transport.send(message).await
        };

        match result {
            Ok(()) => {
                info!("Sent \"{}\" to {} at {}", message.subject, name, message.to);
                self.sent += 1;
            },
            Err(e) => {
                warn!("Could not send \"{}\" to {}: {}", message.subject, name, e);
                self.failures.push(DeliveryFailure {
                    name: name.to_string(),
                    email: message.to.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Sends the full list to the first participant, then every participant
/// their own number. Failed deliveries are collected, not propagated.
pub async fn dispatch_numbers<T>(config: &MailerConfig, ordered: &OrderedRoster, transport: &T) -> DispatchReport where T: MailTransport + ?Sized {
    let mut report = DispatchReport::default();

    let summary = compose_summary(config, ordered);
    report.deliver(transport, &ordered.first().name, &summary).await;

    for participant in ordered {
        let message = compose_individual(config, participant);
        report.deliver(transport, &participant.name, &message).await;
    }

    report
}

mod config;
mod message;
mod transport;
mod dispatch;

pub use self::config::{MailerConfig, MailerConfigError};
pub use self::message::{OutgoingMessage, MessageError, compose_summary, compose_individual};
pub use self::transport::{MailTransport, OutboxTransport, SmtpMailTransport, build_transport};
pub use self::dispatch::{DispatchReport, DeliveryFailure, dispatch_numbers};

use elephant_entities::prelude::*;

/// Loads the turn order, healing it if needed, and mails everyone their number.
pub async fn notify_participants<S, T>(store: &S, config: &MailerConfig, transport: &T) -> Result<DispatchReport, RosterError> where S: RosterStore + ?Sized, T: MailTransport + ?Sized {
    config.validate().map_err(|e| RosterError::InvalidInput(e.to_string()))?;
    let ordered = ordered_roster(store).await?;
    Ok(dispatch_numbers(config, &ordered, transport).await)
}

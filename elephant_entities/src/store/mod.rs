use async_trait::async_trait;

use crate::{domain::Participant, error::RosterError};

mod sqlite;
mod csv_file;
mod variant;

pub use sqlite::SqliteRosterStore;
pub use csv_file::CsvRosterStore;
pub use variant::{RosterStoreVariant, StorageConfig};

/// Durable storage for the participant roster.
///
/// Every mutating call has persisted its effect by the time it returns.
/// Records are always listed in insertion order, and that order is what
/// `write_numbers` uses to associate numbers with records.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Appends a participant with an unset number.
    ///
    /// Fails with `RosterError::InvalidInput` for an empty or whitespace-only name.
    async fn add(&self, name: &str, email: &str) -> Result<Participant, RosterError>;

    /// Appends several participants in one write, in the given order.
    ///
    /// Every name is validated before anything is stored, so an invalid
    /// entry leaves the roster unchanged.
    async fn add_many(&self, entries: &[(String, String)]) -> Result<Vec<Participant>, RosterError>;

    async fn list_all(&self) -> Result<Vec<Participant>, RosterError>;

    /// Removes every record whose name equals `name` exactly and returns how many were removed.
    async fn delete_by_name(&self, name: &str) -> Result<u64, RosterError>;

    /// Removes every record without a usable name and returns how many were removed.
    async fn prune(&self) -> Result<u64, RosterError>;

    async fn clear(&self) -> Result<(), RosterError>;

    /// Overwrites the number of every record, position by position.
    ///
    /// The write is all-or-nothing. A length that differs from the current
    /// record count is rejected with `InvalidNumbering::CountMismatch`.
    async fn write_numbers(&self, numbers: &[u32]) -> Result<(), RosterError>;

    /// Replaces the entire roster with `participants`, keeping their order.
    async fn replace_all(&self, participants: &[Participant]) -> Result<(), RosterError>;

    async fn count(&self) -> Result<usize, RosterError> {
        Ok(self.list_all().await?.len())
    }
}

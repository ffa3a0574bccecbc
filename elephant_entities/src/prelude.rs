pub use crate::domain::{Participant, TurnNumber};
pub use crate::error::{RosterError, InvalidNumbering};
pub use crate::store::{RosterStore, RosterStoreVariant, StorageConfig, SqliteRosterStore, CsvRosterStore};
pub use crate::assignment::{assign_numbers, assign_numbers_with_rng, AssignmentOutcome};
pub use crate::ordering::{check_numbering, ordered_roster, OrderedParticipant, OrderedRoster, Turn};

pub mod participant;

pub use participant::{Participant, TurnNumber, validate_name, participants_from_entries};

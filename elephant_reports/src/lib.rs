pub mod template;

pub use template::{TurnOrderDeck, ExportedDeck};

pub mod schema;
pub mod domain;
pub mod error;
pub mod store;
pub mod assignment;
pub mod ordering;
pub mod prelude;
pub mod mock;

pub use error::{RosterError, InvalidNumbering};
pub use store::{RosterStore, RosterStoreVariant, StorageConfig};

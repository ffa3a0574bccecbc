pub mod config;
pub mod commands;

pub use config::{Config, DeckConfig, read_config};
pub use commands::Command;

pub mod actions;
pub mod views;
pub mod import;
pub mod notify;

pub use actions::*;
pub use views::*;

pub mod prelude;

pub mod participant;

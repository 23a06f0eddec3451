pub mod config;
pub mod decode;
pub mod error;
pub mod io;
pub mod names;
pub mod paths;
pub mod roster;
pub mod schedule;
pub mod tally;
pub mod types;

pub use error::{Result, RosterError};

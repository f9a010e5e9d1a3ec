//! Loading, cleaning and persisting the weather table.

pub mod cleaning;
pub mod error;
pub mod inspect;
pub mod io;
pub mod runner;

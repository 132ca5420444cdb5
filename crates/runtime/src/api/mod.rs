//! Types the calling layer works with.

mod errors;
mod reports;

pub use errors::{Result, RuntimeError};
pub use reports::{Registration, RegistrationKind, ScanReport};

//! Double-entry journals.
//!
//! Journal lines, journal kinds, and the balance validator every
//! journal-writing flow runs before it persists anything.

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use types::{EntryType, JournalLine, JournalTotals, JournalType};
pub use validation::{totals, validate_balance, validate_lines};

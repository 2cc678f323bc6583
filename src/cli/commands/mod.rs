//! Command implementations organized by area.

/// Admin operations (edit, delete, bulk set-paid)
pub mod admin;
/// Entry recording and listing
pub mod entry;
/// Monthly breakdown report
pub mod report;

//! Core business logic - framework-agnostic entry validation, reporting and
//! admin reconciliation. Nothing in here touches a store backend, the
//! network or the terminal.

/// Admin password gate and bulk reconciliation of the record set
pub mod admin;
/// Entry validation and creation
pub mod entry;
/// Monthly/daily breakdown reports
pub mod report;

//! Core domain types and logic.

pub mod trade;
pub mod indicator;
pub mod channel;
pub mod query;
pub mod error;

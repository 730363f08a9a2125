//! Hirevo Core - report aggregation engine for the hiring marketplace.
//!
//! This crate recomputes the derived per-company and per-user reports
//! whenever jobs, invoices, job members or company members change.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod companies;
pub mod constants;
pub mod errors;
pub mod events;
pub mod invoices;
pub mod jobs;
pub mod reports;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

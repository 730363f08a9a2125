//! SQLite storage implementation for the Hirevo report engine.
//!
//! This crate holds every Diesel dependency of the workspace. It implements
//! the repository traits defined in `hirevo-core` and contains:
//! - Database connection pooling and embedded migrations
//! - The single-writer actor used for report upserts
//! - Repository implementations for jobs, memberships, invoices and reports
//! - Database model types (with Diesel derives)
//!
//! ```text
//!        core (engine)
//!              │
//!              ▼
//!  storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod companies;
pub mod invoices;
pub mod jobs;
pub mod reports;

#[cfg(test)]
mod test_fixtures;

pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};

pub use companies::CompanyMemberRepository;
pub use invoices::InvoiceRepository;
pub use jobs::JobRepository;
pub use reports::ReportRepository;

pub use hirevo_core::errors::{DatabaseError, Error, Result};

//! SQLite storage implementation for company memberships.

mod model;
mod repository;

pub use model::CompanyMemberDB;
pub use repository::CompanyMemberRepository;

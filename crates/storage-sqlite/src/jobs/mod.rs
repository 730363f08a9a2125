//! SQLite storage implementation for jobs, rates and job members.

mod model;
mod repository;

pub use model::{JobDB, JobMemberDB, JobRateDB};
pub use repository::JobRepository;

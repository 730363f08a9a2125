//! SQLite storage implementation for company and user reports.

mod model;
mod repository;

pub use model::{CompanyReportChangesDB, CompanyReportDB, UserReportChangesDB, UserReportDB};
pub use repository::ReportRepository;

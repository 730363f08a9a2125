//! Reports module - derived company and user reports, their aggregators,
//! the earnings calculator, and the record event trigger.

mod company_report_service;
pub mod earnings;
mod keyed_lock;
mod report_trigger;
mod reports_model;
mod reports_traits;
mod user_report_service;

#[cfg(test)]
mod test_support;



#[cfg(test)]
mod user_report_service_tests;

pub use company_report_service::CompanyReportService;
pub use earnings::calculate_earnings;
pub use keyed_lock::{KeyedLock, KeyedLockGuard};
pub use report_trigger::{plan_report_targets, ReportTargets, ReportTrigger};
pub use reports_model::{
    CompanyReport, CompanyReportMetrics, Earnings, RebuildFailure, RebuildSummary, ReportKind,
    UserReport, UserReportMetrics,
};
pub use reports_traits::{
    CompanyReportServiceTrait, ReportRepositoryTrait, ReportTriggerTrait, UserReportServiceTrait,
};
pub use user_report_service::UserReportService;

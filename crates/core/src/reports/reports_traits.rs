use async_trait::async_trait;

use crate::errors::Result;
use crate::events::RecordEvent;
use crate::reports::reports_model::{CompanyReport, RebuildSummary, UserReport};

/// Trait for report persistence.
///
/// Upserts are keyed on the report's natural key (`company_id` / `user_id`)
/// and skip user-input validation: every field is computed by the engine.
#[async_trait]
pub trait ReportRepositoryTrait: Send + Sync {
    fn find_company_report(&self, company_id: &str) -> Result<Option<CompanyReport>>;
    fn find_user_report(&self, user_id: &str) -> Result<Option<UserReport>>;
    async fn upsert_company_report(&self, report: CompanyReport) -> Result<CompanyReport>;
    async fn upsert_user_report(&self, report: UserReport) -> Result<UserReport>;
    /// Every company referenced by a job, invoice or membership.
    fn list_company_ids(&self) -> Result<Vec<String>>;
    /// Every user referenced by a job membership or company membership.
    fn list_user_ids(&self) -> Result<Vec<String>>;
}

/// Trait for company report recomputation
#[async_trait]
pub trait CompanyReportServiceTrait: Send + Sync {
    fn get_company_report(&self, company_id: &str) -> Result<Option<CompanyReport>>;
    async fn recompute_company_report(&self, company_id: &str) -> Result<CompanyReport>;
}

/// Trait for user report recomputation
#[async_trait]
pub trait UserReportServiceTrait: Send + Sync {
    fn get_user_report(&self, user_id: &str) -> Result<Option<UserReport>>;
    async fn recompute_user_report(&self, user_id: &str) -> Result<UserReport>;
}

/// Trait for reacting to record mutations
#[async_trait]
pub trait ReportTriggerTrait: Send + Sync {
    async fn handle(&self, event: &RecordEvent) -> Result<()>;
    async fn handle_batch(&self, events: &[RecordEvent]) -> Result<()>;
    async fn rebuild_all(&self, concurrency: usize) -> Result<RebuildSummary>;
}

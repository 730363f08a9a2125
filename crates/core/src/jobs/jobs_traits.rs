use crate::errors::Result;
use crate::jobs::jobs_model::{Job, JobMember, JobRate};

/// Read access to jobs, their rate intervals and their members.
///
/// List methods return rows newest first.
pub trait JobRepositoryTrait: Send + Sync {
    /// Returns `DatabaseError::NotFound` when no job has this id.
    fn get_job(&self, job_id: &str) -> Result<Job>;
    fn list_jobs_by_company(&self, company_id: &str) -> Result<Vec<Job>>;
    /// Unknown ids are silently absent from the result.
    fn list_rates_by_ids(&self, rate_ids: &[String]) -> Result<Vec<JobRate>>;
    fn list_job_members_by_user(&self, user_id: &str) -> Result<Vec<JobMember>>;
}

//! Job domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::jobs_constants::*;

/// Domain model representing a job posted by a company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(rename = "companyID")]
    pub company_id: String,
    pub status: String,
    /// Ids of the job's rate intervals. May be empty.
    #[serde(default)]
    pub rates: Vec<String>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        ACTIVE_JOB_STATUSES.contains(&self.status.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status == JOB_STATUS_COMPLETED
    }
}

/// A paid time span on a job.
///
/// Instants are kept in their stored representation; parsing happens in the
/// earnings calculator so a malformed value only skips this rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRate {
    pub id: String,
    #[serde(rename = "jobID")]
    pub job_id: String,
    pub start_time: String,
    pub end_time: String,
    pub rate_value: Decimal,
}

/// Link between a worker and a job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobMember {
    pub id: String,
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub status: String,
}

impl JobMember {
    pub fn is_hired(&self) -> bool {
        self.status == JOB_MEMBER_STATUS_HIRED
    }
}

//! Recoverable conditions observed while recomputing a report.

use serde::{Deserialize, Serialize};

use crate::errors::EarningsError;

/// Something the engine tolerated instead of failing a recomputation.
///
/// Each variant degrades the report (or is a no-op for it) but never aborts
/// the triggering mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportDiagnostic {
    /// Looking up the existing report failed; a fresh one was created.
    ReportLookupFailed {
        owner_id: String,
        reason: String,
    },

    /// A hired job member points at a job that no longer exists.
    DanglingJob {
        user_id: String,
        job_member_id: String,
        job_id: String,
    },

    /// Fetching a hired member's job failed for a reason other than a miss.
    JobLookupFailed {
        user_id: String,
        job_id: String,
        reason: String,
    },

    /// Fetching a job's rate intervals failed.
    RateLookupFailed {
        user_id: String,
        job_id: String,
        reason: String,
    },

    /// A rate interval could not be turned into hours and earnings.
    RateSkipped {
        user_id: String,
        job_id: String,
        #[serde(skip)]
        error: Option<EarningsError>,
        reason: String,
    },

    /// A paid invoice has no numeric `Total`; it adds nothing to revenue.
    InvoiceTotalMissing {
        company_id: String,
        invoice_id: String,
    },

    /// Adding a paid invoice's `Total` would overflow the revenue sum.
    RevenueOverflow {
        company_id: String,
        invoice_id: String,
        total: String,
    },
}

impl ReportDiagnostic {
    pub fn rate_skipped(user_id: &str, job_id: &str, error: EarningsError) -> Self {
        Self::RateSkipped {
            user_id: user_id.to_string(),
            job_id: job_id.to_string(),
            reason: error.to_string(),
            error: Some(error),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReportDiagnostic::ReportLookupFailed { owner_id, reason } => format!(
                "Report lookup for '{}' failed, creating a new one: {}",
                owner_id, reason
            ),
            ReportDiagnostic::DanglingJob {
                user_id,
                job_member_id,
                job_id,
            } => format!(
                "Job member {} of user {} references missing job {}",
                job_member_id, user_id, job_id
            ),
            ReportDiagnostic::JobLookupFailed {
                user_id,
                job_id,
                reason,
            } => format!(
                "Skipping job {} for user {}: {}",
                job_id, user_id, reason
            ),
            ReportDiagnostic::RateLookupFailed {
                user_id,
                job_id,
                reason,
            } => format!(
                "Skipping rates of job {} for user {}: {}",
                job_id, user_id, reason
            ),
            ReportDiagnostic::RateSkipped {
                user_id,
                job_id,
                reason,
                ..
            } => format!(
                "Skipping rate of job {} for user {}: {}",
                job_id, user_id, reason
            ),
            ReportDiagnostic::InvoiceTotalMissing {
                company_id,
                invoice_id,
            } => format!(
                "Paid invoice {} of company {} has no numeric Total",
                invoice_id, company_id
            ),
            ReportDiagnostic::RevenueOverflow {
                company_id,
                invoice_id,
                total,
            } => format!(
                "Skipping Total {} of paid invoice {}: revenue of company {} would overflow",
                total, invoice_id, company_id
            ),
        }
    }
}

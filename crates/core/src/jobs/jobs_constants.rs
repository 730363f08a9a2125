/// Job statuses
///
/// The status set is open: statuses not listed here are stored as-is and
/// count toward neither the active nor the completed bucket of a company report.

/// Job is published and accepting applications.
pub const JOB_STATUS_HIRING: &str = "HIRING";

/// Job is staffed and about to start.
pub const JOB_STATUS_READY: &str = "READY";

/// Job has finished.
pub const JOB_STATUS_COMPLETED: &str = "COMPLETED";

// Job member statuses

/// Worker applied to the job.
pub const JOB_MEMBER_STATUS_APPLIED: &str = "APPLIED";

/// Worker was hired for the job. Only hired members accrue hours and earnings.
pub const JOB_MEMBER_STATUS_HIRED: &str = "HIRED";

/// Worker's application was rejected.
pub const JOB_MEMBER_STATUS_REJECTED: &str = "REJECTED";

/// Statuses counted as active in a company report.
pub const ACTIVE_JOB_STATUSES: [&str; 2] = [JOB_STATUS_HIRING, JOB_STATUS_READY];

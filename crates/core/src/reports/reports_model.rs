//! Report domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized metrics for one company, recomputed on every relevant change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    pub id: String,
    #[serde(rename = "companyID")]
    pub company_id: String,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub completed_jobs: i64,
    pub total_workers: i64,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub total_revenue: Decimal,
}

impl CompanyReport {
    /// Zero-valued report bound to `company_id`.
    pub fn new(company_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            total_jobs: 0,
            active_jobs: 0,
            completed_jobs: 0,
            total_workers: 0,
            total_invoices: 0,
            paid_invoices: 0,
            total_revenue: Decimal::ZERO,
        }
    }

    /// Overwrites every computed field, keeping identity.
    pub fn apply(&mut self, metrics: &CompanyReportMetrics) {
        self.total_jobs = metrics.total_jobs;
        self.active_jobs = metrics.active_jobs;
        self.completed_jobs = metrics.completed_jobs;
        self.total_workers = metrics.total_workers;
        self.total_invoices = metrics.total_invoices;
        self.paid_invoices = metrics.paid_invoices;
        self.total_revenue = metrics.total_revenue;
    }

    pub fn metrics(&self) -> CompanyReportMetrics {
        CompanyReportMetrics {
            total_jobs: self.total_jobs,
            active_jobs: self.active_jobs,
            completed_jobs: self.completed_jobs,
            total_workers: self.total_workers,
            total_invoices: self.total_invoices,
            paid_invoices: self.paid_invoices,
            total_revenue: self.total_revenue,
        }
    }
}

/// Computed fields of a company report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReportMetrics {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub completed_jobs: i64,
    pub total_workers: i64,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub total_revenue: Decimal,
}

/// Denormalized metrics for one worker, recomputed on every relevant change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserReport {
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub total_jobs: i64,
    pub hired_jobs: i64,
    pub total_hours: Decimal,
    pub total_earnings: Decimal,
    pub active_companies: i64,
}

impl UserReport {
    /// Zero-valued report bound to `user_id`.
    pub fn new(user_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            total_jobs: 0,
            hired_jobs: 0,
            total_hours: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            active_companies: 0,
        }
    }

    /// Overwrites every computed field, keeping identity.
    pub fn apply(&mut self, metrics: &UserReportMetrics) {
        self.total_jobs = metrics.total_jobs;
        self.hired_jobs = metrics.hired_jobs;
        self.total_hours = metrics.total_hours;
        self.total_earnings = metrics.total_earnings;
        self.active_companies = metrics.active_companies;
    }

    pub fn metrics(&self) -> UserReportMetrics {
        UserReportMetrics {
            total_jobs: self.total_jobs,
            hired_jobs: self.hired_jobs,
            total_hours: self.total_hours,
            total_earnings: self.total_earnings,
            active_companies: self.active_companies,
        }
    }
}

/// Computed fields of a user report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserReportMetrics {
    pub total_jobs: i64,
    pub hired_jobs: i64,
    pub total_hours: Decimal,
    pub total_earnings: Decimal,
    pub active_companies: i64,
}

/// Hours worked and money earned over one or more rate intervals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Earnings {
    pub hours: Decimal,
    pub earnings: Decimal,
}

impl Earnings {
    /// Sum of both components, or `None` if either leaves the `Decimal` range.
    pub fn checked_add(&self, other: &Earnings) -> Option<Earnings> {
        Some(Earnings {
            hours: self.hours.checked_add(other.hours)?,
            earnings: self.earnings.checked_add(other.earnings)?,
        })
    }
}

/// Outcome of a bulk rebuild
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebuildSummary {
    pub companies_rebuilt: usize,
    pub users_rebuilt: usize,
    pub failures: Vec<RebuildFailure>,
}

/// Which report family a rebuild failure belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Company,
    User,
}

/// A report that could not be rebuilt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebuildFailure {
    pub kind: ReportKind,
    pub owner_id: String,
    pub reason: String,
}

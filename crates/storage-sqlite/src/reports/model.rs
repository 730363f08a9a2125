//! Database models for company and user reports.

use diesel::prelude::*;

use hirevo_core::reports::{CompanyReport, UserReport};

use crate::utils::parse_decimal_column;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::company_reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyReportDB {
    pub id: String,
    pub company_id: String,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub completed_jobs: i64,
    pub total_workers: i64,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub total_revenue: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Columns overwritten when a company report already exists.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::company_reports)]
pub struct CompanyReportChangesDB {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub completed_jobs: i64,
    pub total_workers: i64,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub total_revenue: String,
    pub updated_at: String,
}

impl CompanyReportDB {
    pub fn from_report(report: &CompanyReport, timestamp: &str) -> Self {
        Self {
            id: report.id.clone(),
            company_id: report.company_id.clone(),
            total_jobs: report.total_jobs,
            active_jobs: report.active_jobs,
            completed_jobs: report.completed_jobs,
            total_workers: report.total_workers,
            total_invoices: report.total_invoices,
            paid_invoices: report.paid_invoices,
            total_revenue: report.total_revenue.to_string(),
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    pub fn changes(&self) -> CompanyReportChangesDB {
        CompanyReportChangesDB {
            total_jobs: self.total_jobs,
            active_jobs: self.active_jobs,
            completed_jobs: self.completed_jobs,
            total_workers: self.total_workers,
            total_invoices: self.total_invoices,
            paid_invoices: self.paid_invoices,
            total_revenue: self.total_revenue.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

impl From<CompanyReportDB> for CompanyReport {
    fn from(db: CompanyReportDB) -> Self {
        let total_revenue = parse_decimal_column(&db.total_revenue, "total_revenue", &db.id);
        Self {
            id: db.id,
            company_id: db.company_id,
            total_jobs: db.total_jobs,
            active_jobs: db.active_jobs,
            completed_jobs: db.completed_jobs,
            total_workers: db.total_workers,
            total_invoices: db.total_invoices,
            paid_invoices: db.paid_invoices,
            total_revenue,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserReportDB {
    pub id: String,
    pub user_id: String,
    pub total_jobs: i64,
    pub hired_jobs: i64,
    pub total_hours: String,
    pub total_earnings: String,
    pub active_companies: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Columns overwritten when a user report already exists.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::user_reports)]
pub struct UserReportChangesDB {
    pub total_jobs: i64,
    pub hired_jobs: i64,
    pub total_hours: String,
    pub total_earnings: String,
    pub active_companies: i64,
    pub updated_at: String,
}

impl UserReportDB {
    pub fn from_report(report: &UserReport, timestamp: &str) -> Self {
        Self {
            id: report.id.clone(),
            user_id: report.user_id.clone(),
            total_jobs: report.total_jobs,
            hired_jobs: report.hired_jobs,
            total_hours: report.total_hours.to_string(),
            total_earnings: report.total_earnings.to_string(),
            active_companies: report.active_companies,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }

    pub fn changes(&self) -> UserReportChangesDB {
        UserReportChangesDB {
            total_jobs: self.total_jobs,
            hired_jobs: self.hired_jobs,
            total_hours: self.total_hours.clone(),
            total_earnings: self.total_earnings.clone(),
            active_companies: self.active_companies,
            updated_at: self.updated_at.clone(),
        }
    }
}

impl From<UserReportDB> for UserReport {
    fn from(db: UserReportDB) -> Self {
        let total_hours = parse_decimal_column(&db.total_hours, "total_hours", &db.id);
        let total_earnings = parse_decimal_column(&db.total_earnings, "total_earnings", &db.id);
        Self {
            id: db.id,
            user_id: db.user_id,
            total_jobs: db.total_jobs,
            hired_jobs: db.hired_jobs,
            total_hours,
            total_earnings,
            active_companies: db.active_companies,
        }
    }
}

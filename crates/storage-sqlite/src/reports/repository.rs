use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

use hirevo_core::reports::{CompanyReport, ReportRepositoryTrait, UserReport};
use hirevo_core::Result;

use super::model::{CompanyReportDB, UserReportDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{company_members, company_reports, invoices, job_members, jobs, user_reports};
use crate::utils::now_timestamp;

pub struct ReportRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ReportRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ReportRepository { pool, writer }
    }
}

fn collect_ids(groups: Vec<Vec<String>>) -> Vec<String> {
    groups
        .into_iter()
        .flatten()
        .filter(|id| !id.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    fn find_company_report(&self, company_id: &str) -> Result<Option<CompanyReport>> {
        let mut conn = get_connection(&self.pool)?;
        let report_db = company_reports::table
            .filter(company_reports::company_id.eq(company_id))
            .select(CompanyReportDB::as_select())
            .first::<CompanyReportDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(report_db.map(CompanyReport::from))
    }

    fn find_user_report(&self, user_id: &str) -> Result<Option<UserReport>> {
        let mut conn = get_connection(&self.pool)?;
        let report_db = user_reports::table
            .filter(user_reports::user_id.eq(user_id))
            .select(UserReportDB::as_select())
            .first::<UserReportDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(report_db.map(UserReport::from))
    }

    async fn upsert_company_report(&self, report: CompanyReport) -> Result<CompanyReport> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CompanyReport> {
                let row = CompanyReportDB::from_report(&report, &now_timestamp());
                diesel::insert_into(company_reports::table)
                    .values(&row)
                    .on_conflict(company_reports::company_id)
                    .do_update()
                    .set(&row.changes())
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = company_reports::table
                    .filter(company_reports::company_id.eq(&report.company_id))
                    .select(CompanyReportDB::as_select())
                    .first::<CompanyReportDB>(conn)
                    .map_err(StorageError::from)?;
                debug!("Stored company report {} for {}", stored.id, stored.company_id);
                Ok(CompanyReport::from(stored))
            })
            .await
    }

    async fn upsert_user_report(&self, report: UserReport) -> Result<UserReport> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserReport> {
                let row = UserReportDB::from_report(&report, &now_timestamp());
                diesel::insert_into(user_reports::table)
                    .values(&row)
                    .on_conflict(user_reports::user_id)
                    .do_update()
                    .set(&row.changes())
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = user_reports::table
                    .filter(user_reports::user_id.eq(&report.user_id))
                    .select(UserReportDB::as_select())
                    .first::<UserReportDB>(conn)
                    .map_err(StorageError::from)?;
                debug!("Stored user report {} for {}", stored.id, stored.user_id);
                Ok(UserReport::from(stored))
            })
            .await
    }

    fn list_company_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let from_jobs = jobs::table
            .select(jobs::company_id)
            .distinct()
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let from_invoices = invoices::table
            .select(invoices::company_id)
            .distinct()
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let from_members = company_members::table
            .select(company_members::company_id)
            .distinct()
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_ids(vec![from_jobs, from_invoices, from_members]))
    }

    fn list_user_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let from_job_members = job_members::table
            .select(job_members::user_id)
            .distinct()
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let from_company_members = company_members::table
            .select(company_members::user_id)
            .distinct()
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(collect_ids(vec![from_job_members, from_company_members]))
    }
}

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use hirevo_core::errors::DatabaseError;
use hirevo_core::jobs::{Job, JobMember, JobRate, JobRepositoryTrait};
use hirevo_core::Result;

use super::model::{JobDB, JobMemberDB, JobRateDB};
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::{job_members, job_rates, jobs};
use crate::utils::chunk_ids;

pub struct JobRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl JobRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        JobRepository { pool }
    }
}

impl JobRepositoryTrait for JobRepository {
    fn get_job(&self, job_id: &str) -> Result<Job> {
        let mut conn = get_connection(&self.pool)?;
        let job_db = jobs::table
            .find(job_id)
            .select(JobDB::as_select())
            .first::<JobDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Job {} not found", job_id)))?;
        Ok(Job::from(job_db))
    }

    fn list_jobs_by_company(&self, company_id: &str) -> Result<Vec<Job>> {
        let mut conn = get_connection(&self.pool)?;
        let jobs_db = jobs::table
            .filter(jobs::company_id.eq(company_id))
            .order(jobs::created_at.desc())
            .select(JobDB::as_select())
            .load::<JobDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(jobs_db.into_iter().map(Job::from).collect())
    }

    fn list_rates_by_ids(&self, rate_ids: &[String]) -> Result<Vec<JobRate>> {
        if rate_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let mut rates_db = Vec::with_capacity(rate_ids.len());
        for chunk in chunk_ids(rate_ids, 0) {
            let loaded = job_rates::table
                .filter(job_rates::id.eq_any(chunk))
                .select(JobRateDB::as_select())
                .load::<JobRateDB>(&mut conn)
                .map_err(StorageError::from)?;
            rates_db.extend(loaded);
        }
        // Chunks are queried independently; restore a single newest-first order.
        rates_db.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rates_db.into_iter().map(JobRate::from).collect())
    }

    fn list_job_members_by_user(&self, user_id: &str) -> Result<Vec<JobMember>> {
        let mut conn = get_connection(&self.pool)?;
        let members_db = job_members::table
            .filter(job_members::user_id.eq(user_id))
            .order(job_members::created_at.desc())
            .select(JobMemberDB::as_select())
            .load::<JobMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(members_db.into_iter().map(JobMember::from).collect())
    }
}

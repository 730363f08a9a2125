//! Temp-file SQLite databases and row builders shared by repository tests.

use diesel::prelude::*;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

use crate::companies::CompanyMemberDB;
use crate::db::{create_pool, get_connection, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::invoices::InvoiceDB;
use crate::jobs::{JobDB, JobMemberDB, JobRateDB};
use crate::schema::{company_members, invoices, job_members, job_rates, jobs};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

/// Must run inside a tokio runtime: the writer actor is spawned here.
pub fn setup() -> TestDb {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(Arc::clone(&pool));
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

/// Store-formatted timestamp `minute` minutes into 2025-01-01.
pub fn at(minute: u32) -> String {
    format!("2025-01-01 {:02}:{:02}:00.000Z", minute / 60, minute % 60)
}

impl TestDb {
    pub fn insert_job(&self, id: &str, company_id: &str, status: &str, rates: &[&str], minute: u32) {
        let row = JobDB {
            id: id.to_string(),
            company_id: company_id.to_string(),
            status: status.to_string(),
            rates: serde_json::to_string(rates).expect("rates serialize"),
            created_at: at(minute),
            updated_at: at(minute),
        };
        let mut conn = get_connection(&self.pool).expect("connection");
        diesel::insert_into(jobs::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert job");
    }

    pub fn insert_rate(&self, id: &str, job_id: &str, start: &str, end: &str, rate: &str, minute: u32) {
        let row = JobRateDB {
            id: id.to_string(),
            job_id: job_id.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            rate_value: rate.to_string(),
            created_at: at(minute),
            updated_at: at(minute),
        };
        let mut conn = get_connection(&self.pool).expect("connection");
        diesel::insert_into(job_rates::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert rate");
    }

    pub fn insert_job_member(&self, id: &str, job_id: &str, user_id: &str, status: &str, minute: u32) {
        let row = JobMemberDB {
            id: id.to_string(),
            job_id: job_id.to_string(),
            user_id: user_id.to_string(),
            status: status.to_string(),
            created_at: at(minute),
            updated_at: at(minute),
        };
        let mut conn = get_connection(&self.pool).expect("connection");
        diesel::insert_into(job_members::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert job member");
    }

    pub fn insert_company_member(
        &self,
        id: &str,
        company_id: &str,
        user_id: &str,
        status: &str,
        minute: u32,
    ) {
        let row = CompanyMemberDB {
            id: id.to_string(),
            company_id: company_id.to_string(),
            user_id: user_id.to_string(),
            status: status.to_string(),
            role: "MEMBER".to_string(),
            created_at: at(minute),
            updated_at: at(minute),
        };
        let mut conn = get_connection(&self.pool).expect("connection");
        diesel::insert_into(company_members::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert company member");
    }

    pub fn insert_invoice(
        &self,
        id: &str,
        company_id: &str,
        status: &str,
        metadata: Option<&str>,
        minute: u32,
    ) {
        let row = InvoiceDB {
            id: id.to_string(),
            company_id: company_id.to_string(),
            user_id: "u-billing".to_string(),
            status: status.to_string(),
            metadata: metadata.map(str::to_string),
            created_at: at(minute),
            updated_at: at(minute),
        };
        let mut conn = get_connection(&self.pool).expect("connection");
        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert invoice");
    }
}

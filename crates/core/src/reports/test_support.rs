//! In-memory record store shared by the report service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::companies::{CompanyMember, CompanyMemberRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::invoices::{Invoice, InvoiceRepositoryTrait};
use crate::jobs::{Job, JobMember, JobRate, JobRepositoryTrait};

use super::reports_model::{CompanyReport, UserReport};
use super::reports_traits::ReportRepositoryTrait;

fn query_failed(collection: &str) -> Error {
    Error::Database(DatabaseError::QueryFailed(format!(
        "{} unavailable",
        collection
    )))
}

/// Saves reports by `id` the way a plain record save would, so duplicate
/// rows show up if the engine ever skips find-or-create.
#[derive(Default)]
pub struct InMemoryStore {
    pub jobs: RwLock<Vec<Job>>,
    pub rates: RwLock<Vec<JobRate>>,
    pub job_members: RwLock<Vec<JobMember>>,
    pub company_members: RwLock<Vec<CompanyMember>>,
    pub invoices: RwLock<Vec<Invoice>>,
    pub company_reports: RwLock<Vec<CompanyReport>>,
    pub user_reports: RwLock<Vec<UserReport>>,

    pub fail_jobs_query: AtomicBool,
    pub fail_invoices_query: AtomicBool,
    pub fail_members_query: AtomicBool,
    pub fail_job_members_query: AtomicBool,
    pub fail_rates_query: AtomicBool,
    pub fail_report_lookup: AtomicBool,
    pub fail_upsert: AtomicBool,
    /// Job ids whose lookup fails with something other than NotFound.
    pub broken_jobs: RwLock<HashSet<String>>,

    pub upserts: AtomicUsize,
    /// Recomputes between report lookup and upsert, keyed by `kind:owner`.
    in_flight: Mutex<HashMap<String, usize>>,
    /// Highest number of recomputes seen in flight for a single owner.
    pub max_overlap: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job(&self, id: &str, company_id: &str, status: &str, rates: &[&str]) {
        self.jobs.write().unwrap().push(Job {
            id: id.to_string(),
            company_id: company_id.to_string(),
            status: status.to_string(),
            rates: rates.iter().map(|r| r.to_string()).collect(),
        });
    }

    pub fn add_rate(&self, id: &str, job_id: &str, start: &str, end: &str, value: Decimal) {
        self.rates.write().unwrap().push(JobRate {
            id: id.to_string(),
            job_id: job_id.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            rate_value: value,
        });
    }

    pub fn add_job_member(&self, id: &str, job_id: &str, user_id: &str, status: &str) {
        self.job_members.write().unwrap().push(JobMember {
            id: id.to_string(),
            job_id: job_id.to_string(),
            user_id: user_id.to_string(),
            status: status.to_string(),
        });
    }

    pub fn add_company_member(&self, id: &str, company_id: &str, user_id: &str, status: &str) {
        self.company_members.write().unwrap().push(CompanyMember {
            id: id.to_string(),
            company_id: company_id.to_string(),
            user_id: user_id.to_string(),
            status: status.to_string(),
            role: "WORKER".to_string(),
        });
    }

    pub fn add_invoice(&self, id: &str, company_id: &str, status: &str, metadata: Option<Value>) {
        self.invoices.write().unwrap().push(Invoice {
            id: id.to_string(),
            company_id: company_id.to_string(),
            user_id: "u-billed".to_string(),
            status: status.to_string(),
            metadata,
        });
    }

    pub fn set_job_status(&self, job_id: &str, status: &str) {
        let mut jobs = self.jobs.write().unwrap();
        if let Some(job) = jobs.iter_mut().find(|j| j.id == job_id) {
            job.status = status.to_string();
        }
    }

    pub fn remove_job(&self, job_id: &str) {
        self.jobs.write().unwrap().retain(|j| j.id != job_id);
    }

    fn enter(&self, key: String) {
        let mut in_flight = self.in_flight.lock().unwrap();
        let count = in_flight.entry(key).or_insert(0);
        *count += 1;
        self.max_overlap.fetch_max(*count, Ordering::SeqCst);
    }

    fn leave(&self, key: &str) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(count) = in_flight.get_mut(key) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn company_report_rows(&self, company_id: &str) -> Vec<CompanyReport> {
        self.company_reports
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect()
    }

    pub fn user_report_rows(&self, user_id: &str) -> Vec<UserReport> {
        self.user_reports
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl JobRepositoryTrait for InMemoryStore {
    fn get_job(&self, job_id: &str) -> Result<Job> {
        if self.broken_jobs.read().unwrap().contains(job_id) {
            return Err(query_failed("jobs"));
        }
        self.jobs
            .read()
            .unwrap()
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("job {}", job_id))))
    }

    fn list_jobs_by_company(&self, company_id: &str) -> Result<Vec<Job>> {
        if self.fail_jobs_query.load(Ordering::SeqCst) {
            return Err(query_failed("jobs"));
        }
        Ok(self
            .jobs
            .read()
            .unwrap()
            .iter()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect())
    }

    fn list_rates_by_ids(&self, rate_ids: &[String]) -> Result<Vec<JobRate>> {
        if self.fail_rates_query.load(Ordering::SeqCst) {
            return Err(query_failed("job_rates"));
        }
        Ok(self
            .rates
            .read()
            .unwrap()
            .iter()
            .filter(|r| rate_ids.contains(&r.id))
            .cloned()
            .collect())
    }

    fn list_job_members_by_user(&self, user_id: &str) -> Result<Vec<JobMember>> {
        if self.fail_job_members_query.load(Ordering::SeqCst) {
            return Err(query_failed("job_members"));
        }
        Ok(self
            .job_members
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl CompanyMemberRepositoryTrait for InMemoryStore {
    fn list_active_members_by_company(&self, company_id: &str) -> Result<Vec<CompanyMember>> {
        if self.fail_members_query.load(Ordering::SeqCst) {
            return Err(query_failed("company_members"));
        }
        Ok(self
            .company_members
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.company_id == company_id && m.is_active())
            .cloned()
            .collect())
    }

    fn list_active_memberships_by_user(&self, user_id: &str) -> Result<Vec<CompanyMember>> {
        if self.fail_members_query.load(Ordering::SeqCst) {
            return Err(query_failed("company_members"));
        }
        Ok(self
            .company_members
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.is_active())
            .cloned()
            .collect())
    }
}

impl InvoiceRepositoryTrait for InMemoryStore {
    fn list_invoices_by_company(&self, company_id: &str) -> Result<Vec<Invoice>> {
        if self.fail_invoices_query.load(Ordering::SeqCst) {
            return Err(query_failed("invoices"));
        }
        Ok(self
            .invoices
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReportRepositoryTrait for InMemoryStore {
    fn find_company_report(&self, company_id: &str) -> Result<Option<CompanyReport>> {
        self.enter(format!("company:{}", company_id));
        if self.fail_report_lookup.load(Ordering::SeqCst) {
            return Err(query_failed("company_reports"));
        }
        Ok(self
            .company_reports
            .read()
            .unwrap()
            .iter()
            .find(|r| r.company_id == company_id)
            .cloned())
    }

    fn find_user_report(&self, user_id: &str) -> Result<Option<UserReport>> {
        self.enter(format!("user:{}", user_id));
        if self.fail_report_lookup.load(Ordering::SeqCst) {
            return Err(query_failed("user_reports"));
        }
        Ok(self
            .user_reports
            .read()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn upsert_company_report(&self, report: CompanyReport) -> Result<CompanyReport> {
        // Let other tasks run between the read and the write.
        tokio::task::yield_now().await;
        self.leave(&format!("company:{}", report.company_id));
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::TransactionFailed(
                "disk full".to_string(),
            )));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.company_reports.write().unwrap();
        match rows.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report.clone(),
            None => rows.push(report.clone()),
        }
        Ok(report)
    }

    async fn upsert_user_report(&self, report: UserReport) -> Result<UserReport> {
        tokio::task::yield_now().await;
        self.leave(&format!("user:{}", report.user_id));
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::TransactionFailed(
                "disk full".to_string(),
            )));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.user_reports.write().unwrap();
        match rows.iter_mut().find(|r| r.id == report.id) {
            Some(existing) => *existing = report.clone(),
            None => rows.push(report.clone()),
        }
        Ok(report)
    }

    fn list_company_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = Vec::new();
        let jobs = self.jobs.read().unwrap();
        let invoices = self.invoices.read().unwrap();
        let members = self.company_members.read().unwrap();
        for id in jobs
            .iter()
            .map(|j| &j.company_id)
            .chain(invoices.iter().map(|i| &i.company_id))
            .chain(members.iter().map(|m| &m.company_id))
        {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        Ok(ids)
    }

    fn list_user_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = Vec::new();
        let job_members = self.job_members.read().unwrap();
        let members = self.company_members.read().unwrap();
        for id in job_members
            .iter()
            .map(|m| &m.user_id)
            .chain(members.iter().map(|m| &m.user_id))
        {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        Ok(ids)
    }
}

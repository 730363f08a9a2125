use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::companies::CompanyMemberRepositoryTrait;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{EarningsError, Result, ValidationError};
use crate::events::{DiagnosticsSink, ReportDiagnostic};
use crate::jobs::{JobMember, JobRepositoryTrait};

use super::earnings::calculate_earnings;
use super::keyed_lock::KeyedLock;
use super::reports_model::{Earnings, UserReport, UserReportMetrics};
use super::reports_traits::{ReportRepositoryTrait, UserReportServiceTrait};

pub struct UserReportService {
    job_repository: Arc<dyn JobRepositoryTrait>,
    member_repository: Arc<dyn CompanyMemberRepositoryTrait>,
    report_repository: Arc<dyn ReportRepositoryTrait>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    locks: KeyedLock,
}

impl UserReportService {
    pub fn new(
        job_repository: Arc<dyn JobRepositoryTrait>,
        member_repository: Arc<dyn CompanyMemberRepositoryTrait>,
        report_repository: Arc<dyn ReportRepositoryTrait>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        UserReportService {
            job_repository,
            member_repository,
            report_repository,
            diagnostics,
            locks: KeyedLock::new(),
        }
    }

    fn find_or_create(&self, user_id: &str) -> UserReport {
        match self.report_repository.find_user_report(user_id) {
            Ok(Some(report)) => report,
            Ok(None) => {
                debug!("No report yet for user {}, creating one", user_id);
                UserReport::new(user_id)
            }
            Err(e) => {
                self.diagnostics.report(ReportDiagnostic::ReportLookupFailed {
                    owner_id: user_id.to_string(),
                    reason: e.to_string(),
                });
                UserReport::new(user_id)
            }
        }
    }

    /// Adds the hours and earnings a hired member accrued on their job to
    /// `accrued`.
    ///
    /// Every failure below the member level contributes nothing: a missing
    /// job, a job without rates, a failed rate fetch, an unusable interval,
    /// or a rate that would push the totals out of range.
    fn accrue_member_earnings(&self, user_id: &str, member: &JobMember, accrued: &mut Earnings) {
        let job = match self.job_repository.get_job(&member.job_id) {
            Ok(job) => job,
            Err(e) if e.is_not_found() => {
                self.diagnostics.report(ReportDiagnostic::DanglingJob {
                    user_id: user_id.to_string(),
                    job_member_id: member.id.clone(),
                    job_id: member.job_id.clone(),
                });
                return;
            }
            Err(e) => {
                self.diagnostics.report(ReportDiagnostic::JobLookupFailed {
                    user_id: user_id.to_string(),
                    job_id: member.job_id.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        if job.rates.is_empty() {
            return;
        }

        let rates = match self.job_repository.list_rates_by_ids(&job.rates) {
            Ok(rates) => rates,
            Err(e) => {
                self.diagnostics.report(ReportDiagnostic::RateLookupFailed {
                    user_id: user_id.to_string(),
                    job_id: job.id.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        for rate in &rates {
            let next = calculate_earnings(rate).and_then(|earnings| {
                accrued
                    .checked_add(&earnings)
                    .ok_or_else(|| EarningsError::Overflow {
                        rate_id: rate.id.clone(),
                    })
            });
            match next {
                Ok(next) => *accrued = next,
                Err(e) => self
                    .diagnostics
                    .report(ReportDiagnostic::rate_skipped(user_id, &job.id, e)),
            }
        }
    }

    fn compute_metrics(
        &self,
        user_id: &str,
        job_members: &[JobMember],
        active_companies: usize,
    ) -> UserReportMetrics {
        let mut metrics = UserReportMetrics {
            total_jobs: job_members.len() as i64,
            active_companies: active_companies as i64,
            ..Default::default()
        };

        let mut accrued = Earnings::default();
        for member in job_members.iter().filter(|m| m.is_hired()) {
            metrics.hired_jobs += 1;
            self.accrue_member_earnings(user_id, member, &mut accrued);
        }
        metrics.total_hours = accrued.hours.round_dp(DECIMAL_PRECISION);
        metrics.total_earnings = accrued.earnings.round_dp(DECIMAL_PRECISION);

        metrics
    }
}

#[async_trait]
impl UserReportServiceTrait for UserReportService {
    fn get_user_report(&self, user_id: &str) -> Result<Option<UserReport>> {
        self.report_repository.find_user_report(user_id)
    }

    async fn recompute_user_report(&self, user_id: &str) -> Result<UserReport> {
        if user_id.is_empty() {
            return Err(ValidationError::MissingField("userID".to_string()).into());
        }

        let _guard = self.locks.lock(user_id).await;
        debug!("Recomputing report for user {}", user_id);

        let mut report = self.find_or_create(user_id);

        let job_members = self.job_repository.list_job_members_by_user(user_id)?;
        let memberships = self
            .member_repository
            .list_active_memberships_by_user(user_id)?;

        let metrics = self.compute_metrics(user_id, &job_members, memberships.len());
        report.apply(&metrics);

        let saved = self.report_repository.upsert_user_report(report).await?;
        debug!(
            "User {} report saved: {}/{} jobs hired, {} hours, earnings {}, {} active companies",
            user_id,
            saved.hired_jobs,
            saved.total_jobs,
            saved.total_hours,
            saved.total_earnings,
            saved.active_companies
        );
        Ok(saved)
    }
}

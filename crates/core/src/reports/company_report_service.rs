use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::companies::{CompanyMember, CompanyMemberRepositoryTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::events::{DiagnosticsSink, ReportDiagnostic};
use crate::invoices::{Invoice, InvoiceRepositoryTrait};
use crate::jobs::{Job, JobRepositoryTrait};

use super::keyed_lock::KeyedLock;
use super::reports_model::{CompanyReport, CompanyReportMetrics};
use super::reports_traits::{CompanyReportServiceTrait, ReportRepositoryTrait};

pub struct CompanyReportService {
    job_repository: Arc<dyn JobRepositoryTrait>,
    member_repository: Arc<dyn CompanyMemberRepositoryTrait>,
    invoice_repository: Arc<dyn InvoiceRepositoryTrait>,
    report_repository: Arc<dyn ReportRepositoryTrait>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    locks: KeyedLock,
}

impl CompanyReportService {
    pub fn new(
        job_repository: Arc<dyn JobRepositoryTrait>,
        member_repository: Arc<dyn CompanyMemberRepositoryTrait>,
        invoice_repository: Arc<dyn InvoiceRepositoryTrait>,
        report_repository: Arc<dyn ReportRepositoryTrait>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        CompanyReportService {
            job_repository,
            member_repository,
            invoice_repository,
            report_repository,
            diagnostics,
            locks: KeyedLock::new(),
        }
    }

    /// Existing report for the company, or a zero-valued one when the lookup
    /// misses or fails.
    fn find_or_create(&self, company_id: &str) -> CompanyReport {
        match self.report_repository.find_company_report(company_id) {
            Ok(Some(report)) => report,
            Ok(None) => {
                debug!("No report yet for company {}, creating one", company_id);
                CompanyReport::new(company_id)
            }
            Err(e) => {
                self.diagnostics.report(ReportDiagnostic::ReportLookupFailed {
                    owner_id: company_id.to_string(),
                    reason: e.to_string(),
                });
                CompanyReport::new(company_id)
            }
        }
    }

    /// Folds a company's source rows into report metrics.
    ///
    /// Paid invoices without a numeric `Total`, or whose `Total` would push
    /// revenue out of the `Decimal` range, count as paid but add nothing to
    /// revenue.
    pub fn compute_metrics(
        company_id: &str,
        jobs: &[Job],
        active_members: &[CompanyMember],
        invoices: &[Invoice],
        diagnostics: &dyn DiagnosticsSink,
    ) -> CompanyReportMetrics {
        let mut metrics = CompanyReportMetrics {
            total_jobs: jobs.len() as i64,
            total_workers: active_members.len() as i64,
            total_invoices: invoices.len() as i64,
            ..Default::default()
        };

        for job in jobs {
            if job.is_active() {
                metrics.active_jobs += 1;
            } else if job.is_completed() {
                metrics.completed_jobs += 1;
            }
        }

        let mut revenue = Decimal::ZERO;
        for invoice in invoices.iter().filter(|i| i.is_paid()) {
            metrics.paid_invoices += 1;
            let Some(total) = invoice.metadata_total() else {
                diagnostics.report(ReportDiagnostic::InvoiceTotalMissing {
                    company_id: company_id.to_string(),
                    invoice_id: invoice.id.clone(),
                });
                continue;
            };
            match revenue.checked_add(total) {
                Some(sum) => revenue = sum,
                None => diagnostics.report(ReportDiagnostic::RevenueOverflow {
                    company_id: company_id.to_string(),
                    invoice_id: invoice.id.clone(),
                    total: total.to_string(),
                }),
            }
        }
        metrics.total_revenue = revenue.round_dp(DECIMAL_PRECISION);

        metrics
    }
}

#[async_trait]
impl CompanyReportServiceTrait for CompanyReportService {
    fn get_company_report(&self, company_id: &str) -> Result<Option<CompanyReport>> {
        self.report_repository.find_company_report(company_id)
    }

    async fn recompute_company_report(&self, company_id: &str) -> Result<CompanyReport> {
        if company_id.is_empty() {
            return Err(ValidationError::MissingField("companyID".to_string()).into());
        }

        let _guard = self.locks.lock(company_id).await;
        debug!("Recomputing report for company {}", company_id);

        let mut report = self.find_or_create(company_id);

        let jobs = self.job_repository.list_jobs_by_company(company_id)?;
        let members = self
            .member_repository
            .list_active_members_by_company(company_id)?;
        let invoices = self.invoice_repository.list_invoices_by_company(company_id)?;

        let metrics = Self::compute_metrics(
            company_id,
            &jobs,
            &members,
            &invoices,
            self.diagnostics.as_ref(),
        );
        report.apply(&metrics);

        let saved = self.report_repository.upsert_company_report(report).await?;
        debug!(
            "Company {} report saved: {} jobs ({} active, {} completed), {} workers, {}/{} invoices paid, revenue {}",
            company_id,
            saved.total_jobs,
            saved.active_jobs,
            saved.completed_jobs,
            saved.total_workers,
            saved.paid_invoices,
            saved.total_invoices,
            saved.total_revenue
        );
        Ok(saved)
    }
}

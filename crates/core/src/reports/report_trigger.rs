//! Routes record mutations to the report aggregators.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Serialize;

use crate::errors::{Result, ValidationError};
use crate::events::RecordEvent;

use super::reports_model::{RebuildFailure, RebuildSummary, ReportKind};
use super::reports_traits::{
    CompanyReportServiceTrait, ReportRepositoryTrait, ReportTriggerTrait, UserReportServiceTrait,
};

/// Reports a batch of events requires, each id once, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTargets {
    pub company_ids: Vec<String>,
    pub user_ids: Vec<String>,
}

impl ReportTargets {
    pub fn is_empty(&self) -> bool {
        self.company_ids.is_empty() && self.user_ids.is_empty()
    }
}

/// Owning ids an event's resulting record points at.
fn event_targets(event: &RecordEvent) -> (Option<&str>, Option<&str>) {
    match event {
        RecordEvent::JobSaved { job, .. } => (Some(job.company_id.as_str()), None),
        RecordEvent::InvoiceSaved { invoice, .. } => (Some(invoice.company_id.as_str()), None),
        RecordEvent::JobMemberSaved { member, .. } => (None, Some(member.user_id.as_str())),
        RecordEvent::CompanyMemberSaved { member, .. } => (
            Some(member.company_id.as_str()),
            Some(member.user_id.as_str()),
        ),
    }
}

/// Plans the report recomputations for a batch of events.
///
/// Empty ids are dropped here; `ReportTrigger::handle` rejects them instead.
pub fn plan_report_targets(events: &[RecordEvent]) -> ReportTargets {
    let mut seen_companies: HashSet<&str> = HashSet::new();
    let mut seen_users: HashSet<&str> = HashSet::new();
    let mut targets = ReportTargets::default();

    for event in events {
        let (company_id, user_id) = event_targets(event);
        if let Some(id) = company_id.filter(|id| !id.is_empty()) {
            if seen_companies.insert(id) {
                targets.company_ids.push(id.to_string());
            }
        }
        if let Some(id) = user_id.filter(|id| !id.is_empty()) {
            if seen_users.insert(id) {
                targets.user_ids.push(id.to_string());
            }
        }
    }

    targets
}

pub struct ReportTrigger {
    company_reports: Arc<dyn CompanyReportServiceTrait>,
    user_reports: Arc<dyn UserReportServiceTrait>,
    report_repository: Arc<dyn ReportRepositoryTrait>,
}

impl ReportTrigger {
    pub fn new(
        company_reports: Arc<dyn CompanyReportServiceTrait>,
        user_reports: Arc<dyn UserReportServiceTrait>,
        report_repository: Arc<dyn ReportRepositoryTrait>,
    ) -> Self {
        ReportTrigger {
            company_reports,
            user_reports,
            report_repository,
        }
    }

    fn required_id<'a>(id: Option<&'a str>, field: &str) -> Result<Option<&'a str>> {
        match id {
            Some("") => Err(ValidationError::MissingField(field.to_string()).into()),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl ReportTriggerTrait for ReportTrigger {
    /// Recomputes the reports owning the event's record, propagating the
    /// first aggregator error.
    async fn handle(&self, event: &RecordEvent) -> Result<()> {
        let (company_id, user_id) = event_targets(event);
        let company_id = Self::required_id(company_id, "companyID")?;
        let user_id = Self::required_id(user_id, "userID")?;

        debug!(
            "{:?} record in {} -> company {:?}, user {:?}",
            event.action(),
            event.collection(),
            company_id,
            user_id
        );

        if let Some(company_id) = company_id {
            self.company_reports
                .recompute_company_report(company_id)
                .await?;
        }
        if let Some(user_id) = user_id {
            self.user_reports.recompute_user_report(user_id).await?;
        }
        Ok(())
    }

    async fn handle_batch(&self, events: &[RecordEvent]) -> Result<()> {
        let targets = plan_report_targets(events);
        if targets.is_empty() {
            return Ok(());
        }
        debug!(
            "Batch of {} event(s) touches {} company and {} user report(s)",
            events.len(),
            targets.company_ids.len(),
            targets.user_ids.len()
        );

        for company_id in &targets.company_ids {
            self.company_reports
                .recompute_company_report(company_id)
                .await?;
        }
        for user_id in &targets.user_ids {
            self.user_reports.recompute_user_report(user_id).await?;
        }
        Ok(())
    }

    /// Recomputes every company and user report referenced by source data.
    ///
    /// Failures of individual reports are collected, not propagated; only a
    /// failure to list the owners aborts the rebuild.
    async fn rebuild_all(&self, concurrency: usize) -> Result<RebuildSummary> {
        let concurrency = concurrency.max(1);
        let company_ids = self.report_repository.list_company_ids()?;
        let user_ids = self.report_repository.list_user_ids()?;
        info!(
            "Rebuilding {} company and {} user report(s)",
            company_ids.len(),
            user_ids.len()
        );

        let mut summary = RebuildSummary::default();

        let company_reports = self.company_reports.clone();
        let company_results: Vec<(String, Result<()>)> = stream::iter(company_ids)
            .map(move |id| {
                let service = company_reports.clone();
                async move {
                    let result = service.recompute_company_report(&id).await.map(|_| ());
                    (id, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        for (id, result) in company_results {
            match result {
                Ok(()) => summary.companies_rebuilt += 1,
                Err(e) => {
                    warn!("Failed to rebuild report for company {}: {}", id, e);
                    summary.failures.push(RebuildFailure {
                        kind: ReportKind::Company,
                        owner_id: id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let user_reports = self.user_reports.clone();
        let user_results: Vec<(String, Result<()>)> = stream::iter(user_ids)
            .map(move |id| {
                let service = user_reports.clone();
                async move {
                    let result = service.recompute_user_report(&id).await.map(|_| ());
                    (id, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        for (id, result) in user_results {
            match result {
                Ok(()) => summary.users_rebuilt += 1,
                Err(e) => {
                    warn!("Failed to rebuild report for user {}: {}", id, e);
                    summary.failures.push(RebuildFailure {
                        kind: ReportKind::User,
                        owner_id: id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Rebuild complete: {} company, {} user report(s), {} failure(s)",
            summary.companies_rebuilt,
            summary.users_rebuilt,
            summary.failures.len()
        );
        Ok(summary)
    }
}

//! Record mutation events consumed by the report trigger.

use serde::{Deserialize, Serialize};

use crate::companies::CompanyMember;
use crate::invoices::Invoice;
use crate::jobs::{Job, JobMember};

/// Kind of mutation that produced a record event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    Created,
    Updated,
}

/// Emitted by the record store after a create or update succeeded.
///
/// Each variant carries the record as it was persisted, so the trigger can
/// read the owning company or user without another lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordEvent {
    JobSaved { action: RecordAction, job: Job },

    InvoiceSaved {
        action: RecordAction,
        invoice: Invoice,
    },

    JobMemberSaved {
        action: RecordAction,
        member: JobMember,
    },

    /// Derived relationship; affects both the company's worker count and the
    /// user's active company count.
    CompanyMemberSaved {
        action: RecordAction,
        member: CompanyMember,
    },
}

impl RecordEvent {
    pub fn job_saved(action: RecordAction, job: Job) -> Self {
        Self::JobSaved { action, job }
    }

    pub fn invoice_saved(action: RecordAction, invoice: Invoice) -> Self {
        Self::InvoiceSaved { action, invoice }
    }

    pub fn job_member_saved(action: RecordAction, member: JobMember) -> Self {
        Self::JobMemberSaved { action, member }
    }

    pub fn company_member_saved(action: RecordAction, member: CompanyMember) -> Self {
        Self::CompanyMemberSaved { action, member }
    }

    pub fn action(&self) -> RecordAction {
        match self {
            RecordEvent::JobSaved { action, .. }
            | RecordEvent::InvoiceSaved { action, .. }
            | RecordEvent::JobMemberSaved { action, .. }
            | RecordEvent::CompanyMemberSaved { action, .. } => *action,
        }
    }

    /// Source collection name, used in logs.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordEvent::JobSaved { .. } => "jobs",
            RecordEvent::InvoiceSaved { .. } => "invoices",
            RecordEvent::JobMemberSaved { .. } => "job_members",
            RecordEvent::CompanyMemberSaved { .. } => "company_members",
        }
    }
}

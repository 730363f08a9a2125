use crate::errors::Result;
use crate::invoices::invoices_model::Invoice;

/// Read access to invoices.
pub trait InvoiceRepositoryTrait: Send + Sync {
    /// All invoices of a company regardless of status, newest first.
    fn list_invoices_by_company(&self, company_id: &str) -> Result<Vec<Invoice>>;
}

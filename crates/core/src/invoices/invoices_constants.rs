/// Invoice statuses

/// Invoice issued, awaiting payment.
pub const INVOICE_STATUS_PENDING: &str = "PENDING";

/// Invoice settled. Only paid invoices count toward company revenue.
pub const INVOICE_STATUS_PAID: &str = "PAID";

/// Metadata key holding the invoice total.
pub const INVOICE_METADATA_TOTAL_KEY: &str = "Total";

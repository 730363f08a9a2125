//! Invoice domain models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::invoices_constants::{INVOICE_METADATA_TOTAL_KEY, INVOICE_STATUS_PAID};

/// Domain model representing an invoice issued by a company to a worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "companyID")]
    pub company_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub status: String,
    /// Free-form payload written at invoice creation (title, header, content, total).
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == INVOICE_STATUS_PAID
    }

    /// Reads `metadata.Total` as a decimal.
    ///
    /// Returns `None` when the metadata is absent, is not an object, has no
    /// `Total`, or holds a non-numeric `Total` (strings are not coerced).
    pub fn metadata_total(&self) -> Option<Decimal> {
        match self.metadata.as_ref()?.get(INVOICE_METADATA_TOTAL_KEY)? {
            Value::Number(number) => {
                let raw = number.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .ok()
            }
            _ => None,
        }
    }
}

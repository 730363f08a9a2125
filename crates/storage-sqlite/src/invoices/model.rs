//! Database model for invoices.

use diesel::prelude::*;
use log::warn;
use serde_json::Value;

use hirevo_core::invoices::Invoice;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceDB {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    pub status: String,
    /// Free-form JSON document.
    pub metadata: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InvoiceDB> for Invoice {
    fn from(db: InvoiceDB) -> Self {
        let metadata = db.metadata.as_deref().and_then(|raw| {
            serde_json::from_str::<Value>(raw)
                .map_err(|e| warn!("Invoice {} has unreadable metadata: {}", db.id, e))
                .ok()
        });
        Self {
            id: db.id,
            company_id: db.company_id,
            user_id: db.user_id,
            status: db.status,
            metadata,
        }
    }
}

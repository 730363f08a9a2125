use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use hirevo_core::invoices::{Invoice, InvoiceRepositoryTrait};
use hirevo_core::Result;

use super::model::InvoiceDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::invoices;

pub struct InvoiceRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl InvoiceRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        InvoiceRepository { pool }
    }
}

impl InvoiceRepositoryTrait for InvoiceRepository {
    fn list_invoices_by_company(&self, company_id: &str) -> Result<Vec<Invoice>> {
        let mut conn = get_connection(&self.pool)?;
        let invoices_db = invoices::table
            .filter(invoices::company_id.eq(company_id))
            .order(invoices::created_at.desc())
            .select(InvoiceDB::as_select())
            .load::<InvoiceDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(invoices_db.into_iter().map(Invoice::from).collect())
    }
}

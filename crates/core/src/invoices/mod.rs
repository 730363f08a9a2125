//! Invoices module - domain models, constants, and repository traits.

mod invoices_constants;
mod invoices_model;
mod invoices_traits;

pub use invoices_constants::*;
pub use invoices_model::Invoice;
pub use invoices_traits::InvoiceRepositoryTrait;

//! Companies module - membership models, constants, and repository traits.

mod companies_constants;
mod companies_model;
mod companies_traits;

pub use companies_constants::*;
pub use companies_model::CompanyMember;
pub use companies_traits::CompanyMemberRepositoryTrait;

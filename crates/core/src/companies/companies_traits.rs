use crate::companies::companies_model::CompanyMember;
use crate::errors::Result;

/// Read access to company memberships.
pub trait CompanyMemberRepositoryTrait: Send + Sync {
    /// Active members of a company, newest first.
    fn list_active_members_by_company(&self, company_id: &str) -> Result<Vec<CompanyMember>>;
    /// Active memberships held by a user, newest first.
    fn list_active_memberships_by_user(&self, user_id: &str) -> Result<Vec<CompanyMember>>;
}

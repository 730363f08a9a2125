//! Company membership domain models.

use serde::{Deserialize, Serialize};

use super::companies_constants::COMPANY_MEMBER_STATUS_ACTIVE;

/// Link between a user and a company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyMember {
    pub id: String,
    #[serde(rename = "companyID")]
    pub company_id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub status: String,
    pub role: String,
}

impl CompanyMember {
    pub fn is_active(&self) -> bool {
        self.status == COMPANY_MEMBER_STATUS_ACTIVE
    }
}

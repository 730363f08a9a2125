/// Company member statuses

/// Member currently works for the company.
pub const COMPANY_MEMBER_STATUS_ACTIVE: &str = "ACTIVE";

/// Member left or was removed from the company.
pub const COMPANY_MEMBER_STATUS_INACTIVE: &str = "INACTIVE";

// Company member roles

/// Member who created the company.
pub const COMPANY_MEMBER_ROLE_OWNER: &str = "OWNER";

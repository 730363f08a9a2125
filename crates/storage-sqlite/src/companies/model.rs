//! Database model for company memberships.

use diesel::prelude::*;

use hirevo_core::companies::CompanyMember;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::company_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyMemberDB {
    pub id: String,
    pub company_id: String,
    pub user_id: String,
    pub status: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CompanyMemberDB> for CompanyMember {
    fn from(db: CompanyMemberDB) -> Self {
        Self {
            id: db.id,
            company_id: db.company_id,
            user_id: db.user_id,
            status: db.status,
            role: db.role,
        }
    }
}

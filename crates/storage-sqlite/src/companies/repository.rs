use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use hirevo_core::companies::{
    CompanyMember, CompanyMemberRepositoryTrait, COMPANY_MEMBER_STATUS_ACTIVE,
};
use hirevo_core::Result;

use super::model::CompanyMemberDB;
use crate::db::get_connection;
use crate::errors::StorageError;
use crate::schema::company_members;
use crate::schema::company_members::dsl::*;

pub struct CompanyMemberRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl CompanyMemberRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        CompanyMemberRepository { pool }
    }
}

impl CompanyMemberRepositoryTrait for CompanyMemberRepository {
    fn list_active_members_by_company(&self, company: &str) -> Result<Vec<CompanyMember>> {
        let mut conn = get_connection(&self.pool)?;
        let members_db = company_members
            .filter(company_id.eq(company))
            .filter(status.eq(COMPANY_MEMBER_STATUS_ACTIVE))
            .order(created_at.desc())
            .select(CompanyMemberDB::as_select())
            .load::<CompanyMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(members_db.into_iter().map(CompanyMember::from).collect())
    }

    fn list_active_memberships_by_user(&self, user: &str) -> Result<Vec<CompanyMember>> {
        let mut conn = get_connection(&self.pool)?;
        let members_db = company_members::table
            .filter(user_id.eq(user))
            .filter(status.eq(COMPANY_MEMBER_STATUS_ACTIVE))
            .order(created_at.desc())
            .select(CompanyMemberDB::as_select())
            .load::<CompanyMemberDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(members_db.into_iter().map(CompanyMember::from).collect())
    }
}

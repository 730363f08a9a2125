//! Database models for jobs, rate intervals and job members.

use diesel::prelude::*;
use log::warn;
use serde_json::Value;

use hirevo_core::jobs::{Job, JobMember, JobRate};

use crate::utils::parse_decimal_column;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::jobs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobDB {
    pub id: String,
    pub company_id: String,
    pub status: String,
    /// JSON array of rate ids.
    pub rates: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Decodes the stored rate id list. Non-string entries are dropped and a
/// malformed column reads as an empty list.
fn decode_rate_ids(job_id: &str, raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) if !id.is_empty() => Some(id),
                _ => None,
            })
            .collect(),
        Ok(_) | Err(_) => {
            warn!("Job {} has an unreadable rates column: {}", job_id, raw);
            Vec::new()
        }
    }
}

impl From<JobDB> for Job {
    fn from(db: JobDB) -> Self {
        let rates = decode_rate_ids(&db.id, &db.rates);
        Self {
            id: db.id,
            company_id: db.company_id,
            status: db.status,
            rates,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::job_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobRateDB {
    pub id: String,
    pub job_id: String,
    pub start_time: String,
    pub end_time: String,
    pub rate_value: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<JobRateDB> for JobRate {
    fn from(db: JobRateDB) -> Self {
        let rate_value = parse_decimal_column(&db.rate_value, "rate_value", &db.id);
        Self {
            id: db.id,
            job_id: db.job_id,
            start_time: db.start_time,
            end_time: db.end_time,
            rate_value,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::job_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobMemberDB {
    pub id: String,
    pub job_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<JobMemberDB> for JobMember {
    fn from(db: JobMemberDB) -> Self {
        Self {
            id: db.id,
            job_id: db.job_id,
            user_id: db.user_id,
            status: db.status,
        }
    }
}

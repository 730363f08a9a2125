//! Unit tests for the user report service.

use super::reports_traits::UserReportServiceTrait;
use super::test_support::InMemoryStore;
use super::user_report_service::UserReportService;
use crate::companies::{COMPANY_MEMBER_STATUS_ACTIVE, COMPANY_MEMBER_STATUS_INACTIVE};
use crate::errors::{DatabaseError, EarningsError, Error};
use crate::events::{MockDiagnosticsSink, ReportDiagnostic};
use crate::jobs::{
    JOB_MEMBER_STATUS_APPLIED, JOB_MEMBER_STATUS_HIRED, JOB_MEMBER_STATUS_REJECTED,
    JOB_STATUS_HIRING,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn service_for(store: &Arc<InMemoryStore>) -> (UserReportService, MockDiagnosticsSink) {
    let sink = MockDiagnosticsSink::new();
    let service = UserReportService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(sink.clone()),
    );
    (service, sink)
}

/// User u1: hired on j1 (2h @ 25 + 30min @ 40) and j2 (3h @ 20), applied to
/// j3, rejected from j4; active in two companies, inactive in one.
fn seed_worker(store: &InMemoryStore) {
    store.add_job("j1", "c1", JOB_STATUS_HIRING, &["r1", "r2"]);
    store.add_rate("r1", "j1", "2025-03-01T09:00:00Z", "2025-03-01T11:00:00Z", dec!(25));
    store.add_rate("r2", "j1", "2025-03-02 09:00:00.000Z", "2025-03-02 09:30:00.000Z", dec!(40));
    store.add_job("j2", "c2", JOB_STATUS_HIRING, &["r3"]);
    store.add_rate("r3", "j2", "2025-03-03T13:00:00Z", "2025-03-03T16:00:00Z", dec!(20));
    store.add_job("j3", "c1", JOB_STATUS_HIRING, &[]);
    store.add_job("j4", "c3", JOB_STATUS_HIRING, &["r4"]);
    store.add_rate("r4", "j4", "2025-03-04T09:00:00Z", "2025-03-04T17:00:00Z", dec!(99));

    store.add_job_member("jm1", "j1", "u1", JOB_MEMBER_STATUS_HIRED);
    store.add_job_member("jm2", "j2", "u1", JOB_MEMBER_STATUS_HIRED);
    store.add_job_member("jm3", "j3", "u1", JOB_MEMBER_STATUS_APPLIED);
    store.add_job_member("jm4", "j4", "u1", JOB_MEMBER_STATUS_REJECTED);
    store.add_job_member("jm5", "j1", "u2", JOB_MEMBER_STATUS_HIRED);

    store.add_company_member("cm1", "c1", "u1", COMPANY_MEMBER_STATUS_ACTIVE);
    store.add_company_member("cm2", "c2", "u1", COMPANY_MEMBER_STATUS_ACTIVE);
    store.add_company_member("cm3", "c3", "u1", COMPANY_MEMBER_STATUS_INACTIVE);
}

#[tokio::test]
async fn test_user_report_totals() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.user_id, "u1");
    assert_eq!(report.total_jobs, 4);
    assert_eq!(report.hired_jobs, 2);
    assert_eq!(report.total_hours, dec!(5.5));
    assert_eq!(report.total_earnings, dec!(130));
    assert_eq!(report.active_companies, 2);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_find_or_create_and_idempotence() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    let (service, _) = service_for(&store);

    let first = service.recompute_user_report("u1").await.unwrap();
    let second = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(store.user_report_rows("u1").len(), 1);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(service.get_user_report("u1").unwrap(), Some(second));
}

#[tokio::test]
async fn test_dangling_job_still_counts_as_hired() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    store.remove_job("j2");
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.hired_jobs, 2);
    assert_eq!(report.total_hours, dec!(2.5));
    assert_eq!(report.total_earnings, dec!(70));
    assert_eq!(
        sink.diagnostics(),
        vec![ReportDiagnostic::DanglingJob {
            user_id: "u1".to_string(),
            job_member_id: "jm2".to_string(),
            job_id: "j2".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_job_lookup_error_degrades_instead_of_failing() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    store.broken_jobs.write().unwrap().insert("j1".to_string());
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.hired_jobs, 2);
    assert_eq!(report.total_hours, dec!(3));
    assert_eq!(report.total_earnings, dec!(60));
    assert!(matches!(
        sink.diagnostics().as_slice(),
        [ReportDiagnostic::JobLookupFailed { job_id, .. }] if job_id == "j1"
    ));
}

#[tokio::test]
async fn test_rate_fetch_failure_degrades_instead_of_failing() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    store.fail_rates_query.store(true, Ordering::SeqCst);
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.hired_jobs, 2);
    assert_eq!(report.total_hours, Decimal::ZERO);
    assert_eq!(report.total_earnings, Decimal::ZERO);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_bad_rate_intervals_are_skipped() {
    let store = Arc::new(InMemoryStore::new());
    store.add_job("j1", "c1", JOB_STATUS_HIRING, &["good", "garbled", "inverted"]);
    store.add_rate("good", "j1", "2025-03-01T09:00:00Z", "2025-03-01T10:00:00Z", dec!(30));
    store.add_rate("garbled", "j1", "next tuesday", "2025-03-01T10:00:00Z", dec!(30));
    store.add_rate("inverted", "j1", "2025-03-01T18:00:00Z", "2025-03-01T10:00:00Z", dec!(30));
    store.add_job_member("jm1", "j1", "u1", JOB_MEMBER_STATUS_HIRED);
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.total_hours, dec!(1));
    assert_eq!(report.total_earnings, dec!(30));

    let errors: Vec<EarningsError> = sink
        .diagnostics()
        .into_iter()
        .filter_map(|d| match d {
            ReportDiagnostic::RateSkipped { error, .. } => error,
            _ => None,
        })
        .collect();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], EarningsError::InvalidTimestamp { .. }));
    assert!(matches!(errors[1], EarningsError::InvertedInterval { .. }));
}

#[tokio::test]
async fn test_hired_job_without_rates_adds_no_hours() {
    let store = Arc::new(InMemoryStore::new());
    store.add_job("j1", "c1", JOB_STATUS_HIRING, &[]);
    store.add_job("j2", "c1", JOB_STATUS_HIRING, &["deleted-rate"]);
    store.add_job_member("jm1", "j1", "u1", JOB_MEMBER_STATUS_HIRED);
    store.add_job_member("jm2", "j2", "u1", JOB_MEMBER_STATUS_HIRED);
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.hired_jobs, 2);
    assert_eq!(report.total_hours, Decimal::ZERO);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_top_level_query_failures_are_fatal() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    store.fail_job_members_query.store(true, Ordering::SeqCst);
    let (service, _) = service_for(&store);
    let err = service.recompute_user_report("u1").await.unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));

    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    store.fail_members_query.store(true, Ordering::SeqCst);
    let (service, _) = service_for(&store);
    let err = service.recompute_user_report("u1").await.unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::QueryFailed(_))));
    assert!(store.user_report_rows("u1").is_empty());
}

#[tokio::test]
async fn test_user_without_sources_gets_zero_report() {
    let store = Arc::new(InMemoryStore::new());
    let (service, _) = service_for(&store);

    let report = service.recompute_user_report("newcomer").await.unwrap();
    assert_eq!(report.total_jobs, 0);
    assert_eq!(report.hired_jobs, 0);
    assert_eq!(report.total_hours, Decimal::ZERO);
    assert_eq!(report.active_companies, 0);
}

#[tokio::test]
async fn test_hours_are_rounded_to_storage_precision() {
    let store = Arc::new(InMemoryStore::new());
    store.add_job("j1", "c1", JOB_STATUS_HIRING, &["r1"]);
    // One second: 1/3600 h is a repeating decimal.
    store.add_rate("r1", "j1", "2025-03-01T09:00:00Z", "2025-03-01T09:00:01Z", dec!(36));
    store.add_job_member("jm1", "j1", "u1", JOB_MEMBER_STATUS_HIRED);
    let (service, _) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();
    assert_eq!(report.total_hours, dec!(0.000278));
    assert_eq!(report.total_earnings, dec!(0.01));
}

#[tokio::test]
async fn test_recomputes_for_one_user_never_interleave() {
    let store = Arc::new(InMemoryStore::new());
    seed_worker(&store);
    let (service, _) = service_for(&store);
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.recompute_user_report("u1").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.max_overlap.load(Ordering::SeqCst), 1);
    assert_eq!(store.user_report_rows("u1").len(), 1);
}

#[tokio::test]
async fn test_earnings_overflow_skips_the_rate() {
    let store = Arc::new(InMemoryStore::new());
    store.add_job("j1", "c1", JOB_STATUS_HIRING, &["r1", "r2"]);
    // 876600 hours each; either rate alone fits, the sum does not.
    let rate = dec!(50000000000000000000000);
    store.add_rate("r1", "j1", "1925-01-01T00:00:00Z", "2025-01-01T00:00:00Z", rate);
    store.add_rate("r2", "j1", "1925-01-01T00:00:00Z", "2025-01-01T00:00:00Z", rate);
    store.add_job_member("jm1", "j1", "u1", JOB_MEMBER_STATUS_HIRED);
    let (service, sink) = service_for(&store);

    let report = service.recompute_user_report("u1").await.unwrap();

    assert_eq!(report.total_hours, dec!(876600));
    assert_eq!(report.total_earnings, dec!(876600) * rate);

    let errors: Vec<EarningsError> = sink
        .diagnostics()
        .into_iter()
        .filter_map(|d| match d {
            ReportDiagnostic::RateSkipped { error, .. } => error,
            _ => None,
        })
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        EarningsError::Overflow { rate_id } if rate_id == "r2"
    ));
}

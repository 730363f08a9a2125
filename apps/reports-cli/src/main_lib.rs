use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hirevo_core::events::{DiagnosticsSink, LogDiagnosticsSink};
use hirevo_core::reports::{
    CompanyReportService, ReportRepositoryTrait, ReportTrigger, UserReportService,
};
use hirevo_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, CompanyMemberRepository, InvoiceRepository,
    JobRepository, ReportRepository,
};

use crate::config::Config;

/// Services the commands run against.
pub struct Engine {
    pub company_reports: Arc<CompanyReportService>,
    pub user_reports: Arc<UserReportService>,
    pub trigger: ReportTrigger,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_engine(config: &Config) -> anyhow::Result<Engine> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone());

    let job_repository = Arc::new(JobRepository::new(pool.clone()));
    let member_repository = Arc::new(CompanyMemberRepository::new(pool.clone()));
    let invoice_repository = Arc::new(InvoiceRepository::new(pool.clone()));
    let report_repository: Arc<dyn ReportRepositoryTrait> =
        Arc::new(ReportRepository::new(pool, writer));
    let diagnostics: Arc<dyn DiagnosticsSink> = Arc::new(LogDiagnosticsSink);

    let company_reports = Arc::new(CompanyReportService::new(
        job_repository.clone(),
        member_repository.clone(),
        invoice_repository,
        report_repository.clone(),
        diagnostics.clone(),
    ));
    let user_reports = Arc::new(UserReportService::new(
        job_repository,
        member_repository,
        report_repository.clone(),
        diagnostics,
    ));
    let trigger = ReportTrigger::new(
        company_reports.clone(),
        user_reports.clone(),
        report_repository,
    );

    Ok(Engine {
        company_reports,
        user_reports,
        trigger,
    })
}

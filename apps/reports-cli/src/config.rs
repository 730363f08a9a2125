pub const DEFAULT_DB_PATH: &str = "./db/app.db";
pub const DEFAULT_REBUILD_CONCURRENCY: usize = 4;

pub struct Config {
    pub db_path: String,
    pub log_format: String,
    pub rebuild_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path = std::env::var("HV_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
        let log_format = std::env::var("HV_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        let rebuild_concurrency =
            parse_concurrency(std::env::var("HV_REBUILD_CONCURRENCY").ok().as_deref());
        Self {
            db_path,
            log_format,
            rebuild_concurrency,
        }
    }
}

/// Missing, malformed or zero values fall back to the default.
fn parse_concurrency(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_REBUILD_CONCURRENCY)
}

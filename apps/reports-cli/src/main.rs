mod config;
mod main_lib;

use std::io::Read;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use config::Config;
use hirevo_core::events::RecordEvent;
use hirevo_core::reports::{
    plan_report_targets, CompanyReportServiceTrait, ReportTriggerTrait, UserReportServiceTrait,
};
use main_lib::{build_engine, init_tracing};

#[derive(Parser)]
#[command(name = "hirevo-reports")]
#[command(about = "Recompute Hirevo company and worker reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompute and print the report of one company
    Company {
        /// Company id
        id: String,

        /// Print the stored report without recomputing it
        #[arg(long)]
        cached: bool,
    },

    /// Recompute and print the report of one worker
    User {
        /// User id
        id: String,

        /// Print the stored report without recomputing it
        #[arg(long)]
        cached: bool,
    },

    /// Recompute the reports touched by a JSON array of record events
    Apply {
        /// Path to the events file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        file: String,
    },

    /// Recompute every company and worker report
    Rebuild {
        /// Reports recomputed in parallel (defaults to HV_REBUILD_CONCURRENCY)
        #[arg(short, long)]
        concurrency: Option<usize>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_events(file: &str) -> anyhow::Result<Vec<RecordEvent>> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?
    };
    serde_json::from_str(&raw).context("events must be a JSON array of record events")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let engine = build_engine(&config)?;

    match cli.command {
        Commands::Company { id, cached } => {
            if cached {
                print_json(&engine.company_reports.get_company_report(&id)?)?;
            } else {
                print_json(&engine.company_reports.recompute_company_report(&id).await?)?;
            }
        }
        Commands::User { id, cached } => {
            if cached {
                print_json(&engine.user_reports.get_user_report(&id)?)?;
            } else {
                print_json(&engine.user_reports.recompute_user_report(&id).await?)?;
            }
        }
        Commands::Apply { file } => {
            let events = read_events(&file)?;
            tracing::info!("Applying {} record events", events.len());
            engine.trigger.handle_batch(&events).await?;
            let targets = plan_report_targets(&events);
            print_json(&targets)?;
        }
        Commands::Rebuild { concurrency } => {
            let concurrency = concurrency
                .filter(|n| *n > 0)
                .unwrap_or(config.rebuild_concurrency);
            let summary = engine.trigger.rebuild_all(concurrency).await?;
            for failure in &summary.failures {
                tracing::warn!(
                    "Rebuild failed for {:?} {}: {}",
                    failure.kind,
                    failure.owner_id,
                    failure.reason
                );
            }
            print_json(&summary)?;
        }
    }

    Ok(())
}

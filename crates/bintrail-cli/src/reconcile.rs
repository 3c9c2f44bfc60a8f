use std::{fs, path::PathBuf};

use bintrail_backend::{BackendClient, BinaryDescriptor};
use bintrail_core::{
    cache::NoopCache,
    ingest::{ingest_notification, IngestOutcome},
    reconcile::{reconcile, ReconcileSummary},
    timestamp::parse_timestamp,
};
use bintrail_db::{repository::CatalogRepository, DbConnection, DbError};
use chrono::Utc;
use miette::{bail, IntoDiagnostic, WrapErr};
use tracing::info;

use crate::{cli::Args, config::Config, utils::parse_target};

pub fn run_reconcile(
    db: &mut DbConnection,
    config: &Config,
    args: &Args,
    target: &str,
    key: Option<String>,
    payload: Option<PathBuf>,
    time: Option<String>,
) -> miette::Result<()> {
    let (project, name) = parse_target(target)?;
    let repository = CatalogRepository::find_or_create_repository(db.conn(), &project, &name)
        .map_err(DbError::from)?;

    let logical_time = match time {
        Some(raw) => parse_timestamp(&raw)?,
        None => Utc::now(),
    };

    let backend = BackendClient::new(&config.backend_url)?;

    let summary = if let Some(path) = payload {
        let raw = fs::read_to_string(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading payload file {}", path.display()))?;
        let descriptors: Vec<BinaryDescriptor> = serde_json::from_str(&raw)
            .into_diagnostic()
            .wrap_err_with(|| format!("parsing payload file {}", path.display()))?;

        reconcile(
            db.conn(),
            &repository,
            &descriptors,
            logical_time,
            &backend,
            &NoopCache,
        )?
    } else if let Some(key) = key {
        match ingest_notification(
            db.conn(),
            &backend,
            &backend,
            &repository,
            &key,
            logical_time,
            &NoopCache,
        )? {
            IngestOutcome::Reconciled(summary) => summary,
            IngestOutcome::PayloadMissing => return Ok(()),
        }
    } else {
        bail!("Provide either --key or --payload");
    };

    print_summary(args, &summary)?;
    Ok(())
}

fn print_summary(args: &Args, summary: &ReconcileSummary) -> miette::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(summary).into_diagnostic()?);
    } else if summary.is_noop() {
        info!("Nothing changed");
    }
    Ok(())
}

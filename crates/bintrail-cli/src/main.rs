use bintrail_db::DbConnection;
use clap::Parser;

use crate::{
    cli::{Args, Commands},
    config::Config,
    list::{list_releases, list_repositories, show_release},
    logging::setup_logging,
    reconcile::run_reconcile,
};

mod cli;
mod config;
mod list;
mod logging;
mod reconcile;
mod utils;

fn main() -> miette::Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    let config = Config::load(args.config.as_deref())?;
    let db_path = args.db.clone().unwrap_or_else(|| config.db_path.clone());
    let mut db = DbConnection::open(&db_path)?;

    match &args.command {
        Commands::Reconcile {
            target,
            key,
            payload,
            time,
        } => run_reconcile(
            &mut db,
            &config,
            &args,
            target,
            key.clone(),
            payload.clone(),
            time.clone(),
        )?,
        Commands::List { target, history } => list_releases(&mut db, &args, target, *history)?,
        Commands::Show { id } => show_release(&mut db, *id)?,
        Commands::Repos => list_repositories(&mut db)?,
    }

    Ok(())
}

use bintrail_core::{error::Error, identity::ReleaseIdentity, projection::render_release};
use bintrail_db::{
    repository::{CatalogRepository, ReleaseRepository},
    DbConnection, DbError,
};
use miette::IntoDiagnostic;
use nu_ansi_term::Color::{Green, Yellow};
use tracing::info;

use crate::{cli::Args, utils::parse_target};

pub fn list_releases(
    db: &mut DbConnection,
    args: &Args,
    target: &str,
    history: bool,
) -> miette::Result<()> {
    let (project, name) = parse_target(target)?;
    let repository = CatalogRepository::find_repository(db.conn(), &project, &name)
        .map_err(DbError::from)?
        .ok_or(Error::UnknownRepository { project, name })?;

    let records = ReleaseRepository::list_for_repository(db.conn(), repository.id, history)
        .map_err(DbError::from)?;

    if args.json {
        let mut rendered = Vec::with_capacity(records.len());
        for record in &records {
            rendered.push(render_release(db.conn(), &repository, record)?);
        }
        println!("{}", serde_json::to_string_pretty(&rendered).into_diagnostic()?);
        return Ok(());
    }

    for record in &records {
        let identity = ReleaseIdentity::of_record(record);
        let state = match &record.obsolete_time {
            Some(time) => Yellow.paint(format!("obsolete since {time}")),
            None => Green.paint("live".to_string()),
        };
        info!(
            id = record.id,
            operation = record.operation,
            releasetime = record.releasetime,
            "{:>6}  {:<8} {}  released {}  [{}]",
            record.id,
            record.operation,
            identity,
            record.releasetime,
            state,
        );
    }
    info!("{} records", records.len());

    Ok(())
}

pub fn show_release(db: &mut DbConnection, id: i32) -> miette::Result<()> {
    let record = ReleaseRepository::find_by_id(db.conn(), id)
        .map_err(DbError::from)?
        .ok_or(Error::RecordNotFound(id))?;
    let repository = CatalogRepository::find_repository_by_id(db.conn(), record.repository_id)
        .map_err(DbError::from)?
        .ok_or(Error::RecordNotFound(id))?;

    let value = render_release(db.conn(), &repository, &record)?;
    println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);

    Ok(())
}

pub fn list_repositories(db: &mut DbConnection) -> miette::Result<()> {
    let repositories = CatalogRepository::list_repositories(db.conn()).map_err(DbError::from)?;

    for repository in &repositories {
        let live = ReleaseRepository::count_live(db.conn(), repository.id).map_err(DbError::from)?;
        info!(
            project = repository.project,
            repository = repository.name,
            "{}/{}  ({} live records)",
            repository.project,
            repository.name,
            live,
        );
    }

    Ok(())
}

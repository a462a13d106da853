#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::io;

use anyhow::Context;
use clap::Parser;

use realty_domain::Service;
use realty_storage::Sqlite;

use crate::{cli::Args, settings::Settings, shell::Shell};

mod chart;
mod cli;
mod log;
mod render;
mod settings;
mod shell;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    log::init(log::level(args.verbose))?;

    let mut settings = match args.config.or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    if args.database.is_some() {
        settings.database = args.database;
    }
    if args.chart.is_some() {
        settings.chart_path = args.chart;
    }

    let database = settings.database_path();
    let sqlite = Sqlite::new(&database);
    sqlite
        .ensure_schema()
        .with_context(|| format!("failed to prepare database {}", database.display()))?;
    ::log::info!("using database {}", database.display());

    let mut shell = Shell::new(
        Service::new(sqlite),
        io::stdout().lock(),
        settings.chart_path(),
    );
    shell.run(io::stdin().lock())?;

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "realty", version, about = "Manage flats and clients of a real estate agency")]
pub struct Args {
    /// Settings file (JSON)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the settings
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Output file of the availability chart, overrides the settings
    #[arg(long, value_name = "PATH")]
    pub chart: Option<PathBuf>,

    /// Increase the log level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

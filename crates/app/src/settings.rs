use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DATABASE_FILE: &str = "realestate_db.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";
pub const CHART_FILE: &str = "flats_availability.svg";

/// Settings read from a JSON file.
///
/// `host`, `user` and `password` are the connection parameters of a database
/// server. They are accepted for compatibility but not needed to open a
/// SQLite database.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub chart_path: Option<PathBuf>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Settings {
    /// Read the settings from the given file, or use the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings found at {}", path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if settings.host.is_some() || settings.user.is_some() || settings.password.is_some() {
            debug!("ignoring server connection parameters, database is a local file");
        }
        Ok(settings)
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(|| {
            project_dirs().map_or_else(
                || PathBuf::from(DATABASE_FILE),
                |dirs| dirs.data_dir().join(DATABASE_FILE),
            )
        })
    }

    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.chart_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CHART_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "realty", "realty")
}

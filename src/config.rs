use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{Result, TodoError};
use crate::ui::Route;

const DEFAULT_CONFIG_FILE: &str = "todoers.json";
const DEFAULT_DATABASE: &str = "todos.db";
const DEFAULT_LOG_FILE: &str = "todoers.log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "todoers", version, about = "Terminal to-do list backed by SQLite")]
pub struct Cli {
    /// JSON config file; `todoers.json` in the working directory is used if present.
    #[arg(long, env = "TODOERS_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, env = "TODOERS_DB")]
    pub db: Option<PathBuf>,

    /// Where log lines go; the terminal itself is taken by the UI.
    #[arg(long, env = "TODOERS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Default log filter. `RUST_LOG` wins when set.
    #[arg(long, env = "TODOERS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Screen to open first, e.g. `todo_list` or `add_edit_todo/-1`.
    #[arg(long, default_value = "todo_list")]
    pub route: Route,
}

/// Shape of the optional JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Settings after merging flags/env over the config file over defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub start_route: Route,
}

impl AppConfig {
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) if !path.exists() => {
                return Err(TodoError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            Some(path) => FileConfig::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: Cli, file: FileConfig) -> Self {
        Self {
            database_path: cli
                .db
                .or(file.database_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            log_file: cli
                .log_file
                .or(file.log_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: cli
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            start_route: cli.route,
        }
    }
}

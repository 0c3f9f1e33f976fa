//! Command line surface and the resolved settings the application runs with.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::db::default_db_path;

const LOG_FILE_NAME: &str = "prof-simulator.log";

/// Premade window and database flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppKind {
    /// Teacher console seeded from the bundled manifests.
    ProfSimulator,
    /// Empty window over an untouched database.
    Blank,
}

/// Window dimensions in terminal cells, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("window size must look like WIDTHxHEIGHT, got `{0}`")]
pub struct ParseSizeError(String);

impl FromStr for WindowSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSizeError(s.to_string());
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
        let width: u16 = width.trim().parse().map_err(|_| err())?;
        let height: u16 = height.trim().parse().map_err(|_| err())?;
        if width == 0 || height == 0 {
            return Err(err());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Prof Simulator teacher console")]
pub struct Cli {
    /// Title shown at the top of the window.
    #[arg(long, default_value = "PROF SIMULATOR")]
    pub title: String,

    /// Largest area the window may occupy, as WIDTHxHEIGHT cells.
    #[arg(long, default_value = "100x30")]
    pub size: WindowSize,

    /// SQLite file to open. Defaults to ~/.prof-simulator/prof_simulator.sqlite.
    #[arg(long)]
    pub database: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = AppKind::ProfSimulator)]
    pub kind: AppKind,

    /// Folder holding the seed manifests and the pics/ directory.
    #[arg(long, default_value = "seed")]
    pub seed_dir: PathBuf,

    /// Where tracing output goes. Defaults to a file next to the database.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub size: WindowSize,
    pub database_path: PathBuf,
    pub kind: AppKind,
    pub seed_dir: PathBuf,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Fill in the defaults the command line leaves open.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let database_path = match cli.database {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_file = cli
            .log_file
            .unwrap_or_else(|| database_path.with_file_name(LOG_FILE_NAME));

        Ok(Self {
            title: cli.title,
            size: cli.size,
            database_path,
            kind: cli.kind,
            seed_dir: cli.seed_dir,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_window_size() {
        assert_eq!(
            "500x500".parse::<WindowSize>(),
            Ok(WindowSize {
                width: 500,
                height: 500
            })
        );
        assert_eq!(
            " 80X24 ".parse::<WindowSize>(),
            Ok(WindowSize {
                width: 80,
                height: 24
            })
        );
        assert!("500".parse::<WindowSize>().is_err());
        assert!("0x10".parse::<WindowSize>().is_err());
        assert!("axb".parse::<WindowSize>().is_err());
    }

    #[test]
    fn log_file_defaults_next_to_database() {
        let cli = Cli::parse_from([
            "prof-simulator",
            "--database",
            "/tmp/school/db.sqlite",
            "--kind",
            "blank",
        ]);
        let config = AppConfig::from_cli(cli).unwrap();
        assert_eq!(config.kind, AppKind::Blank);
        assert_eq!(config.log_file, PathBuf::from("/tmp/school/prof-simulator.log"));
        assert_eq!(config.seed_dir, PathBuf::from("seed"));
        assert_eq!(config.size.to_string(), "100x30");
    }
}

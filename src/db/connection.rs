use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".prof-simulator";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "prof_simulator.sqlite";

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// A database that has never been written to needs seeding. SQLite leaves a
/// zero byte file behind after the first open, so both cases count as fresh.
pub fn is_fresh(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true)
}

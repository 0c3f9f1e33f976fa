//! First-run population of an empty database from the bundled seed folder.
//!
//! Layout of a seed folder:
//! - `tables_generation.csv`: `table, column definitions`
//! - `tables_population.csv`: `table, column list, value list`
//! - `pics/`: image files bound into the `images` table
//!
//! Every statement commits on its own. A failing row stops the run and leaves
//! whatever was already written in place.

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::store::DataStore;
use super::value::Value;

pub const TABLES_GENERATION: &str = "tables_generation.csv";
pub const TABLES_POPULATION: &str = "tables_population.csv";
pub const PICTURES_DIR: &str = "pics";

pub const IMAGES_TABLE: &str = "images";
pub const IMAGE_COLUMN: &str = "image";
pub const IMAGE_KEY_COLUMN: &str = "image_id";

/// Counters returned by [`seed_database`] for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub tables: usize,
    pub rows: usize,
    pub images: usize,
}

/// Create the tables, insert the rows, then attach the pictures.
pub fn seed_database(store: &DataStore, seed_dir: &Path) -> Result<SeedReport> {
    info!(seed_dir = %seed_dir.display(), "seeding database");

    let tables = create_tables(store, &seed_dir.join(TABLES_GENERATION))?;
    let rows = populate_tables(store, &seed_dir.join(TABLES_POPULATION))?;
    let images = bind_images(store, &seed_dir.join(PICTURES_DIR))?;

    let report = SeedReport {
        tables,
        rows,
        images,
    };
    info!(?report, "seeding finished");
    Ok(report)
}

/// Run one `CREATE TABLE` per manifest line, in file order.
pub fn create_tables(store: &DataStore, manifest: &Path) -> Result<usize> {
    let mut reader = manifest_reader(manifest)?;
    let mut created = 0;

    for (line, record) in reader.deserialize::<(String, String)>().enumerate() {
        let (table, columns) = record
            .with_context(|| format!("malformed line {} in {}", line + 1, manifest.display()))?;
        store
            .create_table(&table, &columns)
            .with_context(|| format!("failed to create table {table}"))?;
        created += 1;
    }

    Ok(created)
}

/// Insert one row per manifest line. The value list is split on `", "` and
/// each field converted with [`Value::parse_scalar`].
pub fn populate_tables(store: &DataStore, manifest: &Path) -> Result<usize> {
    let mut reader = manifest_reader(manifest)?;
    let mut inserted = 0;

    for (line, record) in reader.deserialize::<(String, String, String)>().enumerate() {
        let (table, columns, values) = record
            .with_context(|| format!("malformed line {} in {}", line + 1, manifest.display()))?;
        let values = Value::parse_list(&values);
        store
            .insert_row(&table, &columns, &values)
            .with_context(|| format!("failed to insert row {} into {table}", line + 1))?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Store the raw bytes of every picture in the `image` column of the row
/// whose `image_id` matches the picture's key (see [`assign_image_keys`]).
/// A missing folder means there is nothing to bind.
pub fn bind_images(store: &DataStore, folder: &Path) -> Result<usize> {
    if !folder.is_dir() {
        warn!(folder = %folder.display(), "pictures folder not found, skipping images");
        return Ok(0);
    }

    let files = list_pictures(folder)?;
    let mut bound = 0;

    for (key, path) in assign_image_keys(files) {
        let bytes = fs::read(&path)
            .with_context(|| format!("failed to read picture {}", path.display()))?;
        let changed = store
            .update_rows(
                IMAGES_TABLE,
                IMAGE_COLUMN,
                &[Value::Blob(bytes)],
                &format!("{IMAGE_KEY_COLUMN} = {key}"),
            )
            .with_context(|| format!("failed to store picture {}", path.display()))?;

        if changed == 0 {
            warn!(key, path = %path.display(), "no images row for picture");
        } else {
            bound += 1;
        }
    }

    Ok(bound)
}

/// Pair each picture with the row key it belongs to. Files are sorted by
/// name. A stem that is a positive integer (`4.png`) claims that key; every
/// other file, and any repeat of an already claimed number, takes the smallest
/// positive key nobody claimed. No two pictures share a key.
pub fn assign_image_keys(mut files: Vec<PathBuf>) -> Vec<(i64, PathBuf)> {
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut taken = HashSet::new();
    let numbered: Vec<Option<i64>> = files
        .iter()
        .map(|path| numeric_stem(path).filter(|key| taken.insert(*key)))
        .collect();

    let mut next_free = 1;
    files
        .into_iter()
        .zip(numbered)
        .map(|(path, key)| {
            let key = key.unwrap_or_else(|| {
                while taken.contains(&next_free) {
                    next_free += 1;
                }
                taken.insert(next_free);
                warn!(
                    key = next_free,
                    path = %path.display(),
                    "picture has no unclaimed numeric name, using first free key"
                );
                next_free
            });
            (key, path)
        })
        .collect()
}

fn numeric_stem(path: &Path) -> Option<i64> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse::<i64>().ok())
        .filter(|key| *key > 0)
}

fn list_pictures(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(folder)
        .with_context(|| format!("failed to list {}", folder.display()))?;

    for entry in entries {
        let entry = entry.context("failed to read directory entry")?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if path.is_file() && !hidden {
            files.push(path);
        }
    }

    Ok(files)
}

fn manifest_reader(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_stems_become_keys() {
        let keys = assign_image_keys(vec![
            PathBuf::from("pics/10.png"),
            PathBuf::from("pics/2.png"),
            PathBuf::from("pics/logo.png"),
        ]);
        assert_eq!(
            keys,
            vec![
                (10, PathBuf::from("pics/10.png")),
                (2, PathBuf::from("pics/2.png")),
                (1, PathBuf::from("pics/logo.png")),
            ]
        );
    }

    #[test]
    fn named_files_skip_keys_claimed_by_numbered_files() {
        let keys = assign_image_keys(vec![
            PathBuf::from("pics/logo.png"),
            PathBuf::from("pics/1.png"),
            PathBuf::from("pics/banner.png"),
        ]);
        assert_eq!(
            keys,
            vec![
                (1, PathBuf::from("pics/1.png")),
                (2, PathBuf::from("pics/banner.png")),
                (3, PathBuf::from("pics/logo.png")),
            ]
        );
    }

    #[test]
    fn repeated_numbers_get_a_free_key() {
        let keys = assign_image_keys(vec![
            PathBuf::from("pics/2.jpg"),
            PathBuf::from("pics/2.png"),
        ]);
        assert_eq!(
            keys,
            vec![
                (2, PathBuf::from("pics/2.jpg")),
                (1, PathBuf::from("pics/2.png")),
            ]
        );
    }

    #[test]
    fn zero_stem_falls_back_to_first_free_key() {
        let keys = assign_image_keys(vec![PathBuf::from("0.jpg")]);
        assert_eq!(keys, vec![(1, PathBuf::from("0.jpg"))]);
    }
}

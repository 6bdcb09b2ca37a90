//! Reading term,definition tables and finding them on disk.

use crate::error::LoadError;
use crate::traits::Record;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Result of looking for quiz files in a directory.
#[derive(Debug, PartialEq, Eq)]
pub enum Discovery {
    /// The directory did not exist and has been created, it holds no files yet.
    Created,
    /// Csv files found, sorted by path. May be empty.
    Files(Vec<PathBuf>),
}

/// Parse records from anything readable. Rows with fewer than two fields, or with an empty term
/// or definition after trimming, are skipped. No header row is assumed.
pub fn records_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Record>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut res = vec![];
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let (term, definition) = match (row.get(0), row.get(1)) {
            (Some(t), Some(d)) => (t.trim(), d.trim()),
            _ => {
                debug!("skipping row {}: fewer than two fields", i + 1);
                continue;
            }
        };
        if term.is_empty() || definition.is_empty() {
            debug!("skipping row {}: empty field", i + 1);
            continue;
        }
        res.push(Record::new(term, definition));
    }
    Ok(res)
}

/// Load the records from a csv file, an empty result is an error.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let to_err = |source| LoadError::Csv {
        path: path.to_owned(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|e| to_err(csv::Error::from(e)))?;
    let records = records_from_reader(file).map_err(to_err)?;
    if records.is_empty() {
        return Err(LoadError::Empty(path.to_owned()));
    }
    info!("loaded {} records from {path:?}", records.len());
    Ok(records)
}

/// Number of usable records in a file, zero if it can't be read.
pub fn count_records(path: &Path) -> usize {
    std::fs::File::open(path)
        .ok()
        .and_then(|f| records_from_reader(f).ok())
        .map(|r| r.len())
        .unwrap_or(0)
}

/// List the csv files in `dir`, creating the directory if it is missing.
pub fn discover(dir: &Path) -> Result<Discovery, LoadError> {
    let to_err = |source| LoadError::Discovery {
        path: dir.to_owned(),
        source,
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(to_err)?;
        info!("created quiz directory {dir:?}");
        return Ok(Discovery::Created);
    }

    let mut files = vec![];
    for entry in std::fs::read_dir(dir).map_err(to_err)? {
        let path = entry.map_err(to_err)?.path();
        let is_csv = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    debug!("found {} csv files in {dir:?}", files.len());
    Ok(Discovery::Files(files))
}

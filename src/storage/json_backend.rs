use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::{
    core::utils::{ensure_dir, tmp_path},
    errors::{LedgerError, Result},
};

const RECORD_EXTENSION: &str = "json";

/// Filesystem-backed key-value storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", canonical_key(key), RECORD_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Stages every value to a `.tmp` file, then renames each into place.
    ///
    /// A failure while staging leaves every record untouched. A failed rename
    /// restores the records already replaced, so the previous state survives.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        ensure_dir(&self.root)?;
        let mut staged: Vec<StagedRecord> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let target = self.record_path(key);
            let tmp = tmp_path(&target);
            let previous = match read_previous(&target) {
                Ok(previous) => previous,
                Err(err) => {
                    discard_staged(&staged);
                    return Err(err);
                }
            };
            if let Err(err) = write_file(&tmp, value) {
                discard(&tmp);
                discard_staged(&staged);
                return Err(err);
            }
            staged.push(StagedRecord {
                tmp,
                target,
                previous,
            });
        }
        commit_staged(&staged)
    }
}

/// A value written to its staging file, plus the bytes it replaces.
#[derive(Debug)]
struct StagedRecord {
    tmp: PathBuf,
    target: PathBuf,
    previous: Option<Vec<u8>>,
}

fn read_previous(target: &Path) -> Result<Option<Vec<u8>>> {
    if !target.exists() {
        return Ok(None);
    }
    fs::read(target).map(Some).map_err(|err| {
        LedgerError::Persistence(format!("cannot replace `{}`: {err}", target.display()))
    })
}

fn commit_staged(staged: &[StagedRecord]) -> Result<()> {
    for (index, record) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(&record.tmp, &record.target) {
            restore(&staged[..index]);
            discard_staged(&staged[index..]);
            return Err(LedgerError::Persistence(format!(
                "failed to commit `{}`: {err}",
                record.target.display()
            )));
        }
        debug!(path = %record.target.display(), "record committed");
    }
    Ok(())
}

fn restore(committed: &[StagedRecord]) {
    for record in committed {
        let result = match &record.previous {
            Some(bytes) => fs::write(&record.target, bytes),
            None => fs::remove_file(&record.target),
        };
        match result {
            Ok(()) => debug!(path = %record.target.display(), "record restored"),
            Err(err) => warn!(
                path = %record.target.display(),
                error = %err,
                "failed to restore record"
            ),
        }
    }
}

fn discard_staged(staged: &[StagedRecord]) {
    for record in staged {
        discard(&record.tmp);
    }
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn discard(path: &Path) {
    if path.exists() {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove staged record");
        }
    }
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

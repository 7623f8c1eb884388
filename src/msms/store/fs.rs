use super::{DataStore, LoadOutcome};
use crate::error::{MsmsError, Result};
use crate::model::AppData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "msms.json";

pub struct JsonFileStore {
    path: PathBuf,
    data: AppData,
    outcome: LoadOutcome,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading its snapshot.
    ///
    /// A missing, unreadable or invalid file is replaced by an empty snapshot,
    /// which is written out right away. Only a failure to write that snapshot
    /// is reported as an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (data, outcome) = Self::load(&path);

        let mut store = Self {
            path,
            data,
            outcome,
        };
        if outcome != LoadOutcome::Loaded {
            store.save()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    fn load(path: &Path) -> (AppData, LoadOutcome) {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found, creating defaults");
                return (AppData::default(), LoadOutcome::Created);
            }
            Err(err) => {
                info!(path = %path.display(), error = %err, "data file unreadable, starting empty");
                return (AppData::default(), LoadOutcome::Recovered);
            }
        };

        match serde_json::from_slice::<AppData>(&content) {
            Ok(mut data) => {
                let fixes = data.repair();
                if fixes.is_empty() {
                    debug!(
                        path = %path.display(),
                        teachers = data.teachers.len(),
                        students = data.students.len(),
                        attendance = data.attendance.len(),
                        "data loaded"
                    );
                    (data, LoadOutcome::Loaded)
                } else {
                    for fix in &fixes {
                        info!(path = %path.display(), "repaired data file: {}", fix);
                    }
                    (data, LoadOutcome::Repaired)
                }
            }
            Err(err) => {
                info!(path = %path.display(), error = %err, "data file is invalid, starting empty");
                Self::backup_corrupt(path);
                (AppData::default(), LoadOutcome::Recovered)
            }
        }
    }

    fn backup_corrupt(path: &Path) {
        let backup = corrupt_backup_path(path);
        match fs::copy(path, &backup) {
            Ok(_) => info!(backup = %backup.display(), "kept a copy of the invalid data file"),
            Err(err) => warn!(backup = %backup.display(), error = %err, "could not back up invalid data file"),
        }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|err| MsmsError::persistence(parent, err))?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_DATA_FILE);
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

/// Where the bytes of an invalid data file are kept before it is reset.
pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.into());
    name.push(".corrupt");
    path.with_file_name(name)
}

impl DataStore for JsonFileStore {
    fn data(&self) -> &AppData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    fn save(&mut self) -> Result<()> {
        self.ensure_parent_dir()?;
        let content = serde_json::to_string_pretty(&self.data)?;

        // Atomic write: readers only ever see the old or the new snapshot
        let tmp_path = self.tmp_path();
        if let Err(err) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(MsmsError::persistence(&self.path, err));
        }
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(MsmsError::persistence(&self.path, err));
        }

        debug!(path = %self.path.display(), "data saved");
        Ok(())
    }
}

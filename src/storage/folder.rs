use std::fs;
use std::path::{Path, PathBuf};

use super::Substrate;
use crate::atomic::{self, TmpFile};
use crate::{Result, StoreError};

const SLOT_EXTENSION: &str = "json";

/// Persists every slot as `<key>.json` inside one folder.
pub struct FolderSubstrate {
    /// Label for logging
    label: String,
    /// Folder holding the slot files
    path: PathBuf,
}

impl FolderSubstrate {
    /// Open the folder at `path`, creating it when missing.
    ///
    /// Existing slot files are left as they are.
    pub fn new(label: String, path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;
        if !path.is_dir() {
            return Err(StoreError::Storage(
                label,
                "Path is not a directory".to_owned(),
            ));
        }
        Ok(Self {
            label,
            path: PathBuf::from(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.starts_with('.')
        {
            return Err(StoreError::Storage(
                self.label.clone(),
                format!("Invalid slot key {key:?}"),
            ));
        }
        Ok(self
            .path
            .join(format!("{key}.{SLOT_EXTENSION}")))
    }

    fn extract_key_from_file_path(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        if TmpFile::is_tmp_name(name) {
            return None;
        }
        if path.extension()? != SLOT_EXTENSION {
            return None;
        }
        path.file_stem()?
            .to_str()
            .map(str::to_owned)
    }
}

impl Substrate for FolderSubstrate {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Storage(
                self.label.clone(),
                format!("{}: {}", path.display(), err),
            )),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        atomic::replace(&path, value.as_bytes())?;
        log::debug!(
            "{} slot {} written ({} bytes)",
            self.label,
            key,
            value.len()
        );
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(key) = self.extract_key_from_file_path(&path) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

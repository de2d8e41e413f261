use std::fs::File;
use std::io::Result;
use std::path::{Path, PathBuf};

const TMP_PREFIX: &str = ".tmp-";

/// A scratch file living next to its final destination.
///
/// The file is removed on drop unless it has been persisted,
/// so an interrupted write never leaves garbage in the folder.
pub struct TmpFile {
    file: File,
    path: PathBuf,
    persisted: bool,
}

impl TmpFile {
    pub fn create_in(temp_dir: impl AsRef<Path>) -> Result<Self> {
        let suffix: String = std::iter::repeat_with(fastrand::alphanumeric)
            .take(10)
            .collect();
        let path = temp_dir
            .as_ref()
            .join(format!("{TMP_PREFIX}{suffix}"));
        let file = File::create(&path)?;
        Ok(Self {
            file,
            path,
            persisted: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush to disk and move the scratch file over `target`.
    ///
    /// `target` must be on the same filesystem, which holds
    /// when both live in the same folder.
    pub fn persist(mut self, target: impl AsRef<Path>) -> Result<()> {
        self.file.sync_all()?;
        std::fs::rename(&self.path, target.as_ref())?;
        self.persisted = true;
        Ok(())
    }

    pub fn is_tmp_name(name: &str) -> bool {
        name.starts_with(TMP_PREFIX)
    }
}

impl std::io::Write for &TmpFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (&self.file).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (&self.file).flush()
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn dropped_tmp_file_is_removed() {
        let dir = TempDir::new("tmp_drop").unwrap();
        let path = {
            let tmp = TmpFile::create_in(dir.path()).unwrap();
            (&tmp).write_all(b"half written").unwrap();
            tmp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn persisted_tmp_file_replaces_target() {
        let dir = TempDir::new("tmp_persist").unwrap();
        let target = dir.path().join("slot.json");
        std::fs::write(&target, b"old").unwrap();

        let tmp = TmpFile::create_in(dir.path()).unwrap();
        (&tmp).write_all(b"new").unwrap();
        tmp.persist(&target).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

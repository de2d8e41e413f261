mod file;

use std::io::{Result, Write};
use std::path::Path;

pub use file::TmpFile;

/// Replace the content of `target` in one step.
///
/// Readers observe either the previous content or `data`, never
/// a mix of both.
pub fn replace(target: &Path, data: &[u8]) -> Result<()> {
    let directory = target.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "`target` must have a parent directory",
        )
    })?;
    let tmp = TmpFile::create_in(directory)?;
    (&tmp).write_all(data)?;
    (&tmp).flush()?;
    tmp.persist(target)
}

//! `.part` file handling: sequential writes, then atomic rename.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `ep.mp4` → `ep.mp4.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Truncating writer for one transfer attempt.
pub struct PartFile {
    file: io::BufWriter<File>,
    written: u64,
}

impl PartFile {
    /// Creates (or truncates) the temp file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            file: io::BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes buffers and syncs data to disk.
    pub fn sync(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.get_ref().sync_all()
    }
}

/// Renames the finished temp file onto `final_path`.
pub(super) fn finalize(temp: &Path, final_path: &Path) -> Result<()> {
    std::fs::rename(temp, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            temp.display(),
            final_path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("ep.mp4"));
        assert_eq!(p.to_string_lossy(), "ep.mp4.part");
        let p2 = temp_path(Path::new("/tmp/Show/S1/ep.mp4"));
        assert_eq!(p2.to_string_lossy(), "/tmp/Show/S1/ep.mp4.part");
    }

    #[test]
    fn write_sync_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("ep.mp4");
        let tp = temp_path(&final_path);

        let mut part = PartFile::create(&tp).unwrap();
        part.write(b"hello ").unwrap();
        part.write(b"world").unwrap();
        part.sync().unwrap();
        assert_eq!(part.written(), 11);
        drop(part);

        finalize(&tp, &final_path).unwrap();
        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn create_truncates_previous_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let tp = dir.path().join("ep.mp4.part");
        std::fs::write(&tp, b"stale bytes from a failed attempt").unwrap();
        let mut part = PartFile::create(&tp).unwrap();
        part.write(b"new").unwrap();
        part.sync().unwrap();
        assert_eq!(std::fs::read(&tp).unwrap(), b"new");
    }
}

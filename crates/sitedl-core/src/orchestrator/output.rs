//! Output folder and file checks before a transfer starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::transfer::temp_path;

#[derive(Debug, thiserror::Error)]
pub enum OutputPathError {
    #[error("empty file name")]
    EmptyName,
    #[error("cannot create folder {}: {source}", path.display())]
    Folder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Free and writable.
    New(PathBuf),
    /// Already downloaded.
    Exists(PathBuf),
}

/// Creates `dir` (idempotent) and checks the transfer's `.part` file for
/// `dir/file_name` can be created. The final path is never touched.
pub fn prepare_destination(dir: &Path, file_name: &str) -> Result<Destination, OutputPathError> {
    if file_name.is_empty() {
        return Err(OutputPathError::EmptyName);
    }
    fs::create_dir_all(dir).map_err(|source| OutputPathError::Folder {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    if path.exists() {
        return Ok(Destination::Exists(path));
    }
    let part = temp_path(&path);
    can_create_file(&part).map_err(|source| OutputPathError::File { path: part, source })?;
    Ok(Destination::New(path))
}

/// Opens `path` for writing to prove the name is accepted by the filesystem.
/// A leftover file is harmless: the transfer truncates it.
fn can_create_file(path: &Path) -> io::Result<()> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!(
            path = %path.display(),
            "could not remove writability check file: {}",
            e
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_folders_and_reports_free_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Site").join("Serie").join("Show").join("S1");
        let d = prepare_destination(&target, "ep.mp4").unwrap();
        assert_eq!(d, Destination::New(target.join("ep.mp4")));
        assert!(target.is_dir());
        assert!(!target.join("ep.mp4").exists());
        // Idempotent.
        prepare_destination(&target, "ep.mp4").unwrap();
    }

    #[test]
    fn existing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ep.mp4"), b"x").unwrap();
        assert_eq!(
            prepare_destination(dir.path(), "ep.mp4").unwrap(),
            Destination::Exists(dir.path().join("ep.mp4"))
        );
    }

    #[test]
    fn stale_part_file_does_not_block_download() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ep.mp4.part"), b"half").unwrap();
        assert_eq!(
            prepare_destination(dir.path(), "ep.mp4").unwrap(),
            Destination::New(dir.path().join("ep.mp4"))
        );
        assert!(!dir.path().join("ep.mp4").exists());
    }

    #[test]
    fn check_never_creates_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        prepare_destination(dir.path(), "ep.mp4").unwrap();
        // A second run must still see a free destination.
        assert_eq!(
            prepare_destination(dir.path(), "ep.mp4").unwrap(),
            Destination::New(dir.path().join("ep.mp4"))
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            prepare_destination(dir.path(), ""),
            Err(OutputPathError::EmptyName)
        ));
    }

    #[test]
    fn folder_under_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        assert!(matches!(
            prepare_destination(&blocker.join("S1"), "ep.mp4"),
            Err(OutputPathError::Folder { .. })
        ));
    }
}

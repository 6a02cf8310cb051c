use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use log::debug;
use log::warn;

use crate::FoldError;

/// A job's private directory. Dropping the guard removes the directory
/// unless it was persisted.
#[derive(Debug)]
pub struct Workdir {
    path: PathBuf,
    release: bool,
    _lease: Option<Lease>,
}

impl Workdir {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Workdir { path: path.into(), release: true, _lease: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the directory and its files after the guard goes away.
    pub fn persist(mut self) -> PathBuf {
        self.release = false;
        self.path.clone()
    }
}

impl Drop for Workdir {
    fn drop(&mut self) {
        if !self.release {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!("Released working directory {}", self.path.display()),
            Err(e) => warn!("Could not remove working directory {}: {}", self.path.display(), e),
        }
    }
}

type Registry = Arc<Mutex<HashSet<PathBuf>>>;

/// Marks a directory as held by a live guard until dropped.
#[derive(Debug)]
struct Lease {
    held: Registry,
    path: PathBuf,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.held.lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.path);
    }
}

/// Hands out one isolated working directory per job.
pub trait WorkdirProvider {
    fn acquire(&self, job_id: &str) -> io::Result<Workdir>;
}

/// `<root>/<job_id>` directories. Clones share the record of which
/// directories are currently held, so a job id can be in use only once.
#[derive(Debug, Clone)]
pub struct JobDirectories {
    root: PathBuf,
    held: Registry,
}

impl JobDirectories {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        JobDirectories { root: root.into(), held: Registry::default() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for JobDirectories {
    fn default() -> Self {
        JobDirectories::new(std::env::temp_dir().join("shmir").join("jobs"))
    }
}

impl WorkdirProvider for JobDirectories {
    /// Fails with `AlreadyExists` while another guard holds the same
    /// directory; a leftover directory nobody holds is replaced.
    fn acquire(&self, job_id: &str) -> io::Result<Workdir> {
        let path = self.root.join(job_id);
        let newly_held = self.held.lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.clone());
        if !newly_held {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("working directory {} is held by a running job", path.display()),
            ));
        }
        let lease = Lease { held: Arc::clone(&self.held), path: path.clone() };

        if path.exists() {
            warn!("Removing stale working directory {}", path.display());
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        debug!("Acquired working directory {}", path.display());
        Ok(Workdir { path, release: true, _lease: Some(lease) })
    }
}

/// Job ids name directories and archives, so they must be a single plain
/// path component.
pub fn validate_job_id(job_id: &str) -> Result<(), FoldError> {
    let bad = job_id.is_empty()
        || job_id == "."
        || job_id == ".."
        || job_id.chars().any(|c| c == '/' || c == '\\' || c == '\0');
    if bad {
        return Err(FoldError::InvalidJobId(job_id.to_string()));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workdir_released_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let provider = JobDirectories::new(root.path());
        let path = {
            let wd = provider.acquire("job-1").unwrap();
            assert!(wd.path().is_dir());
            assert_eq!(wd.path(), root.path().join("job-1"));
            wd.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_workdir_persist() {
        let root = tempfile::tempdir().unwrap();
        let provider = JobDirectories::new(root.path().join("nested"));
        let wd = provider.acquire("job-2").unwrap();
        fs::write(wd.path().join("sequence"), "ACGU").unwrap();
        let path = wd.persist();
        assert!(path.join("sequence").is_file());
    }

    #[test]
    fn test_stale_directory_is_replaced() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("job-3");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("sequence_1.ss"), "old").unwrap();

        let wd = JobDirectories::new(root.path()).acquire("job-3").unwrap();
        assert!(wd.path().is_dir());
        assert!(!wd.path().join("sequence_1.ss").exists());
    }

    #[test]
    fn test_held_directory_is_not_replaced() {
        let root = tempfile::tempdir().unwrap();
        let provider = JobDirectories::new(root.path());
        let first = provider.acquire("miR-30a").unwrap();
        fs::write(first.path().join("sequence"), "ACGU").unwrap();

        let err = provider.clone().acquire("miR-30a").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(first.path().join("sequence").is_file());

        drop(first);
        let again = provider.acquire("miR-30a").unwrap();
        assert!(again.path().is_dir());
    }

    #[test]
    fn test_validate_job_id() {
        assert!(validate_job_id("4f1c-77ab").is_ok());
        assert!(validate_job_id("miR-122_a").is_ok());
        for bad in ["", ".", "..", "a/b", "../x", "a\\b"] {
            assert!(matches!(validate_job_id(bad), Err(FoldError::InvalidJobId(_))), "{bad}");
        }
    }
}

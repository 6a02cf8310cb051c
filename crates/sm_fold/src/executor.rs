use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Instant;

use log::debug;
use log::info;
use log::warn;

use crate::FoldError;
use crate::FoldSettings;
use crate::WorkdirProvider;
use crate::build_archive;
use crate::validate_job_id;
use crate::PDF_SUFFIX;
use crate::SEQUENCE_ARGUMENT;
use crate::SEQUENCE_FILE;
use crate::STRUCTURE_SUFFIX;

/// Shared flag to abandon a running job. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The two files a successful run leaves in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldFiles {
    pub pdf: PathBuf,
    pub structure: PathBuf,
}

impl FoldFiles {
    pub fn in_dir(dir: &Path) -> Self {
        FoldFiles {
            pdf: dir.join(format!("{}{}", SEQUENCE_FILE, PDF_SUFFIX)),
            structure: dir.join(format!("{}{}", SEQUENCE_FILE, STRUCTURE_SUFFIX)),
        }
    }

    /// `[pdf, structure]`
    pub fn paths(&self) -> [&Path; 2] {
        [&self.pdf, &self.structure]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldFailure {
    NoFoldingFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldOutcome {
    Success(FoldFiles),
    Archive(PathBuf),
    Failure(FoldFailure),
}

/// Runs the folding program for one job at a time; any number of threads
/// may share one executor.
#[derive(Debug)]
pub struct FoldExecutor<P> {
    settings: FoldSettings,
    provider: P,
}

impl<P: WorkdirProvider> FoldExecutor<P> {
    pub fn new(settings: FoldSettings, provider: P) -> Self {
        FoldExecutor { settings, provider }
    }

    pub fn settings(&self) -> &FoldSettings {
        &self.settings
    }

    pub fn run(
        &self,
        job_id: &str,
        sequence: &str,
        want_archive: bool,
    ) -> Result<FoldOutcome, FoldError> {
        self.run_with_cancel(job_id, sequence, want_archive, &CancelToken::new())
    }

    /// Fold `sequence` in a fresh working directory.
    ///
    /// A zero exit status yields the `.pdf` and `.ss` paths (or the archive
    /// holding them when `want_archive` is set); any other exit status is
    /// `FoldFailure::NoFoldingFound`. The working directory is released on
    /// every path except a raw `Success`, whose files must stay readable.
    pub fn run_with_cancel(
        &self,
        job_id: &str,
        sequence: &str,
        want_archive: bool,
        cancel: &CancelToken,
    ) -> Result<FoldOutcome, FoldError> {
        validate_job_id(job_id)?;
        let workdir_err = |source| FoldError::Workdir { job_id: job_id.to_string(), source };

        let workdir = self.provider.acquire(job_id).map_err(workdir_err)?;
        fs::write(workdir.path().join(SEQUENCE_FILE), sequence).map_err(workdir_err)?;
        debug!("Job {}: wrote {} nt to {}", job_id, sequence.len(), workdir.path().display());

        let status = self.fold(job_id, workdir.path(), cancel)?;
        if !status.success() {
            info!("Job {}: {} exited with {}, no foldings.",
                job_id, self.settings.mfold_path.display(), status);
            return Ok(FoldOutcome::Failure(FoldFailure::NoFoldingFound));
        }

        let files = FoldFiles::in_dir(workdir.path());
        for path in files.paths() {
            if !path.is_file() {
                warn!("Job {}: expected output {} is missing.", job_id, path.display());
            }
        }

        if want_archive {
            let archive = build_archive(job_id, &files.paths(), &self.settings.archive_dir)?;
            info!("Job {}: folded, archived to {}", job_id, archive.display());
            return Ok(FoldOutcome::Archive(archive));
        }

        workdir.persist();
        info!("Job {}: folded.", job_id);
        Ok(FoldOutcome::Success(files))
    }

    fn fold(&self, job_id: &str, dir: &Path, cancel: &CancelToken) -> Result<ExitStatus, FoldError> {
        if cancel.is_cancelled() {
            return Err(FoldError::Cancelled(job_id.to_string()));
        }
        let executable = &self.settings.mfold_path;
        debug!("Job {}: running {} {}", job_id, executable.display(), SEQUENCE_ARGUMENT);

        let mut child = Command::new(executable)
            .arg(SEQUENCE_ARGUMENT)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| FoldError::Spawn { executable: executable.clone(), source })?;

        self.wait(job_id, &mut child, cancel)
    }

    fn wait(&self, job_id: &str, child: &mut Child, cancel: &CancelToken) -> Result<ExitStatus, FoldError> {
        let started = Instant::now();
        loop {
            let polled = child.try_wait()
                .map_err(|source| FoldError::Wait { job_id: job_id.to_string(), source })?;
            if let Some(status) = polled {
                debug!("Job {}: child exited after {:.2?}", job_id, started.elapsed());
                return Ok(status);
            }
            if cancel.is_cancelled() {
                terminate(job_id, child);
                return Err(FoldError::Cancelled(job_id.to_string()));
            }
            if let Some(after) = self.settings.timeout {
                if started.elapsed() >= after {
                    terminate(job_id, child);
                    return Err(FoldError::TimedOut { job_id: job_id.to_string(), after });
                }
            }
            thread::sleep(self.settings.poll_interval);
        }
    }
}

fn terminate(job_id: &str, child: &mut Child) {
    warn!("Job {}: killing folding process {}", job_id, child.id());
    if let Err(e) = child.kill() {
        warn!("Job {}: kill failed: {}", job_id, e);
    }
    if let Err(e) = child.wait() {
        warn!("Job {}: could not reap folding process: {}", job_id, e);
    }
}

use std::fmt;
use std::io;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use zip::result::ZipError;

#[derive(Debug)]
pub enum ArchiveError {
    Io(io::Error),
    Zip(ZipError),
    NoFileName(PathBuf),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Zip(e) => write!(f, "Zip error: {}", e),
            Self::NoFileName(p) => write!(f, "Cannot archive '{}': no file name", p.display()),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Zip(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<ZipError> for ArchiveError {
    fn from(e: ZipError) -> Self { Self::Zip(e) }
}


/// Everything that keeps a fold job from running to a verdict. A folding
/// program that runs and finds nothing is not an error, see `FoldFailure`.
#[derive(Debug)]
pub enum FoldError {
    InvalidJobId(String),
    DuplicateJobId(String),
    Workdir { job_id: String, source: io::Error },
    Spawn { executable: PathBuf, source: io::Error },
    Wait { job_id: String, source: io::Error },
    TimedOut { job_id: String, after: Duration },
    Cancelled(String),
    Archive(ArchiveError),
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJobId(id) =>
                write!(f, "Invalid job id '{id}'"),
            Self::DuplicateJobId(id) =>
                write!(f, "Job id '{id}' appears more than once in the batch"),
            Self::Workdir { job_id, source } =>
                write!(f, "Working directory for job '{job_id}': {source}"),
            Self::Spawn { executable, source } =>
                write!(f, "Could not run '{}': {}", executable.display(), source),
            Self::Wait { job_id, source } =>
                write!(f, "Lost track of the folding process of job '{job_id}': {source}"),
            Self::TimedOut { job_id, after } =>
                write!(f, "Job '{job_id}' did not finish within {:.1}s", after.as_secs_f64()),
            Self::Cancelled(job_id) =>
                write!(f, "Job '{job_id}' was cancelled"),
            Self::Archive(e) =>
                write!(f, "Archive error: {e}"),
        }
    }
}

impl Error for FoldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Workdir { source, .. } => Some(source),
            Self::Spawn { source, .. } => Some(source),
            Self::Wait { source, .. } => Some(source),
            Self::Archive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArchiveError> for FoldError {
    fn from(e: ArchiveError) -> Self { Self::Archive(e) }
}

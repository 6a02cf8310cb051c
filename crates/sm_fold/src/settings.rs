use std::path::PathBuf;
use std::time::Duration;

/// Name of the input file the folding program reads.
pub const SEQUENCE_FILE: &str = "sequence";

/// The single argument passed to the folding program.
pub const SEQUENCE_ARGUMENT: &str = "SEQ=sequence";

/// Output files mfold writes next to its input on success.
pub const PDF_SUFFIX: &str = "_1.pdf";
pub const STRUCTURE_SUFFIX: &str = "_1.ss";

pub const DEFAULT_MFOLD: &str = "mfold";

#[derive(Debug, Clone, PartialEq)]
pub struct FoldSettings {
    /// The folding program, looked up on `PATH` unless absolute.
    pub mfold_path: PathBuf,
    /// Where `<job_id>.zip` archives are written.
    pub archive_dir: PathBuf,
    /// `None` waits for the folding program as long as it takes.
    pub timeout: Option<Duration>,
    /// How often a running child is checked for exit, cancellation and timeout.
    pub poll_interval: Duration,
}

impl Default for FoldSettings {
    fn default() -> Self {
        FoldSettings {
            mfold_path: PathBuf::from(DEFAULT_MFOLD),
            archive_dir: std::env::temp_dir().join("shmir").join("archives"),
            timeout: None,
            poll_interval: Duration::from_millis(50),
        }
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use log::debug;
use sm_fold::FoldExecutor;
use sm_fold::FoldJobTask;
use sm_fold::FoldSettings;
use sm_fold::JobDirectories;
use sm_fold::DEFAULT_MFOLD;

/// Folding program and job directory parameters.
#[derive(Debug, Args)]
pub struct FoldArguments {
    /// The mfold executable (absolute path or name on PATH)
    #[arg(long, value_name = "PROGRAM", env = "SHMIR_MFOLD_PATH", default_value = DEFAULT_MFOLD)]
    pub mfold: PathBuf,

    /// Root for per-job working directories
    #[arg(long, value_name = "DIR", env = "SHMIR_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Where <job_id>.zip archives are written
    #[arg(long, value_name = "DIR", env = "SHMIR_ARCHIVE_DIR")]
    pub archive_dir: Option<PathBuf>,

    /// Kill a folding run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Keep raw output files instead of building an archive
    #[arg(long)]
    pub no_archive: bool,

    /// Number of parallel fold jobs (defaults to one per core)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,
}

impl FoldArguments {
    pub fn build_settings(&self) -> FoldSettings {
        let mut settings = FoldSettings {
            mfold_path: self.mfold.clone(),
            timeout: self.timeout
                .filter(|s| s.is_finite() && *s > 0.0)
                .map(Duration::from_secs_f64),
            ..FoldSettings::default()
        };
        if let Some(dir) = &self.archive_dir {
            settings.archive_dir = dir.clone();
        }
        debug!("Fold settings: {:?}", settings);
        settings
    }

    pub fn build_directories(&self) -> JobDirectories {
        let dirs = match &self.work_dir {
            Some(root) => JobDirectories::new(root),
            None => JobDirectories::default(),
        };
        debug!("Working directories under {}", dirs.root().display());
        dirs
    }

    pub fn build_task(&self) -> FoldJobTask<JobDirectories> {
        let executor = FoldExecutor::new(self.build_settings(), self.build_directories());
        FoldJobTask::new(executor).with_archive(!self.no_archive)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        fold: FoldArguments,
    }

    #[test]
    fn test_build_settings() {
        let cli = Cli::parse_from([
            "test", "--mfold", "/opt/mfold/bin/mfold",
            "--archive-dir", "/srv/zips", "--timeout", "2.5",
        ]);
        let settings = cli.fold.build_settings();
        assert_eq!(settings.mfold_path, PathBuf::from("/opt/mfold/bin/mfold"));
        assert_eq!(settings.archive_dir, PathBuf::from("/srv/zips"));
        assert_eq!(settings.timeout, Some(Duration::from_millis(2500)));
        assert!(!cli.fold.no_archive);
    }

    #[test]
    fn test_nonpositive_timeout_means_none() {
        let cli = Cli::parse_from(["test", "--mfold", "mfold", "--timeout", "0"]);
        assert_eq!(cli.fold.build_settings().timeout, None);
    }

    #[test]
    fn test_work_dir() {
        let cli = Cli::parse_from(["test", "--mfold", "mfold", "--work-dir", "/tmp/jobs", "-j", "2"]);
        assert_eq!(cli.fold.build_directories().root(), PathBuf::from("/tmp/jobs"));
        assert_eq!(cli.fold.workers, Some(2));
    }
}

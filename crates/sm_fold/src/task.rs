use std::path::PathBuf;

use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::CancelToken;
use crate::FoldError;
use crate::FoldExecutor;
use crate::FoldFailure;
use crate::FoldOutcome;
use crate::WorkdirProvider;

/// One unit of work for the task queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldJob {
    pub job_id: String,
    pub sequence: String,
}

impl FoldJob {
    pub fn new(job_id: impl Into<String>, sequence: impl Into<String>) -> Self {
        FoldJob { job_id: job_id.into(), sequence: sequence.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReply {
    pub status: String,
    pub error: String,
}

impl ErrorReply {
    pub fn no_foldings() -> Self {
        ErrorReply { status: "error".to_string(), error: "No foldings".to_string() }
    }
}

/// What the task hands back to the queue: an archive path, the raw file
/// pair, or `{"status": "error", "error": "No foldings"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskReply {
    Archive(PathBuf),
    Files(Vec<PathBuf>),
    Error(ErrorReply),
}

impl From<FoldOutcome> for TaskReply {
    fn from(outcome: FoldOutcome) -> Self {
        match outcome {
            FoldOutcome::Archive(path) => TaskReply::Archive(path),
            FoldOutcome::Success(files) => TaskReply::Files(vec![files.pdf, files.structure]),
            FoldOutcome::Failure(FoldFailure::NoFoldingFound) => TaskReply::Error(ErrorReply::no_foldings()),
        }
    }
}

/// The queue-facing entry point: one call folds one job.
#[derive(Debug)]
pub struct FoldJobTask<P> {
    executor: FoldExecutor<P>,
    archive: bool,
}

impl<P: WorkdirProvider> FoldJobTask<P> {
    /// Archives results by default.
    pub fn new(executor: FoldExecutor<P>) -> Self {
        FoldJobTask { executor, archive: true }
    }

    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }

    pub fn executor(&self) -> &FoldExecutor<P> {
        &self.executor
    }

    pub fn delegate(&self, job_id: &str, sequence: &str) -> Result<TaskReply, FoldError> {
        self.delegate_with_cancel(job_id, sequence, &CancelToken::new())
    }

    pub fn delegate_with_cancel(
        &self,
        job_id: &str,
        sequence: &str,
        cancel: &CancelToken,
    ) -> Result<TaskReply, FoldError> {
        info!("Job {}: folding {} nt.", job_id, sequence.len());
        let outcome = self.executor.run_with_cancel(job_id, sequence, self.archive, cancel)?;
        Ok(TaskReply::from(outcome))
    }

    pub fn run(&self, job: &FoldJob) -> Result<TaskReply, FoldError> {
        self.delegate(&job.job_id, &job.sequence)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::FoldFiles;
    use std::path::Path;

    #[test]
    fn test_reply_json() {
        let reply = TaskReply::from(FoldOutcome::Failure(FoldFailure::NoFoldingFound));
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"{"status":"error","error":"No foldings"}"#
        );

        let reply = TaskReply::from(FoldOutcome::Archive(PathBuf::from("/srv/jobs/j1.zip")));
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#""/srv/jobs/j1.zip""#);

        let reply = TaskReply::from(FoldOutcome::Success(FoldFiles::in_dir(Path::new("/w/j2"))));
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"["/w/j2/sequence_1.pdf","/w/j2/sequence_1.ss"]"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_delegate() {
        use crate::FoldSettings;
        use crate::JobDirectories;
        use crate::test_stubs::stubs;

        let root = tempfile::tempdir().unwrap();
        let task_for = |mfold: &Path| {
            let settings = FoldSettings {
                mfold_path: mfold.to_path_buf(),
                archive_dir: root.path().to_path_buf(),
                ..FoldSettings::default()
            };
            FoldJobTask::new(FoldExecutor::new(settings, JobDirectories::new(root.path().join("jobs"))))
        };

        let reply = task_for(&stubs().folds).delegate("j1", "GGGGAAAACCCC").unwrap();
        assert_eq!(reply, TaskReply::Archive(root.path().join("j1.zip")));

        let reply = task_for(&stubs().fails).run(&FoldJob::new("j2", "AAAA")).unwrap();
        assert_eq!(reply, TaskReply::Error(ErrorReply::no_foldings()));

        let reply = task_for(&stubs().folds).with_archive(false).delegate("j3", "ACGU").unwrap();
        let TaskReply::Files(files) = reply else { panic!("expected files") };
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }
}

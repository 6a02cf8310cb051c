use std::collections::HashSet;

use log::debug;
use log::warn;
use rayon::ThreadPool;
use rayon::ThreadPoolBuildError;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::FoldError;
use crate::FoldJob;
use crate::FoldJobTask;
use crate::TaskReply;
use crate::WorkdirProvider;

/// In-process dispatcher: every job is one task execution on a worker
/// thread. Jobs never share a working directory, so nothing is locked.
#[derive(Debug, Default)]
pub struct FoldQueue {
    pool: Option<ThreadPool>,
}

impl FoldQueue {
    /// `None` uses rayon's global pool.
    pub fn new(workers: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let pool = match workers {
            Some(n) => Some(ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };
        Ok(FoldQueue { pool })
    }

    /// Run all jobs; results come back in job order. `on_done` is called
    /// from the worker thread as each job finishes. A job whose id already
    /// appeared earlier in `jobs` is not run and fails with
    /// `FoldError::DuplicateJobId`.
    pub fn dispatch<P, F>(
        &self,
        task: &FoldJobTask<P>,
        jobs: &[FoldJob],
        on_done: F,
    ) -> Vec<Result<TaskReply, FoldError>>
    where
        P: WorkdirProvider + Sync,
        F: Fn(&FoldJob, &Result<TaskReply, FoldError>) + Sync,
    {
        debug!("Dispatching {} fold job(s).", jobs.len());
        let mut seen = HashSet::new();
        let repeated: Vec<bool> = jobs.iter()
            .map(|job| !seen.insert(job.job_id.as_str()))
            .collect();

        let work = || {
            jobs.par_iter()
                .zip(repeated.par_iter())
                .map(|(job, &repeated)| {
                    let result = if repeated {
                        warn!("Job {}: id already used in this batch, skipped.", job.job_id);
                        Err(FoldError::DuplicateJobId(job.job_id.clone()))
                    } else {
                        task.run(job)
                    };
                    on_done(job, &result);
                    result
                })
                .collect::<Vec<_>>()
        };
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}

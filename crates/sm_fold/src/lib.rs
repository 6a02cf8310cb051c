//! # sm_fold
//!
//! Runs the external mfold program once per job inside its own working
//! directory, reports "no foldings" as data, and packages the resulting
//! files into a `<job_id>.zip` archive.

mod error;
mod settings;
mod workdir;
mod archive;
mod executor;
mod task;
mod queue;

#[cfg(all(test, unix))]
mod test_stubs;

pub use error::*;
pub use settings::*;
pub use workdir::*;
pub use archive::*;
pub use executor::*;
pub use task::*;
pub use queue::*;

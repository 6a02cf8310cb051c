//! # shmir
//!
//! Unified API for sh-miR scaffold patterns and mfold structure evaluation.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod fold_parsers;
pub mod scaffold;
pub mod report;
pub mod logging;

pub mod patterns {
    pub use ::sm_patterns::*;
}

pub mod structure {
    pub use ::sm_structure::*;
}

pub mod fold {
    pub use ::sm_fold::*;
}

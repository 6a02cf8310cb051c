//! # sm_patterns
//!
//! Degenerate scaffold patterns: a miRNA strand is compiled into a family of
//! fixed-length patterns, graded by how many of its four terminal anchor
//! bases a candidate must reproduce exactly.

/// Base, BaseClass, NucleotideSequence, acid- and excluded-forms.
mod nucleotides;

/// Pattern, WeightClass and the textual pattern syntax.
mod pattern;

/// Weight classes to patterns, matching and JSON storage.
mod pattern_set;

/// Strands to PatternSet.
mod compiler;

pub use nucleotides::*;
pub use pattern::*;
pub use pattern_set::*;
pub use compiler::*;

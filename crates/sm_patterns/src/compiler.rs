use log::debug;

use crate::Base;
use crate::BaseClass;
use crate::NucleotideSequence;
use crate::SequenceError;
use crate::Pattern;
use crate::PatternSet;
use crate::WeightClass;
use crate::MIDDLE_RUNS;

/// First two and last two bases are anchors, so shorter strands have no
/// well-defined begin/end pairs.
pub const MIN_STRAND_LENGTH: usize = 4;

#[derive(Clone, Copy, Debug)]
enum Form {
    Acid,
    Excluded,
}

use Form::*;

/// Anchor forms for (b0, b1, e0, e1). Weight two has two variants, a then b.
const SCHEMES: [(WeightClass, [Form; 4]); 5] = [
    (WeightClass::One,   [Acid, Excluded, Excluded, Excluded]),
    (WeightClass::Two,   [Acid, Excluded, Excluded, Acid]),
    (WeightClass::Two,   [Acid, Acid, Excluded, Excluded]),
    (WeightClass::Three, [Acid, Acid, Excluded, Acid]),
    (WeightClass::Four,  [Acid, Acid, Acid, Acid]),
];

fn form(base: Base, form: Form) -> BaseClass {
    match form {
        Acid => base.acid_form(),
        Excluded => base.excluded_form(),
    }
}

/// The four anchor bases of a strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchors(pub [Base; 4]);

impl TryFrom<&NucleotideSequence> for Anchors {
    type Error = SequenceError;

    fn try_from(seq: &NucleotideSequence) -> Result<Self, Self::Error> {
        let n = seq.len();
        if n < MIN_STRAND_LENGTH {
            return Err(SequenceError::TooShort { length: n, minimum: MIN_STRAND_LENGTH });
        }
        Ok(Anchors([seq[0], seq[1], seq[n - 2], seq[n - 1]]))
    }
}

impl Anchors {
    fn pattern(&self, scheme: &[Form; 4], middle: usize) -> Pattern {
        let [b0, b1, e0, e1] = self.0;
        Pattern {
            begin: [form(b0, scheme[0]), form(b1, scheme[1])],
            middle,
            end: [form(e0, scheme[2]), form(e1, scheme[3])],
        }
    }
}

/// Compile strands into their graded pattern family.
///
/// Every strand contributes 15 patterns: three each for weights 1, 3 and 4,
/// six for weight 2. Within a weight, patterns are ordered by input strand,
/// then by middle run (15, 16, 17), then by variant. All strands are
/// validated before anything is built.
///
/// Weight two therefore interleaves its variants per run (a15, b15, a16, ...).
/// Stored sets that list every variant-a pattern before every variant-b one
/// hold the same patterns but do not compare equal to a freshly compiled set.
pub fn compile<S: AsRef<str>>(sequences: &[S]) -> Result<PatternSet, SequenceError> {
    let anchors = sequences.iter()
        .map(|s| {
            let seq = NucleotideSequence::try_from(s.as_ref())?;
            Anchors::try_from(&seq)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut set = PatternSet::new();
    for a in &anchors {
        for middle in MIDDLE_RUNS {
            for (weight, scheme) in &SCHEMES {
                set.push(*weight, a.pattern(scheme, middle));
            }
        }
    }
    debug!("Compiled {} patterns from {} strand(s).", set.len(), anchors.len());
    Ok(set)
}

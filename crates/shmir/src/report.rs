use std::path::Path;

use serde::Serialize;
use sm_fold::FoldFiles;
use sm_structure::parse_score;
use sm_structure::parse_structure;
use sm_structure::ScoreProfile;
use sm_structure::StructureFileError;
use sm_structure::StructurePairing;

/// Structure and (optionally) score of one folding, ready for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldReport {
    /// Number of lines in the structure file.
    pub length: usize,
    pub pairing: StructurePairing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<i64>,
}

impl FoldReport {
    pub fn new(pairing: StructurePairing, score: Option<ScoreProfile>) -> Self {
        FoldReport {
            length: pairing.len(),
            total_score: score.as_ref().map(ScoreProfile::total_score),
            pairing,
            score,
        }
    }

    pub fn from_files<P: AsRef<Path>>(
        structure: P,
        score: Option<P>,
    ) -> Result<Self, StructureFileError> {
        let pairing = parse_structure(structure)?;
        let score = score.map(parse_score).transpose()?;
        Ok(FoldReport::new(pairing, score))
    }

    /// Report on the `.ss` file of a finished, unarchived fold.
    pub fn from_fold_files(files: &FoldFiles) -> Result<Self, StructureFileError> {
        Ok(FoldReport::new(parse_structure(&files.structure)?, None))
    }
}

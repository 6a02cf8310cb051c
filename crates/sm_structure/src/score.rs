use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Cursor;
use std::path::Path;

use serde::Serialize;

use crate::StructureFileError;
use crate::pairing::parse_index;

/// `([position, partner], score)`, serialized in exactly that shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRecord(pub [usize; 2], pub i64);

impl ScoreRecord {
    pub fn position(&self) -> usize {
        self.0[0]
    }

    pub fn partner(&self) -> usize {
        self.0[1]
    }

    pub fn score(&self) -> i64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreProfile {
    pub max_score: f64,
    pub records: Vec<ScoreRecord>,
}

impl ScoreProfile {
    /// Sum of the score column.
    pub fn total_score(&self) -> i64 {
        self.records.iter().map(|r| r.score()).sum()
    }
}

/// The first line holds the maximum score; every following non-empty line
/// holds exactly `position partner score`.
pub fn read_score<R: BufRead>(reader: R) -> Result<ScoreProfile, StructureFileError> {
    let mut lines = reader.lines();

    let header = lines.next()
        .ok_or_else(|| StructureFileError::format(1, "missing maximum score"))??;
    let max_score = header.trim().parse::<f64>()
        .map_err(|_| StructureFileError::format(
            1, format!("maximum score '{}' is not a number", header.trim())))?;

    let mut records = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let lineno = i + 2;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [position, partner, score] = tokens[..] else {
            return Err(StructureFileError::format(
                lineno, format!("expected 3 columns, found {}", tokens.len())));
        };
        let score = score.parse::<i64>().map_err(|_| StructureFileError::format(
            lineno, format!("score '{}' is not an integer", score)))?;
        records.push(ScoreRecord(
            [parse_index(position, lineno, "position")?, parse_index(partner, lineno, "partner")?],
            score,
        ));
    }

    Ok(ScoreProfile { max_score, records })
}

pub fn parse_score<P: AsRef<Path>>(path: P) -> Result<ScoreProfile, StructureFileError> {
    read_score(BufReader::new(File::open(path)?))
}

pub fn parse_score_str(s: &str) -> Result<ScoreProfile, StructureFileError> {
    read_score(Cursor::new(s))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let profile = parse_score_str("27.5\n1 22 3\n2 21 -1\n\n3 0 4\n").unwrap();
        assert_eq!(profile.max_score, 27.5);
        assert_eq!(profile.records.len(), 3);
        assert_eq!(profile.records[0], ScoreRecord([1, 22], 3));
        assert_eq!(profile.records[1].partner(), 21);
        assert_eq!(profile.records[1].score(), -1);
        assert_eq!(profile.records[2].position(), 3);
        assert_eq!(profile.total_score(), 6);
    }

    #[test]
    fn test_header_only() {
        let profile = parse_score_str("12\n").unwrap();
        assert_eq!(profile.max_score, 12.0);
        assert!(profile.records.is_empty());
        assert_eq!(profile.total_score(), 0);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(parse_score_str(""),
            Err(StructureFileError::Format { line: 1, .. })));
        assert!(matches!(parse_score_str("max\n1 2 3\n"),
            Err(StructureFileError::Format { line: 1, .. })));
        assert!(matches!(parse_score_str("10\n1 2 3\n1 2\n"),
            Err(StructureFileError::Format { line: 3, .. })));
        assert!(matches!(parse_score_str("10\n1 2 3 4\n"),
            Err(StructureFileError::Format { line: 2, .. })));
        assert!(matches!(parse_score_str("10\n1 2 3.5\n"),
            Err(StructureFileError::Format { line: 2, .. })));
        assert!(matches!(parse_score_str("10\n1 b 3\n"),
            Err(StructureFileError::Format { line: 2, .. })));
    }

    #[test]
    fn test_json_shape() {
        let profile = parse_score_str("5.0\n1 8 2\n").unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"max_score":5.0,"records":[[[1,8],2]]}"#);
    }
}

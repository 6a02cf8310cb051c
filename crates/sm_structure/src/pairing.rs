use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Cursor;
use std::ops::Deref;
use std::path::Path;

use serde::Serialize;

use crate::StructureFileError;

/// First and last column of every line of an mfold `.ss` file, in line
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructurePairing(pub Vec<(usize, usize)>);

impl Deref for StructurePairing {
    type Target = [(usize, usize)];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One `first last` pair per line.
impl fmt::Display for StructurePairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (first, last) in &self.0 {
            writeln!(f, "{} {}", first, last)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_index(token: &str, line: usize, what: &str) -> Result<usize, StructureFileError> {
    token.parse::<usize>().map_err(|_| StructureFileError::format(
        line, format!("{} '{}' is not a non-negative integer", what, token)))
}

/// Read a structure pairing. Empty lines are skipped; any other line must
/// have integer first and last tokens.
pub fn read_structure<R: BufRead>(reader: R) -> Result<StructurePairing, StructureFileError> {
    let mut pairs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(StructureFileError::format(i + 1, "no tokens"));
        };
        pairs.push((
            parse_index(first, i + 1, "first column")?,
            parse_index(last, i + 1, "last column")?,
        ));
    }
    Ok(StructurePairing(pairs))
}

pub fn parse_structure<P: AsRef<Path>>(path: P) -> Result<StructurePairing, StructureFileError> {
    read_structure(BufReader::new(File::open(path)?))
}

pub fn parse_structure_str(s: &str) -> Result<StructurePairing, StructureFileError> {
    read_structure(Cursor::new(s))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_first_and_last_columns() {
        let ss = "1 G 0 2 0 1\n2 C 1 3 20 2\n3 A 2 4 0 3\n";
        let pt = parse_structure_str(ss).unwrap();
        assert_eq!(pt.len(), 3);
        assert_eq!(*pt, [(1, 1), (2, 2), (3, 3)]);

        let pt = parse_structure_str("5 17\n6 16\n7 0").unwrap();
        assert_eq!(pt.0, vec![(5, 17), (6, 16), (7, 0)]);
    }

    #[test]
    fn test_single_token_line() {
        let pt = parse_structure_str("42\n").unwrap();
        assert_eq!(pt.0, vec![(42, 42)]);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let pt = parse_structure_str("1 2\n\n3 4\n").unwrap();
        assert_eq!(pt.0, vec![(1, 2), (3, 4)]);
        assert!(parse_structure_str("").unwrap().is_empty());
    }

    #[test]
    fn test_fail_fast() {
        match parse_structure_str("1 2\n   \n3 4\n") {
            Err(StructureFileError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {:?}", other),
        }
        match parse_structure_str("1 2\n3 x\n") {
            Err(StructureFileError::Format { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("'x'"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse_structure_str("-1.5 4\n").is_err());
    }

    #[test]
    fn test_negative_index() {
        match parse_structure_str("1 2\n-3 4\n") {
            Err(StructureFileError::Format { line, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "first column '-3' is not a non-negative integer");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let pt = parse_structure_str("1 G 0 2 9 1\n2 U 1 3 8 2\n").unwrap();
        assert_eq!(pt.to_string(), "1 1\n2 2\n");
        assert_eq!(parse_structure_str(&pt.to_string()).unwrap(), pt);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sequence_1.ss");
        fs::write(&path, "1 A 0 2 0 1\n2 U 1 0 0 2\n").unwrap();
        assert_eq!(parse_structure(&path).unwrap().0, vec![(1, 1), (2, 2)]);

        let missing = dir.path().join("missing.ss");
        assert!(matches!(parse_structure(missing), Err(StructureFileError::Io(_))));
    }
}

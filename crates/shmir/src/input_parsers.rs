use std::collections::HashSet;
use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;

/// One sequence and the header line that named it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub header: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    /// First word of the header without '>', or `seq-<n>` (1-based).
    pub fn name(&self, index: usize) -> String {
        self.header.as_deref()
            .and_then(|h| h.strip_prefix('>'))
            .and_then(|h| h.split_whitespace().next())
            .map(str::to_string)
            .unwrap_or_else(|| format!("seq-{}", index + 1))
    }
}

/// One distinct name per record: a repeated name gets the record's 1-based
/// index appended (`miR-30a`, `miR-30a-2`, ...).
pub fn unique_names(records: &[SequenceRecord]) -> Vec<String> {
    let mut used = HashSet::new();
    records.iter()
        .enumerate()
        .map(|(i, record)| {
            let base = record.name(i);
            let mut name = base.clone();
            let mut n = i + 1;
            while !used.insert(name.clone()) {
                name = format!("{}-{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

// ============================================================
//  FASTA-like multi-record parser
// ============================================================

/// Every non-header line is one sequence (its first token); a '>' line names
/// the sequence that follows it. Blank lines and '#' comments are ignored.
pub fn read_sequences<R: BufRead>(reader: R) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('>') {
            if let Some(h) = header.replace(line.to_string()) {
                return Err(anyhow!("Header '{}' has no sequence", h));
            }
            continue;
        }
        let token = line.split_whitespace().next().unwrap_or(line);
        records.push(SequenceRecord {
            header: header.take(),
            sequence: token.to_uppercase(),
        });
    }

    if let Some(h) = header {
        return Err(anyhow!("Header '{}' has no sequence", h));
    }
    Ok(records)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

type SequencesResult = Result<Vec<SequenceRecord>>;

define_input_variants!(read_sequences, SequencesResult);

// ============================================================
//  Unit tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sequences() {
        let input = ">miR-30a sense\nugtaaacatcctcgactggaag\n\n# comment\nCUUUCAGUCGGAUGUUUGCAGC\n";
        let records = read_sequences_string(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header.as_deref(), Some(">miR-30a sense"));
        assert_eq!(records[0].sequence, "UGTAAACATCCTCGACTGGAAG");
        assert_eq!(records[0].name(0), "miR-30a");
        assert_eq!(records[1].header, None);
        assert_eq!(records[1].name(1), "seq-2");
    }

    #[test]
    fn test_dangling_header() {
        assert!(read_sequences_string(">a\n>b\nACGU\n").is_err());
        assert!(read_sequences_string("ACGU\n>tail\n").is_err());
        assert!(read_sequences_string("").unwrap().is_empty());
    }

    #[test]
    fn test_unique_names() {
        let input = ">miR-30a\nACGU\n>miR-30a second\nACGU\n>miR-30a\nACGU\nACGU\n>seq-4\nACGU\n";
        let records = read_sequences_string(input).unwrap();
        assert_eq!(
            unique_names(&records),
            vec!["miR-30a", "miR-30a-2", "miR-30a-3", "seq-4", "seq-4-5"]
        );
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.fa");
        std::fs::write(&path, ">x\nACGUACGU extra\n").unwrap();
        let records = read_sequences_input(path.to_str().unwrap()).unwrap();
        assert_eq!(records[0].sequence, "ACGUACGU");
    }
}

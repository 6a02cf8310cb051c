use std::error::Error;
use std::fmt;

use log::debug;
use serde::Deserialize;
use serde::Serialize;
use sm_patterns::compile;
use sm_patterns::PatternSet;
use sm_patterns::SequenceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldError {
    UnknownActiveStrand(u8),
    Sequence(SequenceError),
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::UnknownActiveStrand(i) => {
                write!(f, "Unknown active strand indicator {} (expected 0, 1, 3 or 5)", i)
            }
            ScaffoldError::Sequence(e) => write!(f, "Invalid miRNA strand: {}", e),
        }
    }
}

impl Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScaffoldError::Sequence(e) => Some(e),
            ScaffoldError::UnknownActiveStrand(_) => None,
        }
    }
}

impl From<SequenceError> for ScaffoldError {
    fn from(e: SequenceError) -> Self {
        ScaffoldError::Sequence(e)
    }
}

/// Which miRNA strand(s) of a scaffold are loaded into RISC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStrand {
    Both,
    Antisense,
    Sense,
}

impl TryFrom<u8> for ActiveStrand {
    type Error = ScaffoldError;

    fn try_from(indicator: u8) -> Result<Self, Self::Error> {
        match indicator {
            0 => Ok(ActiveStrand::Both),
            3 => Ok(ActiveStrand::Antisense),
            1 | 5 => Ok(ActiveStrand::Sense),
            other => Err(ScaffoldError::UnknownActiveStrand(other)),
        }
    }
}

/// Stored fields of a miRNA scaffold, as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldRecord {
    pub name: String,
    pub flanks5_s: String,
    pub flanks5_a: String,
    pub flanks3_s: String,
    pub flanks3_a: String,
    pub loop_s: String,
    pub loop_a: String,
    pub mirna_s: String,
    pub mirna_a: String,
    #[serde(default)]
    pub mirna_length: usize,
    #[serde(default)]
    pub mirna_min: usize,
    #[serde(default)]
    pub mirna_max: usize,
    #[serde(default)]
    pub mirna_end_5: i32,
    #[serde(default)]
    pub mirna_end_3: i32,
    #[serde(default)]
    pub structure: String,
    #[serde(default)]
    pub homogeneity: i32,
    #[serde(default)]
    pub mirbase_link: String,
    pub active_strand: u8,
}

/// A scaffold together with the patterns compiled from its active strand(s).
/// The patterns are only ever recomputed through `set_strands`,
/// `set_active_strand` or `recompute_patterns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaffoldRecord")]
pub struct Scaffold {
    #[serde(flatten)]
    record: ScaffoldRecord,
    #[serde(skip)]
    strand: ActiveStrand,
    patterns: PatternSet,
}

impl Scaffold {
    pub fn new(record: ScaffoldRecord) -> Result<Self, ScaffoldError> {
        let strand = ActiveStrand::try_from(record.active_strand)?;
        let patterns = compile(&selected(&record, strand))?;
        debug!("Scaffold {}: compiled {} pattern(s).", record.name, patterns.len());
        Ok(Scaffold { record, strand, patterns })
    }

    pub fn record(&self) -> &ScaffoldRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn active_strand(&self) -> ActiveStrand {
        self.strand
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Antisense first, then sense.
    pub fn selected_strands(&self) -> Vec<&str> {
        selected(&self.record, self.strand)
    }

    /// Replace both miRNA strands. On error the scaffold is left unchanged.
    pub fn set_strands(&mut self, mirna_s: &str, mirna_a: &str) -> Result<(), ScaffoldError> {
        let mut record = self.record.clone();
        record.mirna_s = mirna_s.to_string();
        record.mirna_a = mirna_a.to_string();
        *self = Scaffold::new(record)?;
        Ok(())
    }

    /// On error the scaffold is left unchanged.
    pub fn set_active_strand(&mut self, indicator: u8) -> Result<(), ScaffoldError> {
        let mut record = self.record.clone();
        record.active_strand = indicator;
        *self = Scaffold::new(record)?;
        Ok(())
    }

    pub fn recompute_patterns(&mut self) -> Result<(), ScaffoldError> {
        self.patterns = compile(&self.selected_strands())?;
        Ok(())
    }

    /// `flanks5_s + sirna1 + loop_s + sirna2 + flanks3_s`, uppercased.
    pub fn template(&self, sirna1: &str, sirna2: &str) -> String {
        let r = &self.record;
        [r.flanks5_s.as_str(), sirna1, &r.loop_s, sirna2, &r.flanks3_s]
            .concat()
            .to_uppercase()
    }

    /// Load a JSON list of scaffold records, compiling each one.
    pub fn list_from_json(s: &str) -> serde_json::Result<Vec<Scaffold>> {
        serde_json::from_str(s)
    }
}

impl TryFrom<ScaffoldRecord> for Scaffold {
    type Error = ScaffoldError;

    fn try_from(record: ScaffoldRecord) -> Result<Self, Self::Error> {
        Scaffold::new(record)
    }
}

fn selected(record: &ScaffoldRecord, strand: ActiveStrand) -> Vec<&str> {
    match strand {
        ActiveStrand::Both => vec![record.mirna_a.as_str(), record.mirna_s.as_str()],
        ActiveStrand::Antisense => vec![record.mirna_a.as_str()],
        ActiveStrand::Sense => vec![record.mirna_s.as_str()],
    }
}

use std::fmt;
use std::io;
use std::error::Error;

#[derive(Debug)]
pub enum StructureFileError {
    Io(io::Error),
    Format { line: usize, reason: String }, // 1-based line number
}

impl StructureFileError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format { line, reason: reason.into() }
    }
}

impl fmt::Display for StructureFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Format { line, reason } => write!(f, "Format error at line {line}: {reason}"),
        }
    }
}

impl Error for StructureFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StructureFileError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

use std::fmt;
use std::str::FromStr;

use crate::Base;
use crate::BaseClass;

/// Lengths of the variable run between the two anchor pairs.
pub const MIDDLE_RUNS: [usize; 3] = [15, 16, 17];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    InvalidWeight(u8),
    Syntax(String, String), // pattern and reason
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidWeight(w) => {
                write!(f, "Invalid weight class {} (expected 1-4)", w)
            }
            PatternError::Syntax(p, reason) => {
                write!(f, "Invalid pattern '{}': {}", p, reason)
            }
        }
    }
}

impl std::error::Error for PatternError {}


/// How many of the four anchor bases must match exactly.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeightClass {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl WeightClass {
    pub const ALL: [WeightClass; 4] = [
        WeightClass::One,
        WeightClass::Two,
        WeightClass::Three,
        WeightClass::Four,
    ];

    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize - 1
    }
}

impl TryFrom<u8> for WeightClass {
    type Error = PatternError;
    fn try_from(w: u8) -> Result<Self, Self::Error> {
        match w {
            1 => Ok(WeightClass::One),
            2 => Ok(WeightClass::Two),
            3 => Ok(WeightClass::Three),
            4 => Ok(WeightClass::Four),
            _ => Err(PatternError::InvalidWeight(w)),
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}


/// Two anchor classes, a run of `middle` arbitrary bases, two anchor classes.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Pattern {
    pub begin: [BaseClass; 2],
    pub middle: usize,
    pub end: [BaseClass; 2],
}

impl Pattern {
    /// Number of bases a matching window spans.
    pub fn window_len(&self) -> usize {
        self.middle.saturating_add(4)
    }

    /// Position-wise comparison of a window of exactly `window_len()` characters.
    pub fn is_match(&self, window: &[u8]) -> bool {
        if window.len() != self.window_len() {
            return false;
        }
        let n = window.len();
        self.begin[0].accepts(window[0] as char)
            && self.begin[1].accepts(window[1] as char)
            && self.end[0].accepts(window[n - 2] as char)
            && self.end[1].accepts(window[n - 1] as char)
            && window[2..n - 2].iter().all(|&c| BaseClass::ANY.accepts(c as char))
    }

    /// Offset of the leftmost matching window in `candidate`.
    pub fn find(&self, candidate: &str) -> Option<usize> {
        candidate.as_bytes()
            .windows(self.window_len())
            .position(|w| self.is_match(w))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{{{}}}{}{}",
            self.begin[0], self.begin[1],
            BaseClass::ANY, self.middle,
            self.end[0], self.end[1])
    }
}

/// One class with its repeat count, e.g. `[UTGCA]{15}`.
fn next_atom(s: &str) -> Result<(BaseClass, usize, &str), String> {
    let (class, rest) = if let Some(inner) = s.strip_prefix('[') {
        let close = inner.find(']').ok_or("unterminated character class")?;
        let mut class = BaseClass::EMPTY;
        for c in inner[..close].chars() {
            let base = Base::try_from(c).map_err(|e| e.to_string())?;
            class = class.with(base);
        }
        if class.is_empty() {
            return Err("empty character class".into());
        }
        (class, &inner[close + 1..])
    } else {
        let c = s.chars().next().ok_or("unexpected end of pattern")?;
        let base = Base::try_from(c).map_err(|e| e.to_string())?;
        (BaseClass::single(base), &s[c.len_utf8()..])
    };

    if let Some(inner) = rest.strip_prefix('{') {
        let close = inner.find('}').ok_or("unterminated repeat count")?;
        let count = inner[..close].parse::<usize>()
            .map_err(|_| format!("invalid repeat count '{}'", &inner[..close]))?;
        Ok((class, count, &inner[close + 1..]))
    } else {
        Ok((class, 1, rest))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = |reason: String| PatternError::Syntax(s.to_string(), reason);

        let mut atoms = Vec::with_capacity(5);
        let mut rest = s.trim();
        while !rest.is_empty() {
            let (class, count, tail) = next_atom(rest).map_err(syntax)?;
            atoms.push((class, count));
            rest = tail;
        }

        let [b0, b1, mid, e0, e1] = atoms[..] else {
            return Err(syntax(format!("expected 5 atoms, found {}", atoms.len())));
        };
        if [b0, b1, e0, e1].iter().any(|&(_, n)| n != 1) {
            return Err(syntax("anchors cannot repeat".into()));
        }
        if mid.0 != BaseClass::ANY || mid.1 == 0 {
            return Err(syntax("middle run must be a repeated [UTGCA]".into()));
        }

        Ok(Pattern {
            begin: [b0.0, b1.0],
            middle: mid.1,
            end: [e0.0, e1.0],
        })
    }
}

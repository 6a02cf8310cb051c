
use std::fmt;
use std::borrow::Borrow;
use std::ops::Deref;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    InvalidChar(char, usize),
    TooShort { length: usize, minimum: usize },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidChar(c, i) => {
                write!(f, "Unsupported nucleotide '{}' at position {}", c, i)
            }
            SequenceError::TooShort { length, minimum } => {
                write!(f, "Sequence of length {} is too short (need at least {})",
                    length, minimum)
            }
        }
    }
}

impl std::error::Error for SequenceError {}


/// The symbols of a strand. The variant order is the order in which
/// character classes are rendered, U must stay next to T.
#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Base { U, T, G, C, A }
pub const BCOUNT: usize = 5; // 5 Base variants for classes.

pub const ALPHABET: [Base; BCOUNT] = [Base::U, Base::T, Base::G, Base::C, Base::A];

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Base::U),
            'T' => Ok(Base::T),
            'G' => Ok(Base::G),
            'C' => Ok(Base::C),
            'A' => Ok(Base::A),
            _ => Err(SequenceError::InvalidChar(c, 0)),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::U => 'U',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
            Base::A => 'A',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Base {
    /// U and T are the same nucleotide for matching purposes.
    pub fn is_uracil(&self) -> bool {
        matches!(self, Base::U | Base::T)
    }

    /// Every symbol that counts as an exact match of this base.
    pub fn acid_form(&self) -> BaseClass {
        if self.is_uracil() {
            BaseClass::single(Base::U).with(Base::T)
        } else {
            BaseClass::single(*self)
        }
    }

    /// Every symbol that explicitly mismatches this base.
    pub fn excluded_form(&self) -> BaseClass {
        self.acid_form().complement()
    }
}


/// A set of bases, one bit per `Base` variant.
#[derive(Clone, Copy, Hash, Debug, Eq, PartialEq)]
pub struct BaseClass(u8);

impl BaseClass {
    pub const EMPTY: BaseClass = BaseClass(0);
    pub const ANY: BaseClass = BaseClass((1 << BCOUNT) - 1);

    pub fn single(base: Base) -> Self {
        BaseClass(1 << base as u8)
    }

    pub fn with(self, base: Base) -> Self {
        BaseClass(self.0 | 1 << base as u8)
    }

    pub fn contains(&self, base: Base) -> bool {
        self.0 & (1 << base as u8) != 0
    }

    /// Case-insensitive; anything outside the alphabet is never accepted.
    pub fn accepts(&self, c: char) -> bool {
        Base::try_from(c).is_ok_and(|b| self.contains(b))
    }

    pub fn complement(self) -> Self {
        BaseClass(!self.0 & Self::ANY.0)
    }

    pub fn union(self, other: BaseClass) -> Self {
        BaseClass(self.0 | other.0)
    }

    pub fn is_disjoint(&self, other: &BaseClass) -> bool {
        self.0 & other.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Base> + '_ {
        ALPHABET.into_iter().filter(|b| self.contains(*b))
    }
}

impl FromIterator<Base> for BaseClass {
    fn from_iter<I: IntoIterator<Item = Base>>(iter: I) -> Self {
        iter.into_iter().fold(BaseClass::EMPTY, |acc, b| acc.with(b))
    }
}

/// A single member is written as the literal, anything else as a bracketed
/// class, e.g. `[UTCA]`.
impl fmt::Display for BaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            return write!(f, "{}", self.iter().map(char::from).collect::<String>());
        }
        write!(f, "[")?;
        for base in self.iter() {
            write!(f, "{}", base)?;
        }
        write!(f, "]")
    }
}


/// An uppercase strand over the five-letter alphabet.
#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct NucleotideSequence(Vec<Base>);

impl Deref for NucleotideSequence {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<[Base]> for NucleotideSequence {
    fn borrow(&self) -> &[Base] {
        &self.0
    }
}

impl TryFrom<&str> for NucleotideSequence {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match Base::try_from(c) {
                Ok(b) => vec.push(b),
                Err(SequenceError::InvalidChar(c, _)) => {
                    return Err(SequenceError::InvalidChar(c, i));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(NucleotideSequence(vec))
    }
}

impl fmt::Display for NucleotideSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

//! Package versions: tuples of non-negative integers, compared
//! lexicographically.

use std::fmt;

use crate::error::JudgeError;

/// A parsed version string: `[0-9]+(\.[0-9]+)*`.
///
/// Equality and ordering are componentwise/lexicographic over the tuple of
/// numbers — this is exactly what `Vec<u64>`'s derived `Ord` gives us, so a
/// shorter tuple that is a prefix of a longer one sorts before it (`1.2` <
/// `1.2.0`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    numbers: Vec<u64>,
}

impl Version {
    /// Parse a version string, rejecting anything but digits and dots.
    pub fn parse(s: &str) -> Result<Self, JudgeError> {
        if s.is_empty() || !s.chars().next().unwrap().is_ascii_digit() {
            return Err(JudgeError::malformed(format!("bad version format: {s}")));
        }
        let mut numbers = Vec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(JudgeError::malformed(format!("bad version format: {s}")));
            }
            let n: u64 = part
                .parse()
                .map_err(|_| JudgeError::malformed(format!("bad version format: {s}")))?;
            numbers.push(n);
        }
        Ok(Version { numbers })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.numbers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

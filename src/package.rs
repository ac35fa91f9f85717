//! Package identities: a name plus a [`Version`].

use std::fmt;

use crate::error::JudgeError;
use crate::version::Version;

/// Characters allowed in a package or range name: `[.+a-zA-Z0-9-]+`.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')
}

/// Split `s` into a leading run of name characters and the rest.
pub(crate) fn take_name(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

/// A concrete, installable package: `(name, version)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    pub name: String,
    pub version: Version,
}

impl Package {
    /// Parse `NAME=VERSION`.
    pub fn parse(s: &str) -> Result<Self, JudgeError> {
        let (name, rest) = take_name(s);
        if name.is_empty() || !rest.starts_with('=') {
            return Err(JudgeError::malformed(format!("bad package format: {s}")));
        }
        let version = Version::parse(&rest[1..])?;
        Ok(Package {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.version)
    }
}

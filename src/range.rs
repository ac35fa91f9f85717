//! Package ranges, and the final-constraint / command wrappers built on top
//! of them.

use std::fmt;

use crate::error::JudgeError;
use crate::package::{take_name, Package};
use crate::version::Version;

/// `+`/`-` sign shared by [`Constraint`] and [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn parse(c: char) -> Option<Self> {
        match c {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// A package name with an optional, possibly double-sided, version bound.
///
/// Syntax: `name`, `name=V`, `name<V`, `name<=V`, `name>V`, `name>=V`. A
/// range never carries both `min` and `max` except when `inclusive` and both
/// equal (the `=V` form) — a range only ever has one bound direction active
/// at a time, so rendering never needs to emit both a `>` and a `<` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRange {
    pub name: String,
    pub min: Option<Version>,
    pub max: Option<Version>,
    pub inclusive: bool,
}

impl PackageRange {
    /// Parse a range string.
    pub fn parse(s: &str) -> Result<Self, JudgeError> {
        let (name, rest) = take_name(s);
        if name.is_empty() {
            return Err(JudgeError::malformed(format!(
                "bad package range format: {s}"
            )));
        }
        let name = name.to_string();
        if rest.is_empty() {
            return Ok(PackageRange {
                name,
                min: None,
                max: None,
                inclusive: false,
            });
        }
        let (op, rest) = if let Some(r) = rest.strip_prefix("<=") {
            ("<=", r)
        } else if let Some(r) = rest.strip_prefix(">=") {
            (">=", r)
        } else if let Some(r) = rest.strip_prefix('<') {
            ("<", r)
        } else if let Some(r) = rest.strip_prefix('>') {
            (">", r)
        } else if let Some(r) = rest.strip_prefix('=') {
            ("=", r)
        } else {
            return Err(JudgeError::malformed(format!(
                "bad package range format: {s}"
            )));
        };
        let version = Version::parse(rest)?;
        let (min, max, inclusive) = match op {
            "=" => (Some(version.clone()), Some(version), true),
            "<" => (None, Some(version), false),
            "<=" => (None, Some(version), true),
            ">" => (Some(version), None, false),
            ">=" => (Some(version), None, true),
            _ => unreachable!(),
        };
        Ok(PackageRange {
            name,
            min,
            max,
            inclusive,
        })
    }

    /// Whether `package` is in this range.
    pub fn contains(&self, package: &Package) -> bool {
        if self.name != package.name {
            return false;
        }
        if let Some(min) = &self.min {
            let ok = if self.inclusive {
                *min <= package.version
            } else {
                *min < package.version
            };
            if !ok {
                return false;
            }
        }
        if let Some(max) = &self.max {
            let ok = if self.inclusive {
                package.version <= *max
            } else {
                package.version < *max
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for PackageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (&self.min, &self.max, self.inclusive) {
            (Some(v), Some(_), true) => write!(f, "={v}"),
            (Some(v), None, true) => write!(f, ">={v}"),
            (Some(v), None, false) => write!(f, ">{v}"),
            (None, Some(v), true) => write!(f, "<={v}"),
            (None, Some(v), false) => write!(f, "<{v}"),
            (None, None, _) => Ok(()),
            (Some(_), Some(_), false) => unreachable!("a range never has two exclusive bounds"),
        }
    }
}

/// A final-state constraint: `+range` (at least one present) or `-range`
/// (none present).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub kind: Sign,
    pub range: PackageRange,
}

impl Constraint {
    pub fn parse(s: &str) -> Result<Self, JudgeError> {
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(Sign::parse)
            .ok_or_else(|| JudgeError::malformed(format!("bad constraint format: {s}")))?;
        let range = PackageRange::parse(chars.as_str())?;
        Ok(Constraint { kind, range })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.range)
    }
}

/// A single install (`+`) or uninstall (`-`) command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub action: Sign,
    pub package: Package,
}

impl Command {
    pub fn parse(s: &str) -> Result<Self, JudgeError> {
        let mut chars = s.chars();
        let action = chars
            .next()
            .and_then(Sign::parse)
            .ok_or_else(|| JudgeError::malformed(format!("bad command format: {s}")))?;
        let package = Package::parse(chars.as_str())?;
        Ok(Command { action, package })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action, self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> Package {
        Package {
            name: name.to_string(),
            version: Version::parse(version).unwrap(),
        }
    }

    #[test]
    fn unbounded_range_matches_any_version() {
        let r = PackageRange::parse("a").unwrap();
        assert!(r.contains(&pkg("a", "0")));
        assert!(r.contains(&pkg("a", "99.0")));
        assert!(!r.contains(&pkg("b", "0")));
    }

    #[test]
    fn exact_range() {
        let r = PackageRange::parse("a=1.2").unwrap();
        assert!(r.contains(&pkg("a", "1.2")));
        assert!(!r.contains(&pkg("a", "1.3")));
    }

    #[test]
    fn less_than() {
        let r = PackageRange::parse("a<2").unwrap();
        assert!(r.contains(&pkg("a", "1")));
        assert!(!r.contains(&pkg("a", "2")));
    }

    #[test]
    fn less_or_equal() {
        let r = PackageRange::parse("a<=2").unwrap();
        assert!(r.contains(&pkg("a", "2")));
        assert!(!r.contains(&pkg("a", "2.1")));
    }

    #[test]
    fn greater_than() {
        let r = PackageRange::parse("a>1").unwrap();
        assert!(!r.contains(&pkg("a", "1")));
        assert!(r.contains(&pkg("a", "1.1")));
    }

    #[test]
    fn greater_or_equal() {
        let r = PackageRange::parse("a>=1").unwrap();
        assert!(r.contains(&pkg("a", "1")));
        assert!(!r.contains(&pkg("a", "0.9")));
    }

    #[test]
    fn display_roundtrips_canonical_forms() {
        for s in ["a", "a=1.2", "a<2", "a<=2", "a>1", "a>=1"] {
            assert_eq!(PackageRange::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn rejects_bad_operator() {
        assert!(PackageRange::parse("a!1").is_err());
    }

    #[test]
    fn constraint_parses_sign_and_range() {
        let c = Constraint::parse("+a>=1").unwrap();
        assert_eq!(c.kind, Sign::Plus);
        assert_eq!(c.to_string(), "+a>=1");
        let c = Constraint::parse("-a").unwrap();
        assert_eq!(c.kind, Sign::Minus);
    }

    #[test]
    fn command_parses_sign_and_package() {
        let c = Command::parse("+a=1").unwrap();
        assert_eq!(c.action, Sign::Plus);
        assert_eq!(c.to_string(), "+a=1");
        let c = Command::parse("-a=1").unwrap();
        assert_eq!(c.action, Sign::Minus);
    }

    #[test]
    fn command_rejects_missing_sign() {
        assert!(Command::parse("a=1").is_err());
    }
}

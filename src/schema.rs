//! JSON schema for the four input files (repository, initial state,
//! commands, constraints) and the conversion into core domain types.

use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::JudgeError;
use crate::package::Package;
use crate::range::{Command, Constraint, PackageRange};
use crate::repository::{PackageProperties, Repository, RepositoryBuilder};
use crate::version::Version;

/// `size` accepts a JSON integer or a numeric JSON string, for upstream
/// tooling that serializes sizes as text.
fn deserialize_lenient_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SizeJson {
        Number(u64),
        Text(String),
    }

    match SizeJson::deserialize(deserializer)? {
        SizeJson::Number(n) => Ok(n),
        SizeJson::Text(s) => s.parse().map_err(|_| {
            D::Error::custom(format!("size is not a non-negative integer: {s}"))
        }),
    }
}

#[derive(Debug, Deserialize)]
struct RepositoryEntryJson {
    name: String,
    version: String,
    #[serde(deserialize_with = "deserialize_lenient_size")]
    size: u64,
    #[serde(default)]
    depends: Option<Vec<Vec<String>>>,
    #[serde(default)]
    conflicts: Option<Vec<String>>,
}

/// Everything the driver needs, converted from JSON into core types.
pub struct RunInputs {
    pub repository: Repository,
    pub initial: Vec<Package>,
    pub commands: Vec<Command>,
    pub constraints: Vec<Constraint>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, JudgeError> {
    let text = fs::read_to_string(path)
        .map_err(|e| JudgeError::malformed(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| JudgeError::malformed(format!("bad JSON in {}: {e}", path.display())))
}

fn build_repository(entries: Vec<RepositoryEntryJson>) -> Result<Repository, JudgeError> {
    let mut builder = RepositoryBuilder::new();
    for entry in entries {
        let package = Package {
            name: entry.name,
            version: Version::parse(&entry.version)?,
        };
        let depends = entry
            .depends
            .unwrap_or_default()
            .into_iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|s| PackageRange::parse(s))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let conflicts = entry
            .conflicts
            .unwrap_or_default()
            .iter()
            .map(|s| PackageRange::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        builder.insert(
            package,
            PackageProperties {
                depends,
                conflicts,
                size: entry.size,
            },
        )?;
    }
    Ok(builder.build())
}

/// Read and parse all four input files: repository, initial state,
/// commands, constraints, in that order.
pub fn load_run_inputs(
    repository: &Path,
    initial: &Path,
    commands: &Path,
    constraints: &Path,
) -> Result<RunInputs, JudgeError> {
    let entries: Vec<RepositoryEntryJson> = read_json(repository)?;
    let repository = build_repository(entries)?;

    let initial_strings: Vec<String> = read_json(initial)?;
    let initial = initial_strings
        .iter()
        .map(|s| Package::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let command_strings: Vec<String> = read_json(commands)?;
    let commands = command_strings
        .iter()
        .map(|s| Command::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let constraint_strings: Vec<String> = read_json(constraints)?;
    let constraints = constraint_strings
        .iter()
        .map(|s| Constraint::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RunInputs {
        repository,
        initial,
        commands,
        constraints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_size_accepts_integer() {
        let entry: RepositoryEntryJson =
            serde_json::from_str(r#"{"name":"a","version":"1","size":7}"#).unwrap();
        assert_eq!(entry.size, 7);
    }

    #[test]
    fn lenient_size_accepts_numeric_string() {
        let entry: RepositoryEntryJson =
            serde_json::from_str(r#"{"name":"a","version":"1","size":"7"}"#).unwrap();
        assert_eq!(entry.size, 7);
    }

    #[test]
    fn lenient_size_rejects_non_numeric_string() {
        let result: Result<RepositoryEntryJson, _> =
            serde_json::from_str(r#"{"name":"a","version":"1","size":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn depends_and_conflicts_default_to_empty() {
        let entry: RepositoryEntryJson =
            serde_json::from_str(r#"{"name":"a","version":"1","size":0}"#).unwrap();
        assert!(entry.depends.is_none());
        assert!(entry.conflicts.is_none());
    }

    #[test]
    fn build_repository_converts_entries() {
        let entries: Vec<RepositoryEntryJson> = serde_json::from_str(
            r#"[{"name":"a","version":"1","size":5,"depends":[["b>=1"]],"conflicts":["c"]}]"#,
        )
        .unwrap();
        let repo = build_repository(entries).unwrap();
        assert_eq!(repo.len(), 1);
        let id = repo.ids().next().unwrap();
        assert_eq!(repo.size_of(id), 5);
        assert_eq!(repo.properties_of(id).depends.len(), 1);
        assert_eq!(repo.properties_of(id).conflicts.len(), 1);
    }

    #[test]
    fn build_repository_propagates_parse_errors() {
        let entries: Vec<RepositoryEntryJson> =
            serde_json::from_str(r#"[{"name":"a","version":"x","size":0}]"#).unwrap();
        assert!(build_repository(entries).is_err());
    }
}

//! Range resolver: precomputes, for every distinct [`PackageRange`], the
//! ordered list of repository ids it matches.

use std::collections::HashMap;

use crate::range::PackageRange;
use crate::repository::{PackageId, Repository};

/// Precomputed range → matching-ids table.
///
/// Built once from every range appearing in dependency clauses, conflicts,
/// and final constraints; deduplicated by range identity (`name`, `min`,
/// `max`, `inclusive`). A range whose name is unknown in the repository
/// resolves to an empty list rather than an error.
#[derive(Default)]
pub struct RangeResolver {
    matches: HashMap<PackageRange, Vec<PackageId>>,
}

impl RangeResolver {
    /// Resolve every range yielded by `ranges` against `repo`, in repository
    /// id order, and cache the result.
    pub fn build<'a>(repo: &Repository, ranges: impl Iterator<Item = &'a PackageRange>) -> Self {
        let mut matches: HashMap<PackageRange, Vec<PackageId>> = HashMap::new();
        for range in ranges {
            if matches.contains_key(range) {
                continue;
            }
            let ids: Vec<PackageId> = repo
                .ids()
                .filter(|&id| range.contains(repo.package_of(id)))
                .collect();
            matches.insert(range.clone(), ids);
        }
        RangeResolver { matches }
    }

    /// The ids matching `range`, in repository insertion order. Ranges that
    /// were never registered via [`build`](Self::build) also resolve to an
    /// empty slice.
    pub fn matches(&self, range: &PackageRange) -> &[PackageId] {
        self.matches.get(range).map(Vec::as_slice).unwrap_or(&[])
    }
}

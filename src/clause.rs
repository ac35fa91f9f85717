//! Clause database: disjunctions of signed literals over package-presence
//! variables, generated from dependencies, conflicts, and final
//! constraints.

use std::fmt;
use std::ops::Not;

use crate::range::{Constraint, Sign};
use crate::repository::{PackageId, Repository};
use crate::resolver::RangeResolver;

/// A signed package-presence literal: `+i` ("present") or `-i` ("absent").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: PackageId,
    positive: bool,
}

impl Literal {
    pub fn positive(var: PackageId) -> Self {
        Literal { var, positive: true }
    }

    pub fn negative(var: PackageId) -> Self {
        Literal {
            var,
            positive: false,
        }
    }

    pub fn var(self) -> PackageId {
        self.var
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }

    /// Whether this literal is satisfied when `var` is assigned `present`.
    pub fn satisfied_by(self, present: bool) -> bool {
        self.positive == present
    }

    /// Render as `name=version` (positive) or `-name=version` (negative),
    /// the form used in clause diagnostics.
    pub fn render(self, repo: &Repository) -> String {
        let pkg = repo.package_of(self.var);
        if self.positive {
            pkg.to_string()
        } else {
            format!("-{pkg}")
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            positive: !self.positive,
        }
    }
}

/// Which input produced a clause — drives whether its violation is fatal
/// mid-run (repository) or only at the end (final constraint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseOrigin {
    Repository,
    FinalConstraint,
}

/// A disjunction of literals, satisfied when any one matches the current
/// assignment.
#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Vec<Literal>,
    pub origin: ClauseOrigin,
}

impl Clause {
    /// Render the clause's literals, joined by spaces, for diagnostics.
    pub fn render(&self, repo: &Repository) -> String {
        self.literals
            .iter()
            .map(|&lit| lit.render(repo))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Dense id of a clause in a [`ClauseDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(pub(crate) u32);

impl ClauseId {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// All clauses derived from a repository's `depends`/`conflicts` plus a set
/// of final constraints. Clauses with index `< repo_cutoff` are repository
/// clauses; the rest are final-constraint clauses.
pub struct ClauseDatabase {
    clauses: Vec<Clause>,
    repo_cutoff: u32,
}

impl ClauseDatabase {
    /// Build the database. `constraints` are final-state constraints in
    /// input order.
    pub fn build(repo: &Repository, resolver: &RangeResolver, constraints: &[Constraint]) -> Self {
        let mut clauses = Vec::new();

        // 1. Depends.
        for id in repo.ids() {
            for dep_clause in &repo.properties_of(id).depends {
                let mut literals = vec![Literal::negative(id)];
                for range in dep_clause {
                    literals.extend(resolver.matches(range).iter().map(|&m| Literal::positive(m)));
                }
                clauses.push(Clause {
                    literals,
                    origin: ClauseOrigin::Repository,
                });
            }
        }

        // 2. Conflicts.
        for id in repo.ids() {
            for range in &repo.properties_of(id).conflicts {
                for &q in resolver.matches(range) {
                    clauses.push(Clause {
                        literals: vec![Literal::negative(id), Literal::negative(q)],
                        origin: ClauseOrigin::Repository,
                    });
                }
            }
        }

        let repo_cutoff = clauses.len() as u32;

        // 3. Final constraints.
        for constraint in constraints {
            match constraint.kind {
                Sign::Plus => {
                    let literals = resolver
                        .matches(&constraint.range)
                        .iter()
                        .map(|&m| Literal::positive(m))
                        .collect();
                    clauses.push(Clause {
                        literals,
                        origin: ClauseOrigin::FinalConstraint,
                    });
                }
                Sign::Minus => {
                    for &q in resolver.matches(&constraint.range) {
                        clauses.push(Clause {
                            literals: vec![Literal::negative(q)],
                            origin: ClauseOrigin::FinalConstraint,
                        });
                    }
                }
            }
        }

        ClauseDatabase {
            clauses,
            repo_cutoff,
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn repo_cutoff(&self) -> u32 {
        self.repo_cutoff
    }

    pub fn is_repository_clause(&self, id: ClauseId) -> bool {
        id.0 < self.repo_cutoff
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.as_usize()]
    }

    pub fn ids(&self) -> impl Iterator<Item = ClauseId> {
        (0..self.clauses.len() as u32).map(ClauseId)
    }
}

impl fmt::Debug for ClauseDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClauseDatabase")
            .field("clause_count", &self.clauses.len())
            .field("repo_cutoff", &self.repo_cutoff)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;
    use crate::range::PackageRange;
    use crate::repository::{PackageProperties, RepositoryBuilder};
    use crate::version::Version;

    fn pkg(name: &str, version: &str) -> Package {
        Package {
            name: name.to_string(),
            version: Version::parse(version).unwrap(),
        }
    }

    #[test]
    fn literal_negation_flips_polarity_keeps_var() {
        let repo = {
            let mut b = RepositoryBuilder::new();
            b.insert(pkg("a", "1"), PackageProperties::default())
                .unwrap();
            b.build()
        };
        let id = repo.ids().next().unwrap();
        let lit = Literal::positive(id);
        assert!(lit.is_positive());
        assert!(!(!lit).is_positive());
        assert_eq!((!lit).var(), id);
    }

    #[test]
    fn depends_clause_has_negated_self_then_matches() {
        let mut b = RepositoryBuilder::new();
        let range = PackageRange::parse("b>=1").unwrap();
        let a = b
            .insert(
                pkg("a", "1"),
                PackageProperties {
                    depends: vec![vec![range.clone()]],
                    ..Default::default()
                },
            )
            .unwrap();
        let bb = b.insert(pkg("b", "1"), PackageProperties::default()).unwrap();
        let repo = b.build();
        let resolver = RangeResolver::build(&repo, std::iter::once(&range));
        let db = ClauseDatabase::build(&repo, &resolver, &[]);

        assert_eq!(db.repo_cutoff(), 1);
        let clause = db.get(ClauseId(0));
        assert_eq!(clause.literals, vec![Literal::negative(a), Literal::positive(bb)]);
    }

    #[test]
    fn unmatched_dependency_becomes_unit_forbidding_clause() {
        let mut b = RepositoryBuilder::new();
        let range = PackageRange::parse("ghost").unwrap();
        let a = b
            .insert(
                pkg("a", "1"),
                PackageProperties {
                    depends: vec![vec![range.clone()]],
                    ..Default::default()
                },
            )
            .unwrap();
        let repo = b.build();
        let resolver = RangeResolver::build(&repo, std::iter::once(&range));
        let db = ClauseDatabase::build(&repo, &resolver, &[]);
        assert_eq!(db.get(ClauseId(0)).literals, vec![Literal::negative(a)]);
    }

    #[test]
    fn self_conflict_forbids_the_package() {
        let mut b = RepositoryBuilder::new();
        let range = PackageRange::parse("a").unwrap();
        let a = b
            .insert(
                pkg("a", "1"),
                PackageProperties {
                    conflicts: vec![range.clone()],
                    ..Default::default()
                },
            )
            .unwrap();
        let repo = b.build();
        let resolver = RangeResolver::build(&repo, std::iter::once(&range));
        let db = ClauseDatabase::build(&repo, &resolver, &[]);
        assert_eq!(
            db.get(ClauseId(0)).literals,
            vec![Literal::negative(a), Literal::negative(a)]
        );
    }

    #[test]
    fn final_plus_constraint_with_zero_matches_is_empty_clause() {
        let repo = RepositoryBuilder::new().build();
        let constraint = Constraint::parse("+ghost").unwrap();
        let resolver = RangeResolver::build(&repo, std::iter::once(&constraint.range));
        let db = ClauseDatabase::build(&repo, &resolver, std::slice::from_ref(&constraint));
        assert_eq!(db.repo_cutoff(), 0);
        assert!(db.get(ClauseId(0)).literals.is_empty());
        assert_eq!(db.get(ClauseId(0)).origin, ClauseOrigin::FinalConstraint);
    }

    #[test]
    fn final_minus_constraint_emits_one_unit_clause_per_match() {
        let mut b = RepositoryBuilder::new();
        b.insert(pkg("a", "1"), PackageProperties::default()).unwrap();
        b.insert(pkg("a", "2"), PackageProperties::default()).unwrap();
        let repo = b.build();
        let constraint = Constraint::parse("-a").unwrap();
        let resolver = RangeResolver::build(&repo, std::iter::once(&constraint.range));
        let db = ClauseDatabase::build(&repo, &resolver, std::slice::from_ref(&constraint));
        assert_eq!(db.clauses().len(), 2);
        for clause in db.clauses() {
            assert_eq!(clause.literals.len(), 1);
            assert!(!clause.literals[0].is_positive());
        }
    }
}

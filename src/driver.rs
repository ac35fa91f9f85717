//! Command driver: applies install/uninstall commands in order, accumulates
//! cost, and checks consistency after every step.

use std::collections::HashSet;

use crate::clause::ClauseDatabase;
use crate::engine::WatchedLiteralEngine;
use crate::error::JudgeError;
use crate::package::Package;
use crate::range::{Constraint, PackageRange, Sign};
use crate::repository::{PackageId, Repository};
use crate::resolver::RangeResolver;

/// Fixed cost charged for every uninstall command, regardless of the
/// package's own size.
pub const UNINSTALL_COST: u64 = 1_000_000;

/// Owns the repository-derived clauses, the watched-literal engine, and the
/// running cost for one judged run.
pub struct JudgeContext<'r> {
    repo: &'r Repository,
    clauses: ClauseDatabase,
    engine: WatchedLiteralEngine,
    cost: u64,
}

impl<'r> JudgeContext<'r> {
    /// Build the context: resolve every range once, generate the clause
    /// database, initialize the engine from `initial`, and reject an
    /// initial state that already violates a repository clause.
    pub fn new(
        repo: &'r Repository,
        initial: &[Package],
        constraints: &[Constraint],
    ) -> Result<Self, JudgeError> {
        let mut initial_ids = HashSet::with_capacity(initial.len());
        for package in initial {
            let id = repo
                .id_of(package)
                .ok_or_else(|| JudgeError::InitialStateInvalid(format!("unknown package {package}")))?;
            initial_ids.insert(id);
        }

        let resolver = RangeResolver::build(repo, all_ranges(repo, constraints));
        let clauses = ClauseDatabase::build(repo, &resolver, constraints);
        let engine = WatchedLiteralEngine::new(clauses.clauses(), repo.len() as u32, &initial_ids);

        if let Some(id) = engine.first_unsat_below(clauses.repo_cutoff()) {
            return Err(JudgeError::InitialStateInvalid(
                clauses.get(id).render(repo),
            ));
        }

        Ok(JudgeContext {
            repo,
            clauses,
            engine,
            cost: 0,
        })
    }

    /// Apply one command, updating cost and the assignment, and check that
    /// no repository clause was broken.
    pub fn apply(&mut self, command: &crate::range::Command) -> Result<(), JudgeError> {
        use crate::clause::Literal;

        match command.action {
            Sign::Plus => {
                let id = self.repo.id_of(&command.package).ok_or_else(|| {
                    JudgeError::BadCommand(format!(
                        "package not in repository: {}",
                        command.package
                    ))
                })?;
                if self.engine.is_present(id) {
                    return Err(JudgeError::BadCommand(format!(
                        "package already installed: {}",
                        command.package
                    )));
                }
                self.engine.assign(Literal::positive(id), self.clauses.clauses());
                self.cost += self.repo.size_of(id);
            }
            Sign::Minus => {
                let id = self
                    .repo
                    .id_of(&command.package)
                    .filter(|&id| self.engine.is_present(id))
                    .ok_or_else(|| {
                        JudgeError::BadCommand(format!(
                            "package not installed: {}",
                            command.package
                        ))
                    })?;
                self.engine.assign(Literal::negative(id), self.clauses.clauses());
                self.cost += UNINSTALL_COST;
            }
        }

        if let Some(id) = self.engine.first_unsat_below(self.clauses.repo_cutoff()) {
            return Err(JudgeError::CommandInvalid {
                command: command.to_string(),
                clause: self.clauses.get(id).render(self.repo),
            });
        }
        Ok(())
    }

    /// Check every final-constraint clause and return the accumulated cost.
    pub fn finish(self) -> Result<u64, JudgeError> {
        if let Some(id) = self.engine.any_unsat() {
            return Err(JudgeError::ConstraintUnmet(
                self.clauses.get(id).render(self.repo),
            ));
        }
        Ok(self.cost)
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn is_present(&self, id: PackageId) -> bool {
        self.engine.is_present(id)
    }
}

/// Run a full sequence: build the context, apply every command in order,
/// and finish. This is the single entry point the CLI (and tests) drive.
pub fn judge(
    repo: &Repository,
    initial: &[Package],
    commands: &[crate::range::Command],
    constraints: &[Constraint],
) -> Result<u64, JudgeError> {
    let mut ctx = JudgeContext::new(repo, initial, constraints)?;
    for command in commands {
        ctx.apply(command)?;
    }
    ctx.finish()
}

/// Every range referenced anywhere: repository `depends`/`conflicts`, plus
/// final constraints. Feeds the one-time [`RangeResolver::build`] call.
fn all_ranges<'a>(
    repo: &'a Repository,
    constraints: &'a [Constraint],
) -> impl Iterator<Item = &'a PackageRange> {
    repo.ids()
        .flat_map(move |id| {
            let props = repo.properties_of(id);
            props
                .depends
                .iter()
                .flatten()
                .chain(props.conflicts.iter())
        })
        .chain(constraints.iter().map(|c| &c.range))
}

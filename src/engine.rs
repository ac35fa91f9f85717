//! Watched-literal engine: tracks, under single-literal flips, which
//! clauses are currently satisfied without rescanning every clause on every
//! assignment.

use std::collections::HashSet;

use crate::clause::{Clause, ClauseId, Literal};
use crate::repository::PackageId;

/// Mutable solving state layered over an immutable [`ClauseDatabase`].
///
/// Holds the current assignment, the presence set, the per-clause watch,
/// the literal → clause occurrence index, and the set of currently
/// unsatisfied clauses.
pub struct WatchedLiteralEngine {
    /// `val[v]`: `true` if package `v` is currently present. Index 0 is
    /// unused (variables are 1-based).
    val: Vec<bool>,
    /// `watch[c]`: the literal currently satisfying clause `c`, if any.
    watch: Vec<Option<Literal>>,
    /// Clauses containing `+v` / `-v`, indexed by `v`.
    occ_pos: Vec<Vec<ClauseId>>,
    occ_neg: Vec<Vec<ClauseId>>,
    /// Clause ids with no satisfied literal right now.
    unsat: HashSet<ClauseId>,
    /// Mirror of `val` as a set, for cheap presence queries.
    presence: HashSet<PackageId>,
}

impl WatchedLiteralEngine {
    /// Build the engine over `clauses` (1-based variables `1..=n_vars`),
    /// seeded with `initial_presence`.
    pub fn new(
        clauses: &[Clause],
        n_vars: u32,
        initial_presence: &HashSet<PackageId>,
    ) -> Self {
        let n = n_vars as usize;
        let mut val = vec![false; n + 1];
        for &id in initial_presence {
            val[id.as_u32() as usize] = true;
        }
        let mut occ_pos = vec![Vec::new(); n + 1];
        let mut occ_neg = vec![Vec::new(); n + 1];
        let mut watch = Vec::with_capacity(clauses.len());
        let mut unsat = HashSet::new();

        for (i, clause) in clauses.iter().enumerate() {
            let id = ClauseId(i as u32);
            for &lit in &clause.literals {
                let v = lit.var().as_u32() as usize;
                if lit.is_positive() {
                    occ_pos[v].push(id);
                } else {
                    occ_neg[v].push(id);
                }
            }
            let satisfied = clause
                .literals
                .iter()
                .find(|&&lit| lit.satisfied_by(val[lit.var().as_u32() as usize]))
                .copied();
            if satisfied.is_none() {
                unsat.insert(id);
            }
            watch.push(satisfied);
        }

        WatchedLiteralEngine {
            val,
            watch,
            occ_pos,
            occ_neg,
            unsat,
            presence: initial_presence.clone(),
        }
    }

    pub fn is_present(&self, var: PackageId) -> bool {
        self.val[var.as_u32() as usize]
    }

    pub fn presence(&self) -> &HashSet<PackageId> {
        &self.presence
    }

    fn occurrences(&self, lit: Literal) -> &[ClauseId] {
        let v = lit.var().as_u32() as usize;
        if lit.is_positive() {
            &self.occ_pos[v]
        } else {
            &self.occ_neg[v]
        }
    }

    /// Assign `lit`, updating presence, watches and `unsat`. Idempotent if
    /// `lit` already holds.
    pub fn assign(&mut self, lit: Literal, clauses: &[Clause]) {
        let v = lit.var().as_u32() as usize;
        if self.val[v] == lit.is_positive() {
            return;
        }
        self.val[v] = lit.is_positive();
        if lit.is_positive() {
            self.presence.insert(lit.var());
        } else {
            self.presence.remove(&lit.var());
        }

        let falsified = !lit;
        for &id in self.occurrences(falsified) {
            if self.watch[id.as_usize()] != Some(falsified) {
                continue;
            }
            let clause = &clauses[id.as_usize()];
            let new_watch = clause
                .literals
                .iter()
                .find(|&&l| l.satisfied_by(self.val[l.var().as_u32() as usize]))
                .copied();
            self.watch[id.as_usize()] = new_watch;
            if new_watch.is_none() {
                self.unsat.insert(id);
            }
        }

        for &id in self.occurrences(lit) {
            if self.unsat.remove(&id) {
                self.watch[id.as_usize()] = Some(lit);
            }
        }
    }

    /// The first unsatisfied clause with id `< cutoff`, if any.
    pub fn first_unsat_below(&self, cutoff: u32) -> Option<ClauseId> {
        self.unsat.iter().copied().filter(|id| id.0 < cutoff).min()
    }

    /// Any remaining unsatisfied clause, if any.
    pub fn any_unsat(&self) -> Option<ClauseId> {
        self.unsat.iter().copied().min()
    }
}

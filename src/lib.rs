//! An incremental consistency checker for package-management solutions.
//!
//! A solution is a sequence of install/uninstall commands transforming an
//! initial package state into a final one. This crate checks that every
//! intermediate state respects a repository's dependency and conflict
//! rules, that the final state satisfies a set of user-supplied
//! constraints, and reports the total cost of the sequence — or the first
//! violated clause.
//!
//! The checker is a watched-literal engine: dependencies, conflicts, and
//! final constraints become boolean clauses over package-presence
//! variables, one watched literal per clause tracks satisfaction under
//! single-variable flips, and no clause is rescanned unless its watch was
//! just falsified. It does not *solve* — it has no backtracking and does
//! no unit propagation beyond watch maintenance; it only checks the
//! commands it is given.

pub mod clause;
pub mod driver;
pub mod engine;
pub mod error;
pub mod package;
pub mod range;
pub mod repository;
pub mod resolver;
pub mod schema;
pub mod version;

pub use driver::{judge, JudgeContext};
pub use error::JudgeError;
pub use package::Package;
pub use range::{Command, Constraint, PackageRange, Sign};
pub use repository::{PackageId, Repository, RepositoryBuilder};
pub use version::Version;

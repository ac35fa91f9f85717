//! Error taxonomy for the judge core.
//!
//! Every variant is a distinct fatal condition the checker can hit, each
//! carrying its own fully-rendered diagnostic message so the CLI can print
//! it verbatim behind an `E: ` prefix.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JudgeError {
    /// Unparseable version/package/range/command/constraint string.
    #[error("{0}")]
    Malformed(String),

    /// Duplicate `(name, version)` entry in the repository.
    #[error("package repeated in repo: {0}")]
    DuplicatePackage(String),

    /// The initial state already violates a repository clause.
    #[error("invalid initial state; unsat constraint {0}")]
    InitialStateInvalid(String),

    /// Install of an unknown/already-present package, or uninstall of an
    /// absent one.
    #[error("{0}")]
    BadCommand(String),

    /// A command left a repository clause unsatisfied.
    #[error("bad command {command}; unsat constraint {clause}")]
    CommandInvalid { command: String, clause: String },

    /// A final-constraint clause remains unsatisfied once all commands have
    /// been applied.
    #[error("constraint not satisfied: {0}")]
    ConstraintUnmet(String),
}

impl JudgeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        JudgeError::Malformed(message.into())
    }
}

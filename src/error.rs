//! Error types for mdguard operations.
//!
//! This module defines [`MdguardError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration-time errors (unknown rules, bad options, duplicate
//!   registrations, malformed policy files) abort before any linting starts
//! - Rule execution errors are recovered by the lint engine and surface as
//!   findings; they never escape [`crate::lint::LintEngine::lint`]
//! - Use `anyhow::Error` (via `MdguardError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for configuration failures.
pub const CONFIG_EXIT_CODE: u8 = 2;

/// Core error type for mdguard operations.
#[derive(Debug, Error)]
pub enum MdguardError {
    /// A policy references a rule the registry does not know.
    #[error("Unknown rule: {rule}")]
    UnknownRule { rule: String },

    /// An option name, type or value does not match the rule's schema.
    #[error("Invalid option '{option}' for rule {rule}: {message}")]
    InvalidOption {
        rule: String,
        option: String,
        message: String,
    },

    /// A rule id or alias was registered twice.
    #[error("Duplicate rule registration: {rule}")]
    DuplicateRule { rule: String },

    /// The policy file does not follow the directive grammar.
    #[error("Policy syntax error on line {line}: {message}")]
    PolicySyntax { line: usize, message: String },

    /// Policy file not found at the given location.
    #[error("Policy file not found: {path}")]
    PolicyNotFound { path: PathBuf },

    /// A rule failed while checking a document.
    #[error("Rule {rule} failed: {message}")]
    RuleExecution { rule: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MdguardError {
    /// Whether this error was raised while building the configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MdguardError::UnknownRule { .. }
                | MdguardError::InvalidOption { .. }
                | MdguardError::DuplicateRule { .. }
                | MdguardError::PolicySyntax { .. }
                | MdguardError::PolicyNotFound { .. }
        )
    }

    /// Process exit code a command-line front end should use for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_config_error() {
            CONFIG_EXIT_CODE
        } else {
            1
        }
    }
}

/// Result type alias for mdguard operations.
pub type Result<T> = std::result::Result<T, MdguardError>;

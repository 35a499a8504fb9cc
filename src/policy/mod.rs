//! Lint policies.
//!
//! A policy decides which rules run and with which options:
//!
//! - [`PolicyFile`] - Parsed directive file (see [`directive`] for the grammar)
//! - [`resolve`] - Base policy + overrides to an immutable [`ResolvedConfig`]
//! - [`load_policy`] - Read a policy file from disk
//!
//! # Example
//!
//! ```
//! use mdguard::lint::{RuleId, RuleRegistry};
//! use mdguard::policy::PolicyFile;
//!
//! let registry = RuleRegistry::with_builtins()?;
//! let policy = PolicyFile::parse("DISABLE_ALL\nRULE LIST_MARKER OPTION style=dash\n")?;
//! let config = policy.resolve(&registry)?;
//!
//! assert!(config.is_enabled(&RuleId::new("LIST_MARKER")));
//! assert!(!config.is_enabled(&RuleId::new("LINE_LENGTH")));
//! # Ok::<(), mdguard::MdguardError>(())
//! ```

pub mod directive;
pub mod loader;
pub mod resolver;

pub use directive::PolicyFile;
pub use loader::load_policy;
pub use resolver::{resolve, BasePolicy, PolicyOverride, ResolvedConfig, RuleSettings};

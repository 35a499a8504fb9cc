//! mdguard - Configurable Markdown style checking.
//!
//! mdguard checks Markdown documents against a set of style rules. Which
//! rules run, and with which options, is decided by a small directive
//! policy file resolved against a registry of rules.
//!
//! # Modules
//!
//! - [`document`] - Markdown document model and line scanner
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Rules, registry, lint engine and output formatters
//! - [`policy`] - Policy files and configuration resolution
//!
//! # Example
//!
//! ```
//! use mdguard::document::Document;
//! use mdguard::lint::{LintEngine, RuleRegistry};
//! use mdguard::policy::PolicyFile;
//!
//! let registry = RuleRegistry::with_builtins()?;
//! let config = PolicyFile::parse("ENABLE_ALL\nEXCLUDE LINE_LENGTH\n")?.resolve(&registry)?;
//!
//! let document = Document::parse("# Title\n\nSome text.\n");
//! let result = LintEngine::new(&registry).lint(&document, &config);
//! assert!(result.is_empty());
//! assert_eq!(result.exit_code(false), 0);
//! # Ok::<(), mdguard::MdguardError>(())
//! ```

pub mod document;
pub mod error;
pub mod lint;
pub mod policy;

pub use error::{MdguardError, Result};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `debug` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("mdguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdguard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .map_err(anyhow::Error::from)?;
    Ok(())
}

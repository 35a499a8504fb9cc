//! Markdown linting.
//!
//! This module provides rule-based checking of Markdown documents through
//! a pluggable rule system.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Rules** - Individual checks ([`LintRule`] trait), see [`rules`]
//! - **Options** - Per-rule typed options ([`OptionSchema`], [`RuleOptions`])
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Engine** - Runs enabled rules over a document ([`LintEngine`])
//! - **Findings** - Violations with severity and suggestions ([`Finding`])
//!
//! # Example
//!
//! ```
//! use mdguard::document::Document;
//! use mdguard::lint::{LintEngine, RuleId, RuleRegistry};
//! use mdguard::policy::PolicyFile;
//!
//! let registry = RuleRegistry::with_builtins()?;
//! let config = PolicyFile::parse("DISABLE_ALL\nRULE LIST_MARKER OPTION style=dash\n")?
//!     .resolve(&registry)?;
//!
//! let document = Document::parse("# Notes\n\n* item\n");
//! let result = LintEngine::new(&registry).lint(&document, &config);
//!
//! assert_eq!(result.findings.len(), 1);
//! assert_eq!(result.findings[0].rule_id, RuleId::new("LIST_MARKER"));
//! assert_eq!(result.findings[0].line, 3);
//! # Ok::<(), mdguard::MdguardError>(())
//! ```

pub mod engine;
pub mod finding;
pub mod options;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;

pub use engine::{CancellationToken, Execution, LintEngine, LintResult};
pub use finding::Finding;
pub use options::{OptionKind, OptionSchema, OptionSpec, OptionValue, RuleOptions};
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter};
pub use registry::{RuleDescriptor, RuleRegistry};
pub use rule::{failed, FindingIter, LintRule, RuleId, Severity};
pub use rules::{
    DuplicateHeadingRule, FirstLineHeadingRule, HeadingPunctuationRule, HeadingStyleRule,
    LineLengthRule, ListIndentRule, ListMarkerStyleRule, NoBareUrlsRule, NoInlineHtmlRule,
    OrderedListStyleRule,
};

//! Duplicate heading detection.
//!
//! Heading text is compared after normalisation: trimmed, lower-cased and
//! with runs of whitespace collapsed. With `siblings_only`, a heading only
//! clashes with earlier headings under the same parent.

use std::collections::HashMap;

use crate::document::Document;
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

/// Flags headings whose text already appeared.
pub struct DuplicateHeadingRule;

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl LintRule for DuplicateHeadingRule {
    fn id(&self) -> RuleId {
        RuleId::new("DUPLICATE_HEADING")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD024"]
    }

    fn name(&self) -> &str {
        "Duplicate Heading"
    }

    fn description(&self) -> &str {
        "Heading text is not repeated"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().boolean(
            "siblings_only",
            false,
            "Only compare headings that share a parent",
        )
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let siblings_only = options.bool("siblings_only").unwrap_or(false);
        // keyed by (line of the parent heading, normalised text)
        let mut seen: HashMap<(Option<usize>, String), usize> = HashMap::new();
        // (level, line) of the enclosing headings
        let mut parents: Vec<(u8, usize)> = Vec::new();

        Box::new(document.headings().filter_map(move |heading| {
            while parents.last().is_some_and(|&(level, _)| level >= heading.level) {
                parents.pop();
            }

            let parent = if siblings_only {
                parents.last().map(|&(_, line)| line)
            } else {
                None
            };
            let key = (parent, normalize(&heading.text));
            parents.push((heading.level, heading.line));

            if heading.text.trim().is_empty() {
                return None;
            }

            match seen.get(&key) {
                Some(&first) => Some(Ok(self
                    .finding(
                        heading.line,
                        format!(
                            "Duplicate heading '{}' (first used on line {})",
                            heading.text, first
                        ),
                    )
                    .with_suggestion("Reword the heading so it is unique"))),
                None => {
                    seen.insert(key, heading.line);
                    None
                }
            }
        }))
    }
}

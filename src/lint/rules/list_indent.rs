//! Nested bullet list indentation.
//!
//! A bullet item at depth `n` must be indented by exactly `n * indent`
//! columns. Only lists whose every ancestor is a bullet list are checked,
//! since ordered parents set their own content offset.

use crate::document::Document;
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

/// Checks indentation of nested bullet lists.
pub struct ListIndentRule;

impl LintRule for ListIndentRule {
    fn id(&self) -> RuleId {
        RuleId::new("LIST_INDENT")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD007"]
    }

    fn name(&self) -> &str {
        "List Indentation"
    }

    fn description(&self) -> &str {
        "Nested bullet items are indented by a fixed width per level"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().integer("indent", 1, i64::MAX, 2, "Spaces per nesting level")
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let indent = options
            .int("indent")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(2);
        // ordered-ness of each open ancestor, by depth
        let mut ancestors: Vec<bool> = Vec::new();

        Box::new(document.list_items().filter_map(move |item| {
            ancestors.truncate(item.depth);
            let under_bullets = !ancestors.iter().any(|&ordered| ordered);
            ancestors.push(item.marker.is_ordered());

            if item.depth == 0 || item.marker.is_ordered() || !under_bullets {
                return None;
            }

            let expected = item.depth.saturating_mul(indent);
            if item.indent == expected {
                return None;
            }

            Some(Ok(self
                .finding(
                    item.line,
                    format!(
                        "Expected indentation of {} spaces, found {}",
                        expected, item.indent
                    ),
                )
                .with_column(item.column)
                .with_suggestion(format!("Indent the item by {} spaces", expected))))
        }))
    }
}

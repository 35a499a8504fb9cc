//! Bullet list marker style.

use crate::document::{BulletGlyph, Document, ListMarker};
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

const STYLES: &[&str] = &["consistent", "dash", "asterisk", "plus"];

/// Checks that bullet list items use the configured marker.
pub struct ListMarkerStyleRule;

impl LintRule for ListMarkerStyleRule {
    fn id(&self) -> RuleId {
        RuleId::new("LIST_MARKER")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD004"]
    }

    fn name(&self) -> &str {
        "List Marker Style"
    }

    fn description(&self) -> &str {
        "Bullet list items use the configured marker"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().choice(
            "style",
            STYLES,
            "consistent",
            "Required bullet marker; `consistent` follows the first bullet",
        )
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let mut expected = match options.str("style") {
            Some("dash") => Some(BulletGlyph::Dash),
            Some("asterisk") => Some(BulletGlyph::Asterisk),
            Some("plus") => Some(BulletGlyph::Plus),
            _ => None,
        };

        Box::new(document.list_items().filter_map(move |item| {
            let ListMarker::Bullet(glyph) = item.marker else {
                return None;
            };
            let wanted = *expected.get_or_insert(glyph);
            if glyph == wanted {
                return None;
            }

            Some(Ok(self
                .finding(
                    item.line,
                    format!(
                        "List marker should be {} ('{}'), found {} ('{}')",
                        wanted.as_str(),
                        wanted.as_char(),
                        glyph.as_str(),
                        glyph.as_char()
                    ),
                )
                .with_column(item.column)
                .with_suggestion(format!("Use '{}' as the list marker", wanted.as_char()))))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::test_support::{check_with, lines, text};

    #[test]
    fn dash_style_flags_asterisk() {
        let findings = check_with(
            &ListMarkerStyleRule,
            "* item\n",
            &[("style", text("dash"))],
        );

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, Some(1));
        assert_eq!(
            findings[0].message,
            "List marker should be dash ('-'), found asterisk ('*')"
        );
    }

    #[test]
    fn consistent_follows_first_bullet() {
        let findings = check_with(&ListMarkerStyleRule, "+ one\n+ two\n- three\n", &[]);

        assert_eq!(lines(&findings), vec![3]);
    }

    #[test]
    fn nested_items_are_checked_with_column() {
        let findings = check_with(
            &ListMarkerStyleRule,
            "- one\n  * nested\n",
            &[("style", text("dash"))],
        );

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, Some(3));
    }

    #[test]
    fn ordered_items_are_ignored() {
        let findings = check_with(
            &ListMarkerStyleRule,
            "1. one\n2. two\n",
            &[("style", text("dash"))],
        );

        assert!(findings.is_empty());
    }

    #[test]
    fn code_blocks_are_ignored() {
        let findings = check_with(
            &ListMarkerStyleRule,
            "- one\n\n```\n* not a list\n```\n",
            &[],
        );

        assert!(findings.is_empty());
    }
}

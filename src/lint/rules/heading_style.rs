//! Heading style consistency.
//!
//! This rule checks that headings use one marker style throughout a
//! document: ATX (`# Title`), closed ATX (`# Title #`) or setext
//! (underlined). Setext can only express levels 1 and 2, so the setext
//! styles say what deeper headings should look like.

use crate::document::{Document, Heading, HeadingStyle};
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

const STYLES: &[&str] = &["consistent", "atx", "atx_closed", "setext", "setext_with_atx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Atx,
    AtxClosed,
    /// Setext for levels 1-2, any ATX form below.
    Setext,
    /// Setext for levels 1-2, open ATX below.
    SetextWithAtx,
}

impl Expected {
    fn from_option(style: Option<&str>) -> Option<Self> {
        match style {
            Some("atx") => Some(Expected::Atx),
            Some("atx_closed") => Some(Expected::AtxClosed),
            Some("setext") => Some(Expected::Setext),
            Some("setext_with_atx") => Some(Expected::SetextWithAtx),
            _ => None,
        }
    }

    fn from_heading(heading: &Heading) -> Self {
        match heading.style {
            HeadingStyle::Atx => Expected::Atx,
            HeadingStyle::AtxClosed => Expected::AtxClosed,
            HeadingStyle::Setext => Expected::Setext,
        }
    }

    /// The style a heading of `level` must have, or `None` if any ATX form will do.
    fn wanted(self, level: u8) -> Option<HeadingStyle> {
        match self {
            Expected::Atx => Some(HeadingStyle::Atx),
            Expected::AtxClosed => Some(HeadingStyle::AtxClosed),
            Expected::Setext | Expected::SetextWithAtx if level <= 2 => Some(HeadingStyle::Setext),
            Expected::Setext => None,
            Expected::SetextWithAtx => Some(HeadingStyle::Atx),
        }
    }
}

/// Checks that headings use a consistent style.
pub struct HeadingStyleRule;

impl LintRule for HeadingStyleRule {
    fn id(&self) -> RuleId {
        RuleId::new("HEADING_STYLE")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD003"]
    }

    fn name(&self) -> &str {
        "Heading Style"
    }

    fn description(&self) -> &str {
        "Headings use the configured marker style"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().choice(
            "style",
            STYLES,
            "consistent",
            "Required heading style; `consistent` follows the first heading",
        )
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let configured = Expected::from_option(options.str("style"));
        let mut first: Option<Expected> = None;

        Box::new(document.headings().filter_map(move |heading| {
            let expected = match configured {
                Some(expected) => expected,
                None => *first.get_or_insert_with(|| Expected::from_heading(heading)),
            };
            let wanted = expected.wanted(heading.level)?;
            if heading.style == wanted {
                return None;
            }

            Some(Ok(self
                .finding(
                    heading.line,
                    format!(
                        "Heading style should be {}, found {}",
                        wanted, heading.style
                    ),
                )
                .with_suggestion(format!("Rewrite the heading as {}", wanted))))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::test_support::{check_with, lines, text};

    #[test]
    fn consistent_follows_first_heading() {
        let findings = check_with(
            &HeadingStyleRule,
            "# One\n\nTwo\n===\n\n## Three ##\n",
            &[],
        );

        assert_eq!(lines(&findings), vec![3, 6]);
        assert_eq!(findings[0].message, "Heading style should be atx, found setext");
    }

    #[test]
    fn consistent_document_is_clean() {
        let findings = check_with(&HeadingStyleRule, "# One\n\n## Two\n\n### Three\n", &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn explicit_atx_flags_closed_headings() {
        let findings = check_with(
            &HeadingStyleRule,
            "# One #\n\n## Two\n",
            &[("style", text("atx"))],
        );

        assert_eq!(lines(&findings), vec![1]);
    }

    #[test]
    fn setext_allows_any_atx_below_level_two() {
        let source = "One\n===\n\nTwo\n---\n\n### Three\n\n#### Four ####\n";

        let setext = check_with(&HeadingStyleRule, source, &[("style", text("setext"))]);
        assert!(setext.is_empty());

        let with_atx = check_with(
            &HeadingStyleRule,
            source,
            &[("style", text("setext_with_atx"))],
        );
        assert_eq!(lines(&with_atx), vec![9]);
    }

    #[test]
    fn setext_flags_atx_top_levels() {
        let findings = check_with(
            &HeadingStyleRule,
            "# One\n\nTwo\n---\n",
            &[("style", text("setext"))],
        );

        assert_eq!(lines(&findings), vec![1]);
        assert_eq!(findings[0].rule_id, RuleId::new("HEADING_STYLE"));
    }

    #[test]
    fn consistent_setext_accepts_atx_for_deep_levels() {
        let findings = check_with(&HeadingStyleRule, "One\n===\n\n### Three\n", &[]);
        assert!(findings.is_empty());
    }
}

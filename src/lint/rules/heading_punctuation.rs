//! Trailing punctuation in headings.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

/// Punctuation the rule looks for, ASCII and full-width.
const PUNCTUATION: &str = ".,;:!?。，；：！？";

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#?[0-9A-Za-z]+;$").expect("ENTITY_REGEX must compile")
});

/// Flags headings that end in punctuation.
pub struct HeadingPunctuationRule;

impl LintRule for HeadingPunctuationRule {
    fn id(&self) -> RuleId {
        RuleId::new("HEADING_PUNCTUATION")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD026"]
    }

    fn name(&self) -> &str {
        "Heading Punctuation"
    }

    fn description(&self) -> &str {
        "Headings do not end with punctuation"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().text(
            "allowed_punctuation",
            "?",
            "Trailing characters that are permitted",
        )
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let allowed = options.str("allowed_punctuation").unwrap_or("?");

        Box::new(document.headings().filter_map(move |heading| {
            let text = heading.text.trim_end();
            let last = text.chars().last()?;
            if !PUNCTUATION.contains(last) || allowed.contains(last) {
                return None;
            }
            // `&amp;` and friends end in ';' but are not punctuation
            if last == ';' && ENTITY_REGEX.is_match(text) {
                return None;
            }

            Some(Ok(self
                .finding(
                    heading.line,
                    format!("Heading ends with punctuation '{}'", last),
                )
                .with_suggestion(format!("Remove the trailing '{}'", last))))
        }))
    }
}

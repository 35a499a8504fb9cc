//! First line heading.

use crate::document::Document;
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

/// Requires a document to open with a heading of the configured level.
pub struct FirstLineHeadingRule;

impl LintRule for FirstLineHeadingRule {
    fn id(&self) -> RuleId {
        RuleId::new("FIRST_LINE_HEADING")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD041"]
    }

    fn name(&self) -> &str {
        "First Line Heading"
    }

    fn description(&self) -> &str {
        "The first line of the document is a top-level heading"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().integer("level", 1, 6, 1, "Required level of the opening heading")
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let level = options.int("level").unwrap_or(1);

        let finding = document
            .lines()
            .iter()
            .find(|line| !line.is_blank())
            .and_then(|first| {
                let heading = document.headings().find(|h| h.line == first.number);
                match heading {
                    Some(h) if i64::from(h.level) == level => None,
                    Some(h) => Some(self.finding(
                        first.number,
                        format!(
                            "First heading should be level {}, found level {}",
                            level, h.level
                        ),
                    )),
                    None => Some(
                        self.finding(
                            first.number,
                            format!("First line should be a level {} heading", level),
                        )
                        .with_suggestion("Start the document with a title heading"),
                    ),
                }
            });

        Box::new(finding.into_iter().map(Ok))
    }
}

//! Raw HTML in Markdown.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::inline::{char_column, mask_code_spans};
use crate::document::Document;
use crate::error::Result;
use crate::lint::{Finding, FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

/// Opening or self-closing tags. Autolinks and comments do not match.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)(?:\s[^<>]*)?/?>").expect("TAG_REGEX must compile")
});

/// Flags raw HTML elements outside code.
pub struct NoInlineHtmlRule;

impl LintRule for NoInlineHtmlRule {
    fn id(&self) -> RuleId {
        RuleId::new("NO_INLINE_HTML")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD033"]
    }

    fn name(&self) -> &str {
        "No Inline HTML"
    }

    fn description(&self) -> &str {
        "Markdown does not contain raw HTML elements"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().text(
            "allowed_elements",
            "",
            "Comma-separated element names that may appear",
        )
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let allowed: HashSet<String> = options
            .str("allowed_elements")
            .unwrap_or_default()
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        Box::new(document.text_lines().flat_map(move |line| {
            let masked = mask_code_spans(&line.text);
            TAG_REGEX
                .captures_iter(&masked)
                .filter_map(|caps| {
                    let tag = caps.get(0)?;
                    let element = caps.get(1)?.as_str().to_lowercase();
                    if allowed.contains(&element) {
                        return None;
                    }
                    let finding: Finding = self
                        .finding(line.number, format!("Inline HTML element <{}>", element))
                        .with_column(char_column(&masked, tag.start()));
                    Some(Ok(finding))
                })
                .collect::<Vec<Result<Finding>>>()
        }))
    }
}

//! Bare URLs.
//!
//! A URL is bare unless it sits in an autolink (`<...>`), link syntax
//! (`[text](url)`, `[url](...)`), an HTML attribute, or a code span.
//! Link reference definitions are skipped.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::inline::{char_column, mask_code_spans};
use crate::document::Document;
use crate::error::Result;
use crate::lint::{Finding, FindingIter, LintRule, RuleId, RuleOptions};

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s<>()\[\]]+").expect("URL_REGEX must compile")
});

static REFERENCE_DEFINITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}\[[^\]]+\]:\s").expect("REFERENCE_DEFINITION_REGEX must compile")
});

/// Characters that mark a URL as already wrapped.
const WRAPPERS: &[char] = &['<', '[', '"', '\'', '='];

/// Whether the text before a URL wraps it. `(` only counts after `]`.
fn is_wrapped(before: &str) -> bool {
    let mut chars = before.chars().rev();
    match chars.next() {
        Some('(') => chars.next() == Some(']'),
        Some(c) => WRAPPERS.contains(&c),
        None => false,
    }
}

/// Flags URLs that are not wrapped in link syntax.
pub struct NoBareUrlsRule;

impl LintRule for NoBareUrlsRule {
    fn id(&self) -> RuleId {
        RuleId::new("NO_BARE_URLS")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD034"]
    }

    fn name(&self) -> &str {
        "No Bare URLs"
    }

    fn description(&self) -> &str {
        "URLs are written as links or autolinks"
    }

    fn check<'a>(&'a self, document: &'a Document, _options: &'a RuleOptions) -> FindingIter<'a> {
        Box::new(
            document
                .text_lines()
                .filter(|line| !REFERENCE_DEFINITION_REGEX.is_match(&line.text))
                .flat_map(move |line| {
                    let masked = mask_code_spans(&line.text);
                    URL_REGEX
                        .find_iter(&masked)
                        .filter(|url| !is_wrapped(&masked[..url.start()]))
                        .map(|url| {
                            let text = url.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
                            Ok(self
                                .finding(line.number, format!("Bare URL used: {}", text))
                                .with_column(char_column(&masked, url.start()))
                                .with_suggestion(format!("Wrap it in angle brackets: <{}>", text)))
                        })
                        .collect::<Vec<Result<Finding>>>()
                }),
        )
    }
}

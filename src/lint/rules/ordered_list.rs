//! Ordered list numbering.
//!
//! Styles:
//!
//! - `one` - every item is numbered `1`
//! - `ordered` - numbers increase by one from the list's first number
//! - `one_or_ordered` - the list's first two items pick one of the above

use std::collections::HashMap;

use crate::document::{Document, ListMarker};
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

const STYLES: &[&str] = &["one_or_ordered", "one", "ordered"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    One,
    Ordered,
}

struct ListState {
    first: u64,
    seen: u64,
    numbering: Option<Numbering>,
}

/// Checks ordered list item prefixes.
pub struct OrderedListStyleRule;

impl LintRule for OrderedListStyleRule {
    fn id(&self) -> RuleId {
        RuleId::new("ORDERED_LIST_STYLE")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD029"]
    }

    fn name(&self) -> &str {
        "Ordered List Style"
    }

    fn description(&self) -> &str {
        "Ordered list items are numbered in the configured style"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new().choice("style", STYLES, "one_or_ordered", "Numbering style")
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let configured = match options.str("style") {
            Some("one") => Some(Numbering::One),
            Some("ordered") => Some(Numbering::Ordered),
            _ => None,
        };
        let mut lists: HashMap<usize, ListState> = HashMap::new();

        Box::new(document.list_items().filter_map(move |item| {
            let ListMarker::Ordered { number, delimiter } = item.marker else {
                return None;
            };
            let state = lists.entry(item.list).or_insert(ListState {
                first: number,
                seen: 0,
                numbering: configured,
            });
            let index = state.seen;
            state.seen += 1;

            let numbering = match state.numbering {
                Some(numbering) => numbering,
                // the first item alone cannot tell
                None if index == 0 => return None,
                None => {
                    let numbering = if state.first == 1 && number == 1 {
                        Numbering::One
                    } else {
                        Numbering::Ordered
                    };
                    state.numbering = Some(numbering);
                    numbering
                }
            };

            let expected = match numbering {
                Numbering::One => 1,
                Numbering::Ordered => state.first.saturating_add(index),
            };
            if number == expected {
                return None;
            }

            Some(Ok(self
                .finding(
                    item.line,
                    format!(
                        "Ordered list item prefix should be {}, found {}",
                        expected, number
                    ),
                )
                .with_column(item.column)
                .with_suggestion(format!("Number the item {}{}", expected, delimiter))))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::rules::test_support::{check_with, lines, text};

    #[test]
    fn sequential_numbers_are_clean() {
        let findings = check_with(&OrderedListStyleRule, "1. a\n2. b\n3. c\n", &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn all_ones_are_clean() {
        let findings = check_with(&OrderedListStyleRule, "1. a\n1. b\n1. c\n", &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn one_or_ordered_follows_first_two_items() {
        let findings = check_with(&OrderedListStyleRule, "1. a\n1. b\n2. c\n", &[]);

        assert_eq!(lines(&findings), vec![3]);
        assert_eq!(
            findings[0].message,
            "Ordered list item prefix should be 1, found 2"
        );
    }

    #[test]
    fn ordered_counts_from_first_number() {
        let findings = check_with(
            &OrderedListStyleRule,
            "3. a\n4. b\n6. c\n",
            &[("style", text("ordered"))],
        );

        assert_eq!(lines(&findings), vec![3]);
        assert_eq!(findings[0].column, Some(1));
    }

    #[test]
    fn one_style_flags_every_other_number() {
        let findings = check_with(
            &OrderedListStyleRule,
            "1. a\n2. b\n3. c\n",
            &[("style", text("one"))],
        );

        assert_eq!(lines(&findings), vec![2, 3]);
    }

    #[test]
    fn separate_lists_are_numbered_independently() {
        let source = "1. a\n2. b\n\nText\n\n1. c\n2. d\n";
        let findings = check_with(&OrderedListStyleRule, source, &[]);

        assert!(findings.is_empty());
    }

    #[test]
    fn wrapped_prose_with_a_number_is_not_a_list() {
        let findings = check_with(
            &OrderedListStyleRule,
            "The year was\n2024. It went well.\n",
            &[("style", text("one"))],
        );

        assert!(findings.is_empty());
    }

    #[test]
    fn new_delimiter_restarts_numbering() {
        let findings = check_with(
            &OrderedListStyleRule,
            "1. a\n2. b\n1) c\n2) d\n",
            &[("style", text("ordered"))],
        );

        assert!(findings.is_empty());
    }

    #[test]
    fn bullet_items_are_ignored() {
        let findings = check_with(
            &OrderedListStyleRule,
            "- a\n- b\n",
            &[("style", text("one"))],
        );

        assert!(findings.is_empty());
    }
}

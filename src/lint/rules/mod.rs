//! Built-in lint rules.
//!
//! This module contains all the built-in Markdown rules that come with
//! mdguard. Each rule also answers to its classic `MDxxx` code.

pub mod bare_urls;
pub mod duplicate_heading;
pub mod first_line_heading;
pub mod heading_punctuation;
pub mod heading_style;
pub mod inline_html;
pub mod line_length;
pub mod list_indent;
pub mod list_marker;
pub mod ordered_list;

pub use bare_urls::NoBareUrlsRule;
pub use duplicate_heading::DuplicateHeadingRule;
pub use first_line_heading::FirstLineHeadingRule;
pub use heading_punctuation::HeadingPunctuationRule;
pub use heading_style::HeadingStyleRule;
pub use inline_html::NoInlineHtmlRule;
pub use line_length::LineLengthRule;
pub use list_indent::ListIndentRule;
pub use list_marker::ListMarkerStyleRule;
pub use ordered_list::OrderedListStyleRule;

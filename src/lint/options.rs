//! Rule options and their schemas.
//!
//! Every rule declares an [`OptionSchema`]: the options it accepts, their
//! kinds and defaults. Policy values are validated against the schema when
//! the configuration is resolved, so rules only ever see well-typed
//! [`RuleOptions`].

use std::collections::BTreeMap;
use std::fmt;

use super::rule::RuleId;
use crate::error::{MdguardError, Result};

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl OptionValue {
    /// Infer a value from an unquoted policy literal.
    ///
    /// `true`/`false` become booleans, decimal integers become integers,
    /// anything else is a string.
    pub fn parse_literal(text: &str) -> Self {
        match text {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            _ => text
                .parse::<i64>()
                .map(OptionValue::Int)
                .unwrap_or_else(|_| OptionValue::Str(text.to_string())),
        }
    }

    /// Name of the value's type, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Str(_) => "string",
            OptionValue::Int(_) => "integer",
            OptionValue::Bool(_) => "boolean",
        }
    }

    fn needs_quotes(text: &str) -> bool {
        text.is_empty()
            || text
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\\'))
            || OptionValue::parse_literal(text) != OptionValue::Str(text.to_string())
    }
}

impl fmt::Display for OptionValue {
    /// Writes the value in policy-file syntax; strings are quoted when a
    /// bare literal would read back differently.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Str(s) if OptionValue::needs_quotes(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

/// The kind of values an option accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// One of a fixed set of names.
    Choice(&'static [&'static str]),
    /// An integer within `min..=max`.
    Integer { min: i64, max: i64 },
    /// `true` or `false`.
    Boolean,
    /// Any text.
    Text,
}

/// Declaration of a single option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Option name as written in policies.
    pub name: &'static str,
    /// Accepted values.
    pub kind: OptionKind,
    /// Value used when the policy does not set the option.
    pub default: OptionValue,
    /// What the option controls.
    pub description: &'static str,
}

impl OptionSpec {
    /// Check a value against this spec, returning the value to store.
    fn accept(&self, rule: &RuleId, value: &OptionValue) -> Result<OptionValue> {
        let invalid = |message: String| MdguardError::InvalidOption {
            rule: rule.to_string(),
            option: self.name.to_string(),
            message,
        };

        match (&self.kind, value) {
            (OptionKind::Choice(choices), OptionValue::Str(s)) => {
                if choices.contains(&s.as_str()) {
                    Ok(value.clone())
                } else {
                    Err(invalid(format!(
                        "'{}' is not one of {}",
                        s,
                        choices.join(", ")
                    )))
                }
            }
            (OptionKind::Integer { min, max }, OptionValue::Int(n)) => {
                if (*min..=*max).contains(n) {
                    Ok(value.clone())
                } else {
                    Err(invalid(format!("{n} is outside {min}..={max}")))
                }
            }
            (OptionKind::Boolean, OptionValue::Bool(_)) => Ok(value.clone()),
            (OptionKind::Text, OptionValue::Str(_)) => Ok(value.clone()),
            // Text options take any literal verbatim
            (OptionKind::Text, other) => Ok(OptionValue::Str(other.to_string())),
            (kind, other) => Err(invalid(format!(
                "expected {}, found {} '{}'",
                kind_name(kind),
                other.type_name(),
                other
            ))),
        }
    }
}

fn kind_name(kind: &OptionKind) -> String {
    match kind {
        OptionKind::Choice(choices) => format!("one of {}", choices.join(", ")),
        OptionKind::Integer { .. } => "an integer".to_string(),
        OptionKind::Boolean => "a boolean".to_string(),
        OptionKind::Text => "a string".to_string(),
    }
}

/// The options a rule accepts.
#[derive(Debug, Clone, Default)]
pub struct OptionSchema {
    specs: Vec<OptionSpec>,
}

impl OptionSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option restricted to a set of names.
    pub fn choice(
        mut self,
        name: &'static str,
        choices: &'static [&'static str],
        default: &'static str,
        description: &'static str,
    ) -> Self {
        self.specs.push(OptionSpec {
            name,
            kind: OptionKind::Choice(choices),
            default: OptionValue::Str(default.to_string()),
            description,
        });
        self
    }

    /// Add an integer option.
    pub fn integer(
        mut self,
        name: &'static str,
        min: i64,
        max: i64,
        default: i64,
        description: &'static str,
    ) -> Self {
        self.specs.push(OptionSpec {
            name,
            kind: OptionKind::Integer { min, max },
            default: OptionValue::Int(default),
            description,
        });
        self
    }

    /// Add a boolean option.
    pub fn boolean(mut self, name: &'static str, default: bool, description: &'static str) -> Self {
        self.specs.push(OptionSpec {
            name,
            kind: OptionKind::Boolean,
            default: OptionValue::Bool(default),
            description,
        });
        self
    }

    /// Add a free-text option.
    pub fn text(
        mut self,
        name: &'static str,
        default: &'static str,
        description: &'static str,
    ) -> Self {
        self.specs.push(OptionSpec {
            name,
            kind: OptionKind::Text,
            default: OptionValue::Str(default.to_string()),
            description,
        });
        self
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Iterate over the declared options.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Options holding every default.
    pub fn defaults(&self) -> RuleOptions {
        RuleOptions(
            self.specs
                .iter()
                .map(|spec| (spec.name.to_string(), spec.default.clone()))
                .collect(),
        )
    }

    /// Validate one option assignment for `rule`.
    ///
    /// Fails with [`MdguardError::InvalidOption`] when the name is not
    /// declared or the value does not fit the declared kind.
    pub fn validate(&self, rule: &RuleId, name: &str, value: &OptionValue) -> Result<OptionValue> {
        let spec = self.get(name).ok_or_else(|| MdguardError::InvalidOption {
            rule: rule.to_string(),
            option: name.to_string(),
            message: if self.specs.is_empty() {
                "rule takes no options".to_string()
            } else {
                format!(
                    "unknown option; expected one of {}",
                    self.specs
                        .iter()
                        .map(|spec| spec.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            },
        })?;
        spec.accept(rule, value)
    }
}

/// Resolved option values for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions(BTreeMap<String, OptionValue>);

impl RuleOptions {
    /// Set an option value.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.0.insert(name.into(), value);
    }

    /// Get a raw option value.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// Get a string option.
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(OptionValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Get an integer option.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(OptionValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Get a boolean option.
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(OptionValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Iterate over options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, OptionValue)> for RuleOptions {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

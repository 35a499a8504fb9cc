//! Policy file grammar.
//!
//! A policy file is an ordered list of directives, one per line:
//!
//! ```text
//! # Comments run to end of line
//! ENABLE_ALL                        # or DISABLE_ALL; optional, first directive only
//! RULE HEADING_STYLE OPTION style=atx
//! RULE LIST_INDENT
//! OPTION indent=4                   # attaches to the preceding RULE
//! EXCLUDE LINE_LENGTH
//! ```
//!
//! Option values are bare literals (`4`, `true`, `dash`) or double-quoted
//! strings (`"a b"`, with `\"` and `\\` escapes). Bare `true`/`false` are
//! booleans and bare decimal numbers are integers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::resolver::{resolve, BasePolicy, PolicyOverride, ResolvedConfig};
use crate::error::{MdguardError, Result};
use crate::lint::{OptionValue, RuleId, RuleRegistry};

const ENABLE_ALL: &str = "ENABLE_ALL";
const DISABLE_ALL: &str = "DISABLE_ALL";
const RULE: &str = "RULE";
const OPTION: &str = "OPTION";
const EXCLUDE: &str = "EXCLUDE";

/// A parsed policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFile {
    /// Base policy; [`BasePolicy::RegistryDefaults`] when the file sets none.
    pub base: BasePolicy,
    /// Overrides in file order.
    pub overrides: Vec<PolicyOverride>,
}

impl PolicyFile {
    /// Parse policy text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut policy = PolicyFile::default();
        let mut seen_directive = false;
        // Index of the override that OPTION lines attach to
        let mut open_rule: Option<usize> = None;

        for (idx, raw) in text.lines().enumerate() {
            let number = idx + 1;
            let tokens = tokenize(raw, number)?;
            let Some(keyword) = tokens.first() else {
                continue;
            };

            match keyword.text.as_str() {
                ENABLE_ALL | DISABLE_ALL => {
                    if seen_directive {
                        return Err(syntax(
                            number,
                            format!("{} must be the first directive", keyword.text),
                        ));
                    }
                    expect_no_more(&tokens, 1, number)?;
                    policy.base = if keyword.text == ENABLE_ALL {
                        BasePolicy::EnableAll
                    } else {
                        BasePolicy::DisableAll
                    };
                    open_rule = None;
                }
                RULE => {
                    let id = rule_id(&tokens, number)?;
                    let mut options = BTreeMap::new();
                    let mut rest = tokens[2..].iter();
                    while let Some(token) = rest.next() {
                        if token.text != OPTION || token.quoted {
                            return Err(syntax(
                                number,
                                format!("expected OPTION, found '{}'", token.text),
                            ));
                        }
                        let assignment = rest
                            .next()
                            .ok_or_else(|| syntax(number, "OPTION requires key=value"))?;
                        let (key, value) = parse_assignment(assignment, number)?;
                        options.insert(key, value);
                    }

                    policy.overrides.push(if options.is_empty() {
                        PolicyOverride::Enable(id)
                    } else {
                        PolicyOverride::Configure(id, options)
                    });
                    open_rule = Some(policy.overrides.len() - 1);
                }
                OPTION => {
                    let target = open_rule
                        .and_then(|i| policy.overrides.get_mut(i))
                        .ok_or_else(|| syntax(number, "OPTION must follow a RULE directive"))?;
                    let assignment = tokens
                        .get(1)
                        .ok_or_else(|| syntax(number, "OPTION requires key=value"))?;
                    expect_no_more(&tokens, 2, number)?;
                    let (key, value) = parse_assignment(assignment, number)?;
                    attach_option(target, key, value);
                }
                EXCLUDE => {
                    let id = rule_id(&tokens, number)?;
                    expect_no_more(&tokens, 2, number)?;
                    policy.overrides.push(PolicyOverride::Disable(id));
                    open_rule = None;
                }
                other => {
                    return Err(syntax(number, format!("unknown directive '{other}'")));
                }
            }
            seen_directive = true;
        }

        Ok(policy)
    }

    /// Resolve this policy against a registry.
    pub fn resolve(&self, registry: &RuleRegistry) -> Result<ResolvedConfig> {
        resolve(self.base, &self.overrides, registry)
    }

    /// Describe a resolved configuration as a policy file.
    ///
    /// The result starts from `DISABLE_ALL` and lists every enabled rule with
    /// its non-default options. Disabled rules whose options differ from the
    /// defaults are written as `RULE` followed by `EXCLUDE`, so resolving the
    /// output against the same registry reproduces `config` exactly.
    pub fn from_resolved(config: &ResolvedConfig, registry: &RuleRegistry) -> Self {
        let mut overrides = Vec::new();

        for (id, settings) in config.iter() {
            let defaults = registry
                .get(id)
                .map(|descriptor| descriptor.schema().defaults())
                .unwrap_or_default();
            let changed: BTreeMap<String, OptionValue> = settings
                .options
                .iter()
                .filter(|(name, value)| defaults.get(name) != Some(*value))
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();

            match (settings.enabled, changed.is_empty()) {
                (true, true) => overrides.push(PolicyOverride::Enable(id.clone())),
                (true, false) => overrides.push(PolicyOverride::Configure(id.clone(), changed)),
                (false, true) => {}
                (false, false) => {
                    overrides.push(PolicyOverride::Configure(id.clone(), changed));
                    overrides.push(PolicyOverride::Disable(id.clone()));
                }
            }
        }

        Self {
            base: BasePolicy::DisableAll,
            overrides,
        }
    }
}

impl FromStr for PolicyFile {
    type Err = MdguardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PolicyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            BasePolicy::EnableAll => writeln!(f, "{ENABLE_ALL}")?,
            BasePolicy::DisableAll => writeln!(f, "{DISABLE_ALL}")?,
            BasePolicy::RegistryDefaults => {}
        }

        for over in &self.overrides {
            match over {
                PolicyOverride::Enable(id) => writeln!(f, "{RULE} {id}")?,
                PolicyOverride::Disable(id) => writeln!(f, "{EXCLUDE} {id}")?,
                PolicyOverride::Configure(id, options) => {
                    writeln!(f, "{RULE} {id}")?;
                    for (key, value) in options {
                        writeln!(f, "{OPTION} {key}={value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// A whitespace-separated token; `quoted` is set when any part was quoted.
#[derive(Debug)]
struct Token {
    text: String,
    quoted: bool,
}

fn tokenize(line: &str, number: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '#' => break,
            '"' => {
                let token = current.get_or_insert_with(|| Token {
                    text: String::new(),
                    quoted: false,
                });
                token.quoted = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => token.text.push(escaped),
                            None => return Err(syntax(number, "unterminated quoted value")),
                        },
                        Some(other) => token.text.push(other),
                        None => return Err(syntax(number, "unterminated quoted value")),
                    }
                }
            }
            c if c.is_whitespace() => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            c => current
                .get_or_insert_with(|| Token {
                    text: String::new(),
                    quoted: false,
                })
                .text
                .push(c),
        }
    }

    tokens.extend(current);
    Ok(tokens)
}

fn rule_id(tokens: &[Token], number: usize) -> Result<RuleId> {
    tokens
        .get(1)
        .map(|token| RuleId::new(token.text.clone()))
        .ok_or_else(|| syntax(number, format!("{} requires a rule id", tokens[0].text)))
}

fn parse_assignment(token: &Token, number: usize) -> Result<(String, OptionValue)> {
    let (key, value) = token
        .text
        .split_once('=')
        .ok_or_else(|| syntax(number, format!("expected key=value, found '{}'", token.text)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(syntax(number, "option name is empty"));
    }

    let value = if token.quoted {
        OptionValue::Str(value.to_string())
    } else {
        OptionValue::parse_literal(value)
    };
    Ok((key.to_string(), value))
}

fn attach_option(target: &mut PolicyOverride, key: String, value: OptionValue) {
    match target {
        PolicyOverride::Configure(_, options) => {
            options.insert(key, value);
        }
        PolicyOverride::Enable(id) | PolicyOverride::Disable(id) => {
            let mut options = BTreeMap::new();
            options.insert(key, value);
            *target = PolicyOverride::Configure(id.clone(), options);
        }
    }
}

fn expect_no_more(tokens: &[Token], expected: usize, number: usize) -> Result<()> {
    match tokens.get(expected) {
        Some(extra) => Err(syntax(
            number,
            format!("unexpected '{}' after {}", extra.text, tokens[0].text),
        )),
        None => Ok(()),
    }
}

fn syntax(line: usize, message: impl Into<String>) -> MdguardError {
    MdguardError::PolicySyntax {
        line,
        message: message.into(),
    }
}

//! Configuration resolution.
//!
//! Turns a base policy plus an ordered list of overrides into an immutable
//! [`ResolvedConfig`]. Overrides apply in order and later ones win:
//!
//! - `Enable` / `Disable` set the rule's activation
//! - `Configure` merges option entries (last write per key wins) and
//!   enables the rule
//!
//! Resolution is all-or-nothing: the first unknown rule or invalid option
//! aborts with an error and no partial configuration is returned.

use std::collections::BTreeMap;

use crate::error::{MdguardError, Result};
use crate::lint::{OptionValue, RuleId, RuleOptions, RuleRegistry};

/// Starting activation applied to every registered rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BasePolicy {
    /// Every rule starts enabled.
    EnableAll,
    /// Every rule starts disabled.
    DisableAll,
    /// Each rule starts at its registered default.
    #[default]
    RegistryDefaults,
}

/// One policy decision about one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOverride {
    Enable(RuleId),
    Disable(RuleId),
    Configure(RuleId, BTreeMap<String, OptionValue>),
}

impl PolicyOverride {
    /// The rule id (or alias) this override names.
    pub fn rule_id(&self) -> &RuleId {
        match self {
            PolicyOverride::Enable(id)
            | PolicyOverride::Disable(id)
            | PolicyOverride::Configure(id, _) => id,
        }
    }
}

/// Final activation and options of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    /// Whether the engine runs the rule.
    pub enabled: bool,
    /// Resolved options, defaults included.
    pub options: RuleOptions,
}

/// Immutable per-rule configuration for a lint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    rules: BTreeMap<RuleId, RuleSettings>,
}

impl ResolvedConfig {
    /// Settings for a rule, by canonical id.
    pub fn get(&self, id: &RuleId) -> Option<&RuleSettings> {
        self.rules.get(id)
    }

    /// Whether a rule is enabled.
    pub fn is_enabled(&self, id: &RuleId) -> bool {
        self.rules.get(id).is_some_and(|settings| settings.enabled)
    }

    /// Ids of enabled rules, in order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleId> {
        self.rules
            .iter()
            .filter(|(_, settings)| settings.enabled)
            .map(|(id, _)| id)
    }

    /// Iterate over all rule settings in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleId, &RuleSettings)> {
        self.rules.iter()
    }
}

/// Resolve a base policy and overrides against the registry.
pub fn resolve(
    base: BasePolicy,
    overrides: &[PolicyOverride],
    registry: &RuleRegistry,
) -> Result<ResolvedConfig> {
    let mut rules: BTreeMap<RuleId, RuleSettings> = registry
        .iter()
        .map(|descriptor| {
            let enabled = match base {
                BasePolicy::EnableAll => true,
                BasePolicy::DisableAll => false,
                BasePolicy::RegistryDefaults => descriptor.default_enabled(),
            };
            let settings = RuleSettings {
                enabled,
                options: descriptor.schema().defaults(),
            };
            (descriptor.id().clone(), settings)
        })
        .collect();

    for over in overrides {
        let name = over.rule_id();
        let unknown = || MdguardError::UnknownRule {
            rule: name.to_string(),
        };
        let descriptor = registry.lookup(name.as_str()).ok_or_else(unknown)?;
        let settings = rules.get_mut(descriptor.id()).ok_or_else(unknown)?;

        match over {
            PolicyOverride::Enable(_) => settings.enabled = true,
            PolicyOverride::Disable(_) => settings.enabled = false,
            PolicyOverride::Configure(_, options) => {
                for (option, value) in options {
                    let value = descriptor
                        .schema()
                        .validate(descriptor.id(), option, value)?;
                    settings.options.insert(option.clone(), value);
                }
                settings.enabled = true;
            }
        }

        tracing::debug!(
            "Applied {:?} to {} (enabled: {})",
            over,
            descriptor.id(),
            settings.enabled
        );
    }

    Ok(ResolvedConfig { rules })
}

//! Rule registry for managing lint rules.
//!
//! The [`RuleRegistry`] stores all available lint rules and provides
//! methods for registering, looking up, and iterating over them. It is
//! built once and then shared read-only by the resolver and the engine.

use std::collections::{BTreeMap, HashMap};

use super::options::OptionSchema;
use super::rule::{LintRule, RuleId};
use super::rules::{
    DuplicateHeadingRule, FirstLineHeadingRule, HeadingPunctuationRule, HeadingStyleRule,
    LineLengthRule, ListIndentRule, ListMarkerStyleRule, NoBareUrlsRule, NoInlineHtmlRule,
    OrderedListStyleRule,
};
use crate::error::{MdguardError, Result};

/// A registered rule together with the metadata captured at registration.
pub struct RuleDescriptor {
    id: RuleId,
    aliases: Vec<String>,
    schema: OptionSchema,
    default_enabled: bool,
    rule: Box<dyn LintRule>,
}

impl RuleDescriptor {
    fn new(rule: Box<dyn LintRule>) -> Self {
        Self {
            id: rule.id(),
            aliases: rule.aliases().iter().map(|a| a.to_string()).collect(),
            schema: rule.option_schema(),
            default_enabled: rule.default_enabled(),
            rule,
        }
    }

    /// Canonical identifier.
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Alternative identifiers.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Options the rule accepts.
    pub fn schema(&self) -> &OptionSchema {
        &self.schema
    }

    /// Whether the rule starts enabled under registry defaults.
    pub fn default_enabled(&self) -> bool {
        self.default_enabled
    }

    /// The rule implementation.
    pub fn rule(&self) -> &dyn LintRule {
        self.rule.as_ref()
    }
}

/// Registry of all available lint rules.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, RuleDescriptor>,
    aliases: HashMap<String, RuleId>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(HeadingStyleRule))?;
        registry.register(Box::new(ListMarkerStyleRule))?;
        registry.register(Box::new(ListIndentRule))?;
        registry.register(Box::new(LineLengthRule))?;
        registry.register(Box::new(DuplicateHeadingRule))?;
        registry.register(Box::new(HeadingPunctuationRule))?;
        registry.register(Box::new(OrderedListStyleRule))?;
        registry.register(Box::new(NoInlineHtmlRule))?;
        registry.register(Box::new(NoBareUrlsRule))?;
        registry.register(Box::new(FirstLineHeadingRule))?;
        Ok(registry)
    }

    /// Register a lint rule.
    ///
    /// Fails with [`MdguardError::DuplicateRule`] when the rule's id or one
    /// of its aliases is already taken by another rule.
    pub fn register(&mut self, rule: Box<dyn LintRule>) -> Result<()> {
        let descriptor = RuleDescriptor::new(rule);

        let mut seen: Vec<&str> = Vec::new();
        let names = std::iter::once(descriptor.id.as_str())
            .chain(descriptor.aliases.iter().map(String::as_str));
        for name in names {
            if self.lookup(name).is_some() || seen.contains(&name) {
                return Err(MdguardError::DuplicateRule {
                    rule: name.to_string(),
                });
            }
            seen.push(name);
        }

        for alias in &descriptor.aliases {
            self.aliases.insert(alias.clone(), descriptor.id.clone());
        }
        tracing::debug!("Registered rule {}", descriptor.id);
        self.rules.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    /// Look up a rule by id or alias.
    pub fn lookup(&self, name: &str) -> Option<&RuleDescriptor> {
        self.rules.get(&RuleId::new(name)).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|canonical| self.rules.get(canonical))
        })
    }

    /// Get a rule by canonical ID.
    pub fn get(&self, id: &RuleId) -> Option<&RuleDescriptor> {
        self.rules.get(id)
    }

    /// All canonical rule ids, in order.
    pub fn all(&self) -> impl Iterator<Item = &RuleId> {
        self.rules.keys()
    }

    /// Iterate over all rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.values()
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::lint::{FindingIter, RuleOptions};

    struct MockRule {
        id: &'static str,
        aliases: &'static [&'static str],
    }

    impl LintRule for MockRule {
        fn id(&self) -> RuleId {
            RuleId::new(self.id)
        }
        fn aliases(&self) -> &'static [&'static str] {
            self.aliases
        }
        fn name(&self) -> &str {
            "Mock Rule"
        }
        fn description(&self) -> &str {
            "A mock rule for testing"
        }
        fn default_enabled(&self) -> bool {
            false
        }
        fn check<'a>(&'a self, _document: &'a Document, _options: &'a RuleOptions) -> FindingIter<'a> {
            Box::new(std::iter::empty())
        }
    }

    fn mock(id: &'static str) -> Box<dyn LintRule> {
        Box::new(MockRule { id, aliases: &[] })
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("MOCK")).unwrap();

        assert!(!registry.is_empty());
        assert!(registry.lookup("MOCK").is_some());
        assert!(registry.lookup("UNKNOWN").is_none());
        assert!(!registry.lookup("MOCK").unwrap().default_enabled());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("MOCK")).unwrap();

        let err = registry.register(mock("MOCK")).unwrap_err();

        assert!(matches!(err, MdguardError::DuplicateRule { ref rule } if rule == "MOCK"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn alias_resolves_to_canonical_rule() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Box::new(MockRule {
                id: "MOCK",
                aliases: &["MD999"],
            }))
            .unwrap();

        let descriptor = registry.lookup("MD999").unwrap();
        assert_eq!(descriptor.id(), &RuleId::new("MOCK"));
        assert!(registry.get(&RuleId::new("MD999")).is_none());
    }

    #[test]
    fn alias_colliding_with_existing_id_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("TAKEN")).unwrap();

        let result = registry.register(Box::new(MockRule {
            id: "OTHER",
            aliases: &["TAKEN"],
        }));

        assert!(matches!(result, Err(MdguardError::DuplicateRule { .. })));
        assert!(registry.lookup("OTHER").is_none());
    }

    #[test]
    fn id_colliding_with_existing_alias_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Box::new(MockRule {
                id: "FIRST",
                aliases: &["MD001"],
            }))
            .unwrap();

        assert!(registry.register(mock("MD001")).is_err());
    }

    #[test]
    fn registry_iterates_in_id_order() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("ZED")).unwrap();
        registry.register(mock("ALPHA")).unwrap();
        registry.register(mock("MIKE")).unwrap();

        let ids: Vec<&str> = registry.all().map(RuleId::as_str).collect();
        assert_eq!(ids, vec!["ALPHA", "MIKE", "ZED"]);
    }

    #[test]
    fn registry_with_builtins_has_rules() {
        let registry = RuleRegistry::with_builtins().unwrap();
        assert_eq!(registry.len(), 10);
        for id in [
            "HEADING_STYLE",
            "LIST_MARKER",
            "LIST_INDENT",
            "LINE_LENGTH",
            "DUPLICATE_HEADING",
            "HEADING_PUNCTUATION",
            "ORDERED_LIST_STYLE",
            "NO_INLINE_HTML",
            "NO_BARE_URLS",
            "FIRST_LINE_HEADING",
        ] {
            assert!(registry.lookup(id).is_some(), "missing {id}");
        }
        assert_eq!(
            registry.lookup("MD013").unwrap().id(),
            &RuleId::new("LINE_LENGTH")
        );
    }
}

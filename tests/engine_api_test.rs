//! Integration tests for the lint engine public API.

use mdguard::document::Document;
use mdguard::lint::{
    failed, Execution, FindingIter, LintEngine, LintFormatter, LintRule, LintResult,
    ListMarkerStyleRule, RuleId, RuleOptions, RuleRegistry, SarifFormatter, Severity,
};
use mdguard::policy::{BasePolicy, PolicyFile};
use mdguard::MdguardError;
use std::path::Path;

const SAMPLE: &str = "\
Overview
========

Some <em>inline</em> HTML and a bare link https://example.com.

## Install.

* first
+ second
   - nested

1. one
1. two
3. three

## Install.
";

/// Checks nothing, then fails.
struct BrokenRule;

impl LintRule for BrokenRule {
    fn id(&self) -> RuleId {
        RuleId::new("BROKEN")
    }

    fn name(&self) -> &str {
        "Broken"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn check<'a>(&'a self, _document: &'a Document, _options: &'a RuleOptions) -> FindingIter<'a> {
        failed(MdguardError::RuleExecution {
            rule: "BROKEN".into(),
            message: "cannot walk document".into(),
        })
    }
}

fn builtins_with_broken() -> RuleRegistry {
    let mut registry = RuleRegistry::with_builtins().unwrap();
    registry.register(Box::new(BrokenRule)).unwrap();
    registry
}

#[test]
fn failing_rule_does_not_stop_others() {
    let registry = builtins_with_broken();
    let config = PolicyFile::parse("ENABLE_ALL\n")
        .unwrap()
        .resolve(&registry)
        .unwrap();
    let document = Document::parse(SAMPLE);

    let result = LintEngine::new(&registry).lint(&document, &config);

    let errors: Vec<_> = result
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule_id, RuleId::new("BROKEN"));
    assert_eq!(errors[0].line, 1);
    assert!(errors[0].message.starts_with("rule execution failed"));

    // everything else still ran
    for id in ["LIST_MARKER", "HEADING_PUNCTUATION", "DUPLICATE_HEADING", "NO_BARE_URLS"] {
        assert!(
            result.findings.iter().any(|f| f.rule_id == RuleId::new(id)),
            "missing findings for {id}"
        );
    }
    assert_eq!(result.exit_code(false), 1);
}

#[test]
fn builtin_rules_report_expected_lines() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let config = PolicyFile::parse("ENABLE_ALL\n")
        .unwrap()
        .resolve(&registry)
        .unwrap();

    let result = LintEngine::new(&registry).lint(&Document::parse(SAMPLE), &config);

    let lines_for = |id: &str| -> Vec<usize> {
        result
            .findings
            .iter()
            .filter(|f| f.rule_id == RuleId::new(id))
            .map(|f| f.line)
            .collect()
    };
    assert_eq!(lines_for("HEADING_STYLE"), vec![6, 16]);
    assert_eq!(lines_for("HEADING_PUNCTUATION"), vec![6, 16]);
    assert_eq!(lines_for("DUPLICATE_HEADING"), vec![16]);
    assert_eq!(lines_for("LIST_MARKER"), vec![9, 10]);
    assert_eq!(lines_for("LIST_INDENT"), vec![10]);
    assert_eq!(lines_for("ORDERED_LIST_STYLE"), vec![14]);
    assert_eq!(lines_for("NO_INLINE_HTML"), vec![4]);
    assert_eq!(lines_for("NO_BARE_URLS"), vec![4]);
    assert!(lines_for("FIRST_LINE_HEADING").is_empty());
    assert!(lines_for("LINE_LENGTH").is_empty());
    assert_eq!(result.exit_code(false), 0);
    assert_eq!(result.exit_code(true), 1);
}

#[test]
fn runs_are_deterministic() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let config = PolicyFile::parse("ENABLE_ALL\n")
        .unwrap()
        .resolve(&registry)
        .unwrap();
    let document = Document::parse(SAMPLE);

    let sequential = LintEngine::new(&registry)
        .with_execution(Execution::Sequential)
        .lint(&document, &config);
    let first = LintEngine::new(&registry).lint(&document, &config);
    let second = LintEngine::new(&registry).lint(&document, &config);

    assert_eq!(first, second);
    assert_eq!(first, sequential);
}

#[test]
fn registry_defaults_apply_without_base_directive() {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(ListMarkerStyleRule)).unwrap();
    let policy = PolicyFile::parse("# nothing but a comment\n").unwrap();
    assert_eq!(policy.base, BasePolicy::RegistryDefaults);

    let config = policy.resolve(&registry).unwrap();
    let result = LintEngine::new(&registry).lint(&Document::parse("- a\n* b\n"), &config);

    assert_eq!(result.findings.len(), 1);
}

#[test]
fn duplicate_registration_fails() {
    let mut registry = RuleRegistry::with_builtins().unwrap();
    let err = registry.register(Box::new(ListMarkerStyleRule)).unwrap_err();

    assert!(matches!(err, MdguardError::DuplicateRule { ref rule } if rule == "LIST_MARKER"));
}

#[test]
fn sarif_output_for_lint_result() {
    let registry = RuleRegistry::with_builtins().unwrap();
    let config = PolicyFile::parse("DISABLE_ALL\nRULE LIST_MARKER OPTION style=dash\n")
        .unwrap()
        .resolve(&registry)
        .unwrap();
    let result: LintResult = LintEngine::new(&registry).lint(&Document::parse("* item\n"), &config);

    let mut output = Vec::new();
    SarifFormatter::new("mdguard", "0.1.0")
        .format(Path::new("README.md"), &result, &mut output)
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(parsed["runs"][0]["results"][0]["ruleId"], "LIST_MARKER");
    assert_eq!(
        parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"]["startLine"],
        1
    );
}

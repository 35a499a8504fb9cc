//! Integration tests for policy files and configuration resolution.

use mdguard::document::Document;
use mdguard::lint::{LintEngine, RuleId, RuleRegistry};
use mdguard::policy::{load_policy, PolicyFile, ResolvedConfig};
use mdguard::MdguardError;
use std::fs;
use tempfile::TempDir;

fn registry() -> RuleRegistry {
    RuleRegistry::with_builtins().unwrap()
}

fn resolve(policy: &str, registry: &RuleRegistry) -> mdguard::Result<ResolvedConfig> {
    PolicyFile::parse(policy)?.resolve(registry)
}

#[test]
fn excluded_rule_never_reports() {
    let registry = registry();
    let config = resolve("ENABLE_ALL\nEXCLUDE LINE_LENGTH\n", &registry).unwrap();
    let document = Document::parse(&format!("# Title\n\n{}\n", "word ".repeat(100)));

    let result = LintEngine::new(&registry).lint(&document, &config);

    assert!(!config.is_enabled(&RuleId::new("LINE_LENGTH")));
    assert!(result
        .findings
        .iter()
        .all(|f| f.rule_id != RuleId::new("LINE_LENGTH")));
}

#[test]
fn configured_marker_style_reports_once() {
    let registry = registry();
    let config = resolve("DISABLE_ALL\nRULE LIST_MARKER OPTION style=dash\n", &registry).unwrap();
    let document = Document::parse("* item\n");

    let result = LintEngine::new(&registry).lint(&document, &config);

    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].rule_id, RuleId::new("LIST_MARKER"));
    assert_eq!(result.findings[0].line, 1);
}

#[test]
fn unknown_rule_is_a_config_error() {
    let err = resolve("RULE UNKNOWN_RULE_123\n", &registry()).unwrap_err();

    match err {
        MdguardError::UnknownRule { ref rule } => assert_eq!(rule, "UNKNOWN_RULE_123"),
        other => panic!("expected UnknownRule, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn directive_order_decides() {
    let registry = registry();
    let id = RuleId::new("HEADING_STYLE");

    let enabled = resolve("DISABLE_ALL\nRULE HEADING_STYLE\n", &registry).unwrap();
    assert!(enabled.is_enabled(&id));

    let disabled = resolve(
        "DISABLE_ALL\nRULE HEADING_STYLE\nEXCLUDE HEADING_STYLE\n",
        &registry,
    )
    .unwrap();
    assert!(!disabled.is_enabled(&id));

    let reenabled = resolve(
        "DISABLE_ALL\nEXCLUDE HEADING_STYLE\nRULE HEADING_STYLE\n",
        &registry,
    )
    .unwrap();
    assert!(reenabled.is_enabled(&id));
}

#[test]
fn aliases_work_in_policies() {
    let registry = registry();
    let config = resolve("ENABLE_ALL\nEXCLUDE MD013\nRULE MD007 OPTION indent=4\n", &registry).unwrap();

    assert!(!config.is_enabled(&RuleId::new("LINE_LENGTH")));
    let indent = config.get(&RuleId::new("LIST_INDENT")).unwrap();
    assert_eq!(indent.options.int("indent"), Some(4));
}

#[test]
fn invalid_option_aborts_resolution() {
    let err = resolve("RULE LINE_LENGTH OPTION line_length=long\n", &registry()).unwrap_err();

    assert!(matches!(err, MdguardError::InvalidOption { ref option, .. } if option == "line_length"));
    assert!(err.is_config_error());
}

#[test]
fn syntax_errors_report_line() {
    let err = PolicyFile::parse("# header\nENABLE_ALL\nOPTION style=dash\n").unwrap_err();

    assert!(matches!(err, MdguardError::PolicySyntax { line: 3, .. }));
}

#[test]
fn serialised_policy_resolves_to_same_config() {
    let registry = registry();
    let original = resolve(
        "ENABLE_ALL\n\
         EXCLUDE NO_INLINE_HTML\n\
         RULE LINE_LENGTH OPTION line_length=100 OPTION code_blocks=false\n\
         RULE HEADING_PUNCTUATION OPTION allowed_punctuation=\"\"\n\
         RULE LIST_MARKER OPTION style=dash\n\
         EXCLUDE LIST_MARKER\n",
        &registry,
    )
    .unwrap();

    let text = PolicyFile::from_resolved(&original, &registry).to_string();
    let reparsed = resolve(&text, &registry).unwrap();

    assert_eq!(original, reparsed);
}

#[test]
fn load_policy_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".mdguard");
    fs::write(
        &path,
        r#"
# House style
DISABLE_ALL
RULE HEADING_STYLE OPTION style=atx
RULE LIST_MARKER
OPTION style=dash   # bullets are dashes
"#,
    )
    .unwrap();

    let registry = registry();
    let config = load_policy(&path).unwrap().resolve(&registry).unwrap();

    let enabled: Vec<&str> = config.enabled_rules().map(RuleId::as_str).collect();
    assert_eq!(enabled, vec!["HEADING_STYLE", "LIST_MARKER"]);
    assert_eq!(
        config
            .get(&RuleId::new("LIST_MARKER"))
            .unwrap()
            .options
            .str("style"),
        Some("dash")
    );
}

#[test]
fn missing_policy_file() {
    let temp = TempDir::new().unwrap();
    let err = load_policy(&temp.path().join("nope")).unwrap_err();

    assert!(matches!(err, MdguardError::PolicyNotFound { .. }));
}

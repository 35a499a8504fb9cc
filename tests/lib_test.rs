//! Library integration tests.

use mdguard::MdguardError;

#[test]
fn error_types_are_public() {
    let err = MdguardError::UnknownRule {
        rule: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> mdguard::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn builtin_rules_are_registered() {
    use mdguard::lint::{RuleId, RuleRegistry};

    let registry = RuleRegistry::with_builtins().unwrap();
    let ids: Vec<&str> = registry.all().map(RuleId::as_str).collect();

    assert_eq!(
        ids,
        vec![
            "DUPLICATE_HEADING",
            "FIRST_LINE_HEADING",
            "HEADING_PUNCTUATION",
            "HEADING_STYLE",
            "LINE_LENGTH",
            "LIST_INDENT",
            "LIST_MARKER",
            "NO_BARE_URLS",
            "NO_INLINE_HTML",
            "ORDERED_LIST_STYLE",
        ]
    );
    assert_eq!(
        registry.lookup("MD004").map(|d| d.id().as_str()),
        Some("LIST_MARKER")
    );
}

#[test]
fn init_tracing_installs_once() {
    assert!(mdguard::init_tracing(false).is_ok());
    assert!(mdguard::init_tracing(true).is_err());
}

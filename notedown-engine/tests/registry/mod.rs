//! Registry-level imports across dialects

use notedown_engine::{BuilderConfig, DialectRegistry, EngineError};

use crate::common::WIKI_HEADER;

fn registry() -> DialectRegistry {
    DialectRegistry::with_defaults(&BuilderConfig::default()).expect("default config is valid")
}

#[test]
fn default_registry_carries_both_dialects() {
    let registry = registry();
    assert!(registry.has("markdown"));
    assert!(registry.has("wiki"));
}

#[test]
fn detects_dialect_from_filename() {
    let registry = registry();
    assert_eq!(
        registry.detect_dialect_from_filename("notes.md").as_deref(),
        Some("markdown")
    );
    assert_eq!(
        registry.detect_dialect_from_filename("page.wiki").as_deref(),
        Some("wiki")
    );
    assert_eq!(registry.detect_dialect_from_filename("data.org"), None);
}

#[test]
fn parses_through_the_registry() {
    let registry = registry();
    let doc = registry.parse("**b**", "markdown").expect("markdown import");
    assert_eq!(doc.tree.children[0].children[0].text, "b");

    let source = format!("{WIKI_HEADER}hello");
    let doc = registry.parse(&source, "wiki").expect("wiki import");
    assert_eq!(doc.tree.children[0].children[0].text, "hello");
}

#[test]
fn unknown_dialect_is_an_error() {
    let registry = registry();
    assert!(matches!(
        registry.parse("x", "org"),
        Err(EngineError::DialectNotFound(_))
    ));
}

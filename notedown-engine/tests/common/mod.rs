//! Shared helpers for dialect integration tests

use notedown_engine::dialects::markdown::MarkdownDialect;
use notedown_engine::dialects::wiki::WikiDialect;
use notedown_engine::tree::{name, Element};
use notedown_engine::{BuilderConfig, Dialect, ParsedDocument};

pub const WIKI_HEADER: &str =
    "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.4\nCreation-Date: 2024-01-01T00:00:00\n";

pub fn parse_markdown(source: &str) -> ParsedDocument {
    MarkdownDialect::new(BuilderConfig::default())
        .expect("default config is valid")
        .parse(source)
        .expect("markdown import")
}

/// Parses a wiki page body, the metadata header prepended.
pub fn parse_wiki(body: &str) -> ParsedDocument {
    let source = format!("{WIKI_HEADER}{body}");
    WikiDialect::new(BuilderConfig::default())
        .expect("default config is valid")
        .parse(&source)
        .expect("wiki import")
}

/// Children of the slot: rich_text runs interleaved with anchors.
pub fn runs(doc: &ParsedDocument) -> &[Element] {
    assert_eq!(doc.tree.name, name::ROOT);
    &doc.tree.children[0].children
}

/// All run and anchor text concatenated in document order.
pub fn plain_text(doc: &ParsedDocument) -> String {
    runs(doc)
        .iter()
        .filter(|el| el.name == name::RICH_TEXT)
        .map(|el| el.text.as_str())
        .collect()
}

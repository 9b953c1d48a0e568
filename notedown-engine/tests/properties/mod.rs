//! Property-based tests over the import pipeline
//!
//! These lean on generated input: text free of markup must come out unchanged
//! and unattributed, and arbitrary printable input must never break an import.

use proptest::prelude::*;

use notedown_engine::dialects::markdown::MarkdownDialect;
use notedown_engine::{BuilderConfig, Dialect, TokenMatcher};

use crate::common::{parse_markdown, parse_wiki, plain_text, runs};

proptest! {
    #[test]
    fn plain_text_survives_markdown_import(body in "[a-z0-9 ]{1,40}") {
        let doc = parse_markdown(&body);
        prop_assert_eq!(plain_text(&doc), body);
        prop_assert!(runs(&doc).iter().all(|r| r.attrs.is_empty()));
    }

    #[test]
    fn markdown_import_never_fails(body in "[ -~]{0,60}") {
        let dialect = MarkdownDialect::new(BuilderConfig::default()).unwrap();
        prop_assert!(dialect.parse(&body).is_ok());
    }

    #[test]
    fn wiki_lines_come_back_newline_terminated(
        lines in proptest::collection::vec("[a-z0-9 ]{0,20}", 1..5)
    ) {
        let body = lines.join("\n");
        let doc = parse_wiki(&body);
        // the importer reads line by line, so an empty tail yields no line at
        // all rather than an empty one
        let expected: String = body.lines().map(|l| format!("{l}\n")).collect();
        prop_assert_eq!(plain_text(&doc), expected);
    }

    #[test]
    fn matcher_recovers_marker_free_content(content in "[a-z]{1,20}") {
        let dialect = MarkdownDialect::new(BuilderConfig::default()).unwrap();
        let mut m: TokenMatcher = dialect.matcher();
        for ch in format!("**{content}**").chars() {
            m.feed(ch);
        }
        prop_assert!(m.finished());
        prop_assert_eq!(m.contents(), content.as_str());
    }
}

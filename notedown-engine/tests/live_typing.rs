//! Editor-style sessions against the live matcher
//!
//! The matcher watches one span at a time while characters arrive the way an
//! editor would deliver them: typed at the caret, inserted and erased behind it.

use notedown_engine::dialects::markdown::MarkdownDialect;
use notedown_engine::{BuilderConfig, Dialect, TokenMatcher};

fn markdown_matcher() -> TokenMatcher {
    MarkdownDialect::new(BuilderConfig::default())
        .expect("default config is valid")
        .matcher()
}

fn type_str(m: &mut TokenMatcher, s: &str) {
    for ch in s.chars() {
        m.feed(ch);
    }
}

#[test]
fn typing_a_bold_span() {
    let mut m = markdown_matcher();
    type_str(&mut m, "**bold**");
    assert!(m.finished());
    assert_eq!(m.contents(), "bold");
    assert_eq!(m.raw_str(), "**bold**");
}

#[test]
fn typing_inline_code() {
    let mut m = markdown_matcher();
    type_str(&mut m, "`x`");
    assert!(m.finished());
    assert_eq!(m.contents(), "x");
}

#[test]
fn typing_a_link_span() {
    let mut m = markdown_matcher();
    type_str(&mut m, "[t](u)");
    assert!(m.finished());
    assert_eq!(m.contents(), "t](u");
}

#[test]
fn bullet_marker_opens_but_never_finishes_live() {
    let mut m = markdown_matcher();
    type_str(&mut m, "- milk");
    assert!(m.has_open());
    assert!(!m.finished());
    assert_eq!(m.contents(), "milk");
}

#[test]
fn false_start_then_reset_reuses_the_matcher() {
    let mut m = markdown_matcher();
    type_str(&mut m, "#x");
    assert!(!m.has_open());
    m.reset();
    type_str(&mut m, "# Ti");
    assert!(m.has_open());
    assert_eq!(m.contents(), "Ti");
}

#[test]
fn fixing_a_typo_behind_the_caret() {
    let mut m = markdown_matcher();
    type_str(&mut m, "~~done~~");
    assert!(m.finished());
    // gap two places behind the caret sits at the end of the content
    m.insert('!', 2);
    assert!(m.finished());
    assert_eq!(m.contents(), "done!");
    assert_eq!(m.raw_str(), "~~done!~~");
}

#[test]
fn backspace_and_retype_the_close() {
    let mut m = markdown_matcher();
    type_str(&mut m, "**hi**");
    assert!(m.finished());
    m.pop_back();
    assert!(!m.finished());
    assert!(m.has_open());
    m.feed('*');
    assert!(m.finished());
    assert_eq!(m.contents(), "hi");
}

#[test]
fn extra_typing_after_a_finished_span_is_ignored() {
    let mut m = markdown_matcher();
    type_str(&mut m, "**hi**");
    type_str(&mut m, " and more");
    assert_eq!(m.raw_str(), "**hi**");
}

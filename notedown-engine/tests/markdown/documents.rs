//! Whole-document Markdown imports
//!
//! The unit tests in the crate cover single constructs; these feed realistic
//! multi-block documents and check run order, anchors and offsets together.

use notedown_engine::tree::{attr, name};

use crate::common::{parse_markdown, plain_text, runs};

#[test]
fn mixed_document_keeps_block_order() {
    let doc = parse_markdown(
        "# Notes\nintro text\n- first\n- second\n```python\nprint(1)\n```\nthe end\n",
    );
    let runs = runs(&doc);

    assert_eq!(runs[0].text, "Notes\n");
    assert_eq!(runs[0].attr(attr::SCALE), Some("h1"));
    assert_eq!(runs[1].text, "intro text\n");

    let bullets: Vec<_> = runs.iter().filter(|r| r.text == "• ").collect();
    assert_eq!(bullets.len(), 2);

    let codebox = runs
        .iter()
        .find(|r| r.name == name::CODEBOX)
        .expect("codebox anchor");
    assert_eq!(codebox.attr(attr::SYNTAX), Some("python"));
    assert_eq!(codebox.text, "print(1)\n");
    // every character before the anchor, each earlier anchor worth one
    assert_eq!(codebox.attr(attr::CHAR_OFFSET), Some("34"));

    assert_eq!(runs.last().map(|r| r.text.as_str()), Some("\nthe end\n"));
}

#[test]
fn inline_styles_reconstruct_the_text() {
    let doc = parse_markdown("Some **bold** and *slant* text.\n");
    assert_eq!(plain_text(&doc), "Some bold and slant text.\n");

    let runs = runs(&doc);
    assert_eq!(runs[1].text, "bold");
    assert_eq!(runs[1].attr(attr::WEIGHT), Some(attr::HEAVY));
    assert_eq!(runs[3].text, "slant");
    assert_eq!(runs[3].attr(attr::STYLE), Some(attr::ITALIC));
}

#[test]
fn image_between_paragraphs_becomes_anchor() {
    let doc = parse_markdown("before\n![alt](pic.png)\nafter\n");
    let runs = runs(&doc);

    assert_eq!(runs[0].text, "before\n");
    assert_eq!(runs[1].name, name::IMAGE);
    assert_eq!(runs[1].attr(attr::SOURCE), Some("pic.png"));
    assert_eq!(runs[1].attr(attr::CHAR_OFFSET), Some("7"));
    assert_eq!(runs[2].text, "\nafter\n");
}

#[test]
fn bold_italic_region_carries_both_attributes() {
    let doc = parse_markdown("***loud***");
    let runs = runs(&doc);
    assert_eq!(runs[0].text, "loud");
    assert_eq!(runs[0].attr(attr::WEIGHT), Some(attr::HEAVY));
    assert_eq!(runs[0].attr(attr::STYLE), Some(attr::ITALIC));
}

#[test]
fn table_then_paragraph_resumes_free_text() {
    let doc = parse_markdown("| a | b |\n| c | d |\n\ntail\n");
    let runs = runs(&doc);

    assert_eq!(runs[0].name, name::TABLE);
    assert_eq!(runs[0].children.len(), 2);
    assert_eq!(runs[0].children[0].children[1].text, "b");
    assert!(plain_text(&doc).contains("tail\n"));
}

//! Whole-page wiki imports

use notedown_engine::tree::{attr, name};

use crate::common::{parse_wiki, plain_text, runs};

#[test]
fn full_page_structure() {
    let doc = parse_wiki(
        "== Chapter ==\nplain with **bold** words\n* item one\n\t* nested\n[ open task]\nsee [[Other]] page\nvisit https://zim.example/page\n",
    );
    let runs = runs(&doc);

    assert_eq!(runs[0].text, "Chapter");
    assert_eq!(runs[0].attr(attr::SCALE), Some("h3"));

    let bold = runs
        .iter()
        .find(|r| r.attr(attr::WEIGHT) == Some(attr::HEAVY))
        .expect("bold run");
    assert_eq!(bold.text, "bold");

    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert!(texts.contains(&"• "));
    assert!(texts.contains(&"\t◇ "));
    assert!(texts.contains(&"☐ open task"));

    assert!(doc.broken_links.contains_key("Other"));

    let link = runs
        .iter()
        .find(|r| r.attr(attr::LINK).is_some())
        .expect("link run");
    assert_eq!(link.text, "https://zim.example/page");
    assert_eq!(link.attr(attr::LINK), Some("webs https://zim.example/page"));

    assert!(plain_text(&doc).contains("plain with bold words\n"));
}

#[test]
fn strike_and_subscript_on_one_line() {
    let doc = parse_wiki("~~old~~ new x_{i}");
    let runs = runs(&doc);

    assert_eq!(runs[0].text, "old");
    assert_eq!(runs[0].attr(attr::STRIKETHROUGH), Some(attr::TRUE_VALUE));

    let sub = runs
        .iter()
        .find(|r| r.attr(attr::SCALE) == Some(attr::SUB))
        .expect("subscript run");
    assert_eq!(sub.text, "i");
}

#[test]
fn blank_lines_survive_as_newlines() {
    let doc = parse_wiki("alpha\n\nbeta\n");
    assert_eq!(plain_text(&doc), "alpha\n\nbeta\n");
}

#[test]
fn image_line_places_anchor_between_text() {
    let doc = parse_wiki("above\n{{./shot.png}}\nbelow\n");
    let runs = runs(&doc);

    let image = runs
        .iter()
        .find(|r| r.name == name::IMAGE)
        .expect("image anchor");
    assert_eq!(image.attr(attr::SOURCE), Some("./shot.png"));
    // "above\n" comes first, the anchor itself is one character wide
    assert_eq!(image.attr(attr::CHAR_OFFSET), Some("6"));
    assert_eq!(plain_text(&doc), "above\n\nbelow\n");
}

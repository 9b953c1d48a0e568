//! Document builder
//!
//!     Accumulates attributed `rich_text` runs and anchor elements and finally
//!     assembles the `root > slot` output tree. The caller contract is attribute
//!     first, text second: tag setters mark the current run, `add_text` fills it,
//!     and sealing a run starts a fresh unattributed one. `char_offset` counts
//!     characters of run text, with every anchor worth a single character.

use std::collections::{BTreeMap, HashSet};

use url::Url;

use crate::config::BuilderConfig;
use crate::error::EngineError;
use crate::schema::CheckboxState;
use crate::tree::{attr, name, Element};

#[derive(Debug)]
pub struct DocumentBuilder {
    config: BuilderConfig,
    /// Children of the slot, rich_text runs and anchors
    runs: Vec<Element>,
    /// Index of the run currently receiving attributes and text
    current: usize,
    /// Most recently sealed run, the target for retroactive attributes
    last: Option<usize>,
    /// Attribute keys already written to the current run
    open_tags: HashSet<String>,
    broken_links: BTreeMap<String, Vec<usize>>,
    offset: usize,
}

impl DocumentBuilder {
    pub fn new(config: &BuilderConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(DocumentBuilder {
            config: config.clone(),
            runs: vec![Element::new(name::RICH_TEXT)],
            current: 0,
            last: None,
            open_tags: HashSet::new(),
            broken_links: BTreeMap::new(),
            offset: 0,
        })
    }

    /// Whether the current run has no text yet
    pub fn tag_empty(&self) -> bool {
        self.runs[self.current].text.is_empty()
    }

    pub fn char_offset(&self) -> usize {
        self.offset
    }

    /// Appends `text` to the current run. With `seal` the run is closed on both
    /// sides, so the text lands in a run of its own and becomes the retro target.
    pub fn add_text(&mut self, text: &str, seal: bool) {
        if text.is_empty() {
            return;
        }
        self.offset += text.chars().count();
        if seal {
            self.close_current_tag();
        }
        self.runs[self.current].text.push_str(text);
        if seal {
            self.last = Some(self.current);
            self.close_current_tag();
        }
    }

    /// Seals the current run if it holds text. Idempotent, and clears the
    /// attribute bookkeeping either way.
    pub fn close_current_tag(&mut self) {
        if !self.tag_empty() {
            self.runs.push(Element::new(name::RICH_TEXT));
            self.current = self.runs.len() - 1;
        }
        self.open_tags.clear();
    }

    /// Runs `f` against the most recently sealed run instead of the current one.
    pub fn with_last_element(&mut self, f: impl FnOnce(&mut Self)) {
        let saved = self.current;
        if let Some(last) = self.last {
            self.current = last;
        }
        f(self);
        self.current = saved;
    }

    /// Sets an attribute, then optionally repeated-append text under it: the
    /// first data for a tag extends the current run, later data for the same
    /// tag seals first so each region gets its own run.
    fn add_tag_data(&mut self, tag: &str, data: &str) {
        let reopened = self.open_tags.contains(tag);
        self.add_text(data, reopened);
        self.open_tags.insert(tag.to_owned());
    }

    fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        self.runs[self.current].set_attr(key, value);
    }

    pub fn add_weight_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::WEIGHT, attr::HEAVY);
        if let Some(data) = data {
            self.add_tag_data(attr::WEIGHT, data);
        }
    }

    pub fn add_italic_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::STYLE, attr::ITALIC);
        if let Some(data) = data {
            self.add_tag_data(attr::STYLE, data);
        }
    }

    pub fn add_strikethrough_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::STRIKETHROUGH, attr::TRUE_VALUE);
        if let Some(data) = data {
            self.add_tag_data(attr::STRIKETHROUGH, data);
        }
    }

    pub fn add_monospace_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::FAMILY, attr::MONOSPACE);
        if let Some(data) = data {
            self.add_text(data, false);
        }
    }

    /// Heading level `1..=6` mapped to the `h1..h6` scale values
    pub fn add_scale_tag(&mut self, level: u8, data: Option<&str>) {
        self.set_attr(attr::SCALE, format!("h{level}"));
        if let Some(data) = data {
            self.add_tag_data(attr::SCALE, data);
        }
    }

    pub fn add_superscript_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::SCALE, attr::SUP);
        if let Some(data) = data {
            self.add_text(data, true);
        }
    }

    pub fn add_subscript_tag(&mut self, data: Option<&str>) {
        self.set_attr(attr::SCALE, attr::SUB);
        if let Some(data) = data {
            self.add_text(data, true);
        }
    }

    /// Marks the current run as a link to `target`, normalized to the internal
    /// `webs`/`file` form.
    pub fn add_link(&mut self, target: &str) {
        self.set_attr(attr::LINK, link_attribute(target));
    }

    /// Newline, sealed only when the current run carries attributes so the
    /// following text starts unattributed.
    pub fn add_newline(&mut self) {
        let seal = !self.open_tags.is_empty();
        self.add_text("\n", seal);
    }

    /// Bullet item at `level`, clamped to the configured glyph set
    pub fn add_list(&mut self, level: usize, data: &str) {
        let bullets = &self.config.bullet_chars;
        let level = level.min(bullets.len() - 1);
        let mut line = "\t".repeat(level);
        line.push(bullets[level]);
        line.push(' ');
        line.push_str(data);
        self.add_text(&line, true);
    }

    pub fn add_ordered_list(&mut self, number: u32, data: &str) {
        self.add_text(&format!("{number}. {data}"), true);
    }

    pub fn add_todo_list(&mut self, state: CheckboxState, data: &str) {
        let glyph = self.config.todo_glyphs[state.glyph_index()];
        self.add_text(&format!("{glyph} {data}"), true);
    }

    pub fn add_hrule(&mut self) {
        self.add_text(&format!("{}\n", self.config.hrule), true);
    }

    pub fn add_codebox(&mut self, language: &str, code: &str) {
        let mut el = Element::new(name::CODEBOX);
        el.set_attr(attr::JUSTIFICATION, attr::LEFT);
        el.set_attr(attr::FRAME_WIDTH, self.config.codebox_width.to_string());
        el.set_attr(attr::FRAME_HEIGHT, self.config.codebox_height.to_string());
        let syntax = if language.is_empty() { "plain-text" } else { language };
        el.set_attr(attr::SYNTAX, syntax);
        el.text.push_str(code);
        self.push_anchor(el);
    }

    pub fn add_table(&mut self, matrix: &[Vec<String>]) {
        let mut el = Element::new(name::TABLE);
        el.set_attr(attr::JUSTIFICATION, attr::LEFT);
        el.set_attr(attr::COL_WIDTH, self.config.table_col_width.to_string());
        for cells in matrix {
            let mut row = Element::new(name::ROW);
            for cell in cells {
                let mut cell_el = Element::new(name::CELL);
                cell_el.text.push_str(cell);
                row.add_child(cell_el);
            }
            el.add_child(row);
        }
        self.push_anchor(el);
    }

    pub fn add_image(&mut self, source: &str) {
        let mut el = Element::new(name::IMAGE);
        el.set_attr(attr::JUSTIFICATION, attr::LEFT);
        el.set_attr(attr::SOURCE, source);
        self.push_anchor(el);
    }

    /// Records a link whose target only exists inside the notebook. The current
    /// run index is remembered so the host can resolve the link later.
    pub fn add_broken_link(&mut self, target: &str) {
        self.broken_links
            .entry(target.to_owned())
            .or_default()
            .push(self.current);
    }

    pub fn broken_links(&self) -> &BTreeMap<String, Vec<usize>> {
        &self.broken_links
    }

    // anchors sit between runs, never inside one, and count as one character
    fn push_anchor(&mut self, mut el: Element) {
        self.close_current_tag();
        el.set_attr(attr::CHAR_OFFSET, self.offset.to_string());
        self.runs.insert(self.current, el);
        self.current += 1;
        self.offset += 1;
    }

    /// Drops everything accumulated so far
    pub fn wipe(&mut self) {
        self.runs = vec![Element::new(name::RICH_TEXT)];
        self.current = 0;
        self.last = None;
        self.open_tags.clear();
        self.broken_links.clear();
        self.offset = 0;
    }

    /// Assembles the final tree. Trailing empty runs are dropped, everything
    /// else is handed over untouched together with the broken-link records.
    pub fn into_document(mut self) -> (Element, BTreeMap<String, Vec<usize>>) {
        while self
            .runs
            .last()
            .is_some_and(|el| el.name == name::RICH_TEXT && el.text.is_empty())
        {
            self.runs.pop();
        }
        let mut slot = Element::new(name::SLOT);
        slot.children = self.runs;
        let mut root = Element::new(name::ROOT);
        root.add_child(slot);
        (root, self.broken_links)
    }
}

/// Normalizes a link target the way notebook links are stored: web targets get
/// the `webs` prefix, local files the `file` prefix, and targets without a
/// scheme are assumed to be web addresses.
fn link_attribute(target: &str) -> String {
    match Url::parse(target) {
        Ok(url) if url.scheme() == "file" => format!("file {}", url.path()),
        Ok(_) => format!("webs {target}"),
        Err(_) => format!("webs http://{target}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(&BuilderConfig::default()).unwrap()
    }

    fn runs(root: &Element) -> &[Element] {
        &root.children[0].children
    }

    #[test]
    fn rejects_config_without_bullets() {
        let config = BuilderConfig { bullet_chars: vec![], ..Default::default() };
        assert!(matches!(
            DocumentBuilder::new(&config),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn sealed_text_lands_in_its_own_run() {
        let mut b = builder();
        b.add_text("plain", true);
        b.add_weight_tag(Some("bold"));
        b.close_current_tag();
        let (root, _) = b.into_document();
        let runs = runs(&root);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "plain");
        assert_eq!(runs[1].text, "bold");
        assert_eq!(runs[1].attr(attr::WEIGHT), Some(attr::HEAVY));
    }

    #[test]
    fn repeated_weight_data_starts_a_new_run() {
        let mut b = builder();
        b.add_weight_tag(Some("a"));
        b.add_weight_tag(Some("b"));
        let (root, _) = b.into_document();
        let runs = runs(&root);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "a");
        assert_eq!(runs[0].attr(attr::WEIGHT), Some(attr::HEAVY));
        assert_eq!(runs[1].text, "b");
    }

    #[test]
    fn close_current_tag_is_idempotent() {
        let mut b = builder();
        b.add_text("x", false);
        b.close_current_tag();
        b.close_current_tag();
        let (root, _) = b.into_document();
        assert_eq!(runs(&root).len(), 1);
    }

    #[test]
    fn attribute_before_text_contract() {
        let mut b = builder();
        b.add_italic_tag(None);
        b.add_text("slanted", false);
        b.close_current_tag();
        let (root, _) = b.into_document();
        let runs = runs(&root);
        assert_eq!(runs[0].attr(attr::STYLE), Some(attr::ITALIC));
        assert_eq!(runs[0].text, "slanted");
    }

    #[test]
    fn retro_attribute_hits_last_sealed_run() {
        let mut b = builder();
        b.add_text("Title", true);
        b.with_last_element(|b| b.add_scale_tag(1, None));
        b.add_text("body", true);
        let (root, _) = b.into_document();
        let runs = runs(&root);
        assert_eq!(runs[0].attr(attr::SCALE), Some("h1"));
        assert_eq!(runs[1].attrs.len(), 0);
    }

    #[test]
    fn list_level_is_clamped() {
        let mut b = builder();
        b.add_list(99, "item");
        let (root, _) = b.into_document();
        let text = &runs(&root)[0].text;
        assert!(text.ends_with("⇒ item"));
        assert!(text.starts_with("\t\t\t\t\t"));
    }

    #[test]
    fn todo_glyph_follows_state() {
        let mut b = builder();
        b.add_todo_list(CheckboxState::Ticked, "done");
        let (root, _) = b.into_document();
        assert_eq!(runs(&root)[0].text, "☑ done");
    }

    #[test]
    fn ordered_item_keeps_its_number() {
        let mut b = builder();
        b.add_ordered_list(3, "third");
        let (root, _) = b.into_document();
        assert_eq!(runs(&root)[0].text, "3. third");
    }

    #[test]
    fn anchors_occupy_one_character() {
        let mut b = builder();
        b.add_text("ab", true);
        b.add_codebox("rust", "fn main() {}");
        b.add_text("c", true);
        let (root, _) = b.into_document();
        let runs = runs(&root);
        assert_eq!(runs[1].name, name::CODEBOX);
        assert_eq!(runs[1].attr(attr::CHAR_OFFSET), Some("2"));
        assert_eq!(runs[1].attr(attr::SYNTAX), Some("rust"));
        assert_eq!(runs[2].text, "c");
    }

    #[test]
    fn table_matrix_becomes_rows_and_cells() {
        let mut b = builder();
        b.add_table(&[
            vec!["a".to_owned(), "b".to_owned()],
            vec!["c".to_owned(), "d".to_owned()],
        ]);
        let (root, _) = b.into_document();
        let table = &runs(&root)[0];
        assert_eq!(table.name, name::TABLE);
        assert_eq!(table.children.len(), 2);
        assert_eq!(table.children[1].children[1].text, "d");
    }

    #[test]
    fn broken_links_remember_their_run() {
        let mut b = builder();
        b.add_broken_link("Page One");
        b.add_text("Page One", true);
        b.add_broken_link("Page Two");
        b.add_text("Page Two", true);
        let (root, links) = b.into_document();
        assert_eq!(links["Page One"], vec![0]);
        assert_eq!(links["Page Two"], vec![1]);
        assert_eq!(runs(&root)[1].text, "Page Two");
    }

    #[test]
    fn link_targets_are_normalized() {
        assert_eq!(link_attribute("http://x"), "webs http://x");
        assert_eq!(link_attribute("example.com/a"), "webs http://example.com/a");
        assert_eq!(link_attribute("file:///tmp/n.txt"), "file /tmp/n.txt");
    }

    #[test]
    fn newline_seals_only_attributed_runs() {
        let mut b = builder();
        b.add_italic_tag(Some("it"));
        b.add_newline();
        b.add_text("after", false);
        let (root, _) = b.into_document();
        let runs = runs(&root);
        // the attributed run is sealed before the newline lands
        assert_eq!(runs[0].text, "it");
        assert_eq!(runs[0].attr(attr::STYLE), Some(attr::ITALIC));
        assert_eq!(runs[1].text, "\n");
        assert!(runs[1].attrs.is_empty());
        assert_eq!(runs[2].text, "after");
    }

    #[test]
    fn wipe_clears_accumulated_state() {
        let mut b = builder();
        b.add_text("gone", true);
        b.add_broken_link("x");
        b.wipe();
        assert_eq!(b.char_offset(), 0);
        let (root, links) = b.into_document();
        assert!(runs(&root).is_empty());
        assert!(links.is_empty());
    }

    #[test]
    fn char_offset_counts_characters_not_bytes() {
        let mut b = builder();
        b.add_text("héllo", true);
        assert_eq!(b.char_offset(), 5);
    }
}

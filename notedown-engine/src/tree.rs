//! Output document tree
//!
//!     The builder emits a small element tree: a `root` with a single `slot`
//!     child whose children are the attributed `rich_text` runs, interleaved
//!     with anchor elements for codeboxes, tables and images.

use std::collections::BTreeMap;

use serde::Serialize;

/// Element names used by the builder
pub mod name {
    pub const ROOT: &str = "root";
    pub const SLOT: &str = "slot";
    pub const RICH_TEXT: &str = "rich_text";
    pub const CODEBOX: &str = "codebox";
    pub const TABLE: &str = "table";
    pub const ROW: &str = "row";
    pub const CELL: &str = "cell";
    pub const IMAGE: &str = "image";
}

/// Attribute keys and common values
pub mod attr {
    pub const WEIGHT: &str = "weight";
    pub const HEAVY: &str = "heavy";
    pub const STYLE: &str = "style";
    pub const ITALIC: &str = "italic";
    pub const STRIKETHROUGH: &str = "strikethrough";
    pub const SCALE: &str = "scale";
    pub const SUP: &str = "sup";
    pub const SUB: &str = "sub";
    pub const FAMILY: &str = "family";
    pub const MONOSPACE: &str = "monospace";
    pub const LINK: &str = "link";
    pub const TRUE_VALUE: &str = "true";
    pub const CHAR_OFFSET: &str = "char_offset";
    pub const JUSTIFICATION: &str = "justification";
    pub const LEFT: &str = "left";
    pub const FRAME_WIDTH: &str = "frame_width";
    pub const FRAME_HEIGHT: &str = "frame_height";
    pub const SYNTAX: &str = "syntax_highlighting";
    pub const COL_WIDTH: &str = "col_min_width";
    pub const SOURCE: &str = "source";
}

/// One node of the output tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_owned(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        self.attrs.insert(key.to_owned(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }
}

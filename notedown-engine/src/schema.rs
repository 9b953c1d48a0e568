//! Token schema definitions
//!
//!     A dialect is described by a table of token schemas. Each schema names the
//!     marker that opens it, how the scanner should treat the region that follows,
//!     and the action the dialect driver runs once the region is resolved.

/// State of a checkbox item in a to-do list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Ticked,
    Marked,
}

impl CheckboxState {
    /// Index into the three-glyph to-do character set
    pub fn glyph_index(self) -> usize {
        match self {
            CheckboxState::Unchecked => 0,
            CheckboxState::Ticked => 1,
            CheckboxState::Marked => 2,
        }
    }
}

/// What the driver does with a resolved token region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Bold,
    Italic,
    BoldItalic,
    Strikethrough,
    Monospace,
    /// Heading at a fixed level, `Scale(1)` is `h1`
    Scale(u8),
    /// Setext-style heading applied to the line already emitted
    ScaleRetro(u8),
    /// Wiki heading whose level is derived from the captured text
    WikiHeading,
    /// Bracketed link, `title](url` payload
    Link,
    /// Bare URL between angle brackets
    AutoLink,
    /// URL whose scheme prefix is the open marker itself
    UrlPrefix(&'static str),
    Image,
    Codebox,
    /// Bullet list item at the current indent level
    Bullet,
    /// One level of list indentation
    Indent,
    Todo(CheckboxState),
    /// Link to another page of the same notebook, recorded as broken
    PageLink,
    Superscript,
    Subscript,
    /// Captured text kept verbatim, markers dropped
    Verbatim,
    /// Captured text kept verbatim, markers restored around it
    PassThrough,
    HorizontalRule,
    TableRow,
    TableHeaderSeparator,
    Footnote,
    /// Marker pair recognized and discarded
    Ignore,
}

/// How the parser scans the region after an open marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Scan up to `close`, resolving nested markers on the way
    Delimited { close: String },
    /// Scan up to `close`, treating every other marker as literal text
    Raw { close: String },
    /// No close marker, the region runs to the end of the stream.
    /// `raw` selects whether the remainder is captured or re-parsed.
    ToStreamEnd { raw: bool },
}

impl ScanMode {
    pub fn close_tag(&self) -> Option<&str> {
        match self {
            ScanMode::Delimited { close } | ScanMode::Raw { close } => Some(close),
            ScanMode::ToStreamEnd { .. } => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ScanMode::Raw { .. })
    }
}

/// One row of a dialect's token table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSchema {
    pub open_tag: String,
    pub mode: ScanMode,
    pub action: TagAction,
    /// Open marker only matches at the start of the stream or right after a
    /// newline
    pub line_anchored: bool,
}

impl TokenSchema {
    pub fn delimited(open: &str, close: &str, action: TagAction) -> Self {
        TokenSchema {
            open_tag: open.to_owned(),
            mode: ScanMode::Delimited { close: close.to_owned() },
            action,
            line_anchored: false,
        }
    }

    /// A pair whose close marker is the open marker itself
    pub fn symmetric(tag: &str, action: TagAction) -> Self {
        Self::delimited(tag, tag, action)
    }

    pub fn raw(open: &str, close: &str, action: TagAction) -> Self {
        TokenSchema {
            open_tag: open.to_owned(),
            mode: ScanMode::Raw { close: close.to_owned() },
            action,
            line_anchored: false,
        }
    }

    /// Raw capture whose close marker equals the open marker
    pub fn symmetric_raw(tag: &str, action: TagAction) -> Self {
        Self::raw(tag, tag, action)
    }

    pub fn to_stream_end(open: &str, action: TagAction) -> Self {
        TokenSchema {
            open_tag: open.to_owned(),
            mode: ScanMode::ToStreamEnd { raw: false },
            action,
            line_anchored: false,
        }
    }

    pub fn to_stream_end_raw(open: &str, action: TagAction) -> Self {
        TokenSchema {
            open_tag: open.to_owned(),
            mode: ScanMode::ToStreamEnd { raw: true },
            action,
            line_anchored: false,
        }
    }

    /// Restricts the open marker to line starts
    pub fn at_line_start(mut self) -> Self {
        self.line_anchored = true;
        self
    }

    pub fn close_tag(&self) -> Option<&str> {
        self.mode.close_tag()
    }

    pub fn is_symmetrical(&self) -> bool {
        self.close_tag() == Some(self.open_tag.as_str())
    }
}

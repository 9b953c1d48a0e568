//! Markdown dialect driver
//!
//!     Feeds whole documents through the tokenizer and walks the resolved token
//!     stream, mapping each region's action onto the document builder. Plain text
//!     between regions is held back and placed with its last line split off, so
//!     setext-style headings can retarget the line they follow.

use std::sync::Arc;

use crate::builder::DocumentBuilder;
use crate::config::BuilderConfig;
use crate::dialect::{Dialect, ParsedDocument};
use crate::error::EngineError;
use crate::schema::{TagAction, TokenSchema};
use crate::tokenizer::TokenTable;

fn token_schemas() -> Vec<TokenSchema> {
    vec![
        TokenSchema::symmetric("__", TagAction::Bold),
        TokenSchema::symmetric("**", TagAction::Bold),
        TokenSchema::symmetric("_", TagAction::Italic),
        TokenSchema::symmetric("*", TagAction::Italic),
        TokenSchema::symmetric("***", TagAction::BoldItalic),
        TokenSchema::symmetric("~~", TagAction::Strikethrough),
        TokenSchema::raw("[^", "]", TagAction::Footnote),
        TokenSchema::raw("[", ")", TagAction::Link),
        TokenSchema::raw("![", ")", TagAction::Image),
        TokenSchema::raw("<", ">", TagAction::AutoLink),
        TokenSchema::symmetric_raw("`", TagAction::Monospace),
        TokenSchema::symmetric_raw("``", TagAction::PassThrough),
        TokenSchema::symmetric_raw("```", TagAction::Codebox),
        TokenSchema::symmetric_raw("~~~", TagAction::Codebox),
        // anchored so a closing '*' before a space cannot open a list
        TokenSchema::raw("* ", "\n", TagAction::Bullet).at_line_start(),
        TokenSchema::raw("- ", "\n", TagAction::Bullet).at_line_start(),
        TokenSchema::delimited("# ", "\n", TagAction::Scale(1)),
        TokenSchema::delimited("## ", "\n", TagAction::Scale(2)),
        TokenSchema::delimited("### ", "\n", TagAction::Scale(3)),
        TokenSchema::delimited("#### ", "\n", TagAction::Scale(3)),
        TokenSchema::delimited("##### ", "\n", TagAction::Scale(3)),
        TokenSchema::delimited("###### ", "\n", TagAction::Scale(3)),
        TokenSchema::delimited("\n==", "\n", TagAction::ScaleRetro(1)),
        TokenSchema::delimited("\n----", "\n", TagAction::ScaleRetro(2)),
        TokenSchema::to_stream_end("***\n", TagAction::HorizontalRule),
        TokenSchema::delimited("|", "\n", TagAction::TableRow),
        TokenSchema::delimited("| -", "- |\n", TagAction::TableHeaderSeparator),
    ]
}

/// Markdown importer
pub struct MarkdownDialect {
    table: Arc<TokenTable>,
    config: BuilderConfig,
}

impl MarkdownDialect {
    pub fn new(config: BuilderConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(MarkdownDialect {
            table: Arc::new(TokenTable::new(token_schemas())),
            config,
        })
    }
}

impl Dialect for MarkdownDialect {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown import"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn token_table(&self) -> &Arc<TokenTable> {
        &self.table
    }

    fn parse(&self, source: &str) -> Result<ParsedDocument, EngineError> {
        let mut session = Session {
            builder: DocumentBuilder::new(&self.config)?,
            free_text: String::new(),
            table_rows: Vec::new(),
        };
        session.feed(&self.table, source);
        Ok(session.finish())
    }
}

struct Session {
    builder: DocumentBuilder,
    /// Plain text waiting to be placed before the next tagged region
    free_text: String,
    /// Rows of the table currently being assembled
    table_rows: Vec<Vec<String>>,
}

impl Session {
    fn feed(&mut self, table: &TokenTable, source: &str) {
        let tokens = table.tokenize(source);
        let parsed = table.parse_tokens(&tokens);
        let mut idx = 0;
        while idx < parsed.len() {
            let pair = &parsed[idx];
            let Some(schema) = pair.schema else {
                self.literal(&pair.content);
                idx += 1;
                continue;
            };
            self.place_free_text();
            self.builder.close_current_tag();
            // a stray ')' right after a link belongs to a URL that itself
            // contained parentheses
            if matches!(schema.action, TagAction::Link | TagAction::Image)
                && parsed
                    .get(idx + 1)
                    .is_some_and(|next| next.schema.is_none() && next.content == ")")
            {
                self.dispatch(table, schema.action, &format!("{})", pair.content));
                idx += 2;
                continue;
            }
            self.dispatch(table, schema.action, &pair.content);
            idx += 1;
        }
        self.place_free_text();
    }

    fn dispatch(&mut self, table: &TokenTable, action: TagAction, content: &str) {
        let b = &mut self.builder;
        match action {
            TagAction::Bold => b.add_weight_tag(Some(content)),
            TagAction::Italic => b.add_italic_tag(Some(content)),
            TagAction::BoldItalic => {
                b.add_italic_tag(None);
                b.add_weight_tag(Some(content));
            }
            TagAction::Strikethrough => b.add_strikethrough_tag(Some(content)),
            TagAction::Monospace => {
                b.add_monospace_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Scale(level) => {
                b.add_scale_tag(level, Some(&format!("{content}\n")));
                b.close_current_tag();
            }
            TagAction::ScaleRetro(level) => {
                b.with_last_element(|b| b.add_scale_tag(level, None));
                b.add_newline();
            }
            TagAction::Link => self.add_link(content),
            TagAction::Image => self.add_image(content),
            TagAction::AutoLink => {
                b.add_link(content);
                b.add_text(content, true);
            }
            TagAction::Codebox => {
                let (language, code) = match content.split_once('\n') {
                    Some((first, rest)) => (first.trim(), rest),
                    None => ("", content),
                };
                b.add_codebox(language, code);
            }
            TagAction::Bullet => {
                b.add_list(0, "");
                self.feed(table, content);
                self.builder.add_newline();
            }
            TagAction::HorizontalRule => b.add_hrule(),
            TagAction::Footnote => b.add_text(&format!("[^{content}]"), true),
            TagAction::PassThrough => b.add_text(&format!("``{content}``"), true),
            TagAction::TableRow => self.add_table_row(content),
            TagAction::TableHeaderSeparator | TagAction::Ignore => {}
            _ => {
                tracing::debug!(?action, "action not used by the markdown driver");
            }
        }
    }

    /// Title and target split at the last `]`, the payload being `title](url`
    fn add_link(&mut self, content: &str) {
        match content.rfind(']') {
            Some(idx) => {
                let title = &content[..idx];
                let url = content.get(idx + 2..).unwrap_or("");
                self.builder.add_text(title, false);
                self.builder.add_link(url);
            }
            None => {
                tracing::warn!(content, "link without a target, kept as plain text");
                self.builder.add_text(content, true);
            }
        }
    }

    fn add_image(&mut self, content: &str) {
        match content.rfind(']') {
            Some(idx) => {
                let url = content.get(idx + 2..).unwrap_or("");
                self.builder.add_image(url);
            }
            None => {
                tracing::warn!(content, "image without a source, kept as plain text");
                self.builder.add_text(content, true);
            }
        }
    }

    fn add_table_row(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        let mut cells: Vec<String> = content
            .split('|')
            .map(|cell| cell.trim().to_owned())
            .collect();
        if cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }
        self.table_rows.push(cells);
    }

    fn pop_table(&mut self) {
        if !self.table_rows.is_empty() {
            let rows = std::mem::take(&mut self.table_rows);
            self.builder.add_table(&rows);
        }
    }

    fn literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.table_rows.is_empty() {
            // only a blank line ends a table, anything else between rows is
            // outside any cell and gets dropped
            if text == "\n" {
                self.pop_table();
                self.builder.add_newline();
            }
            return;
        }
        self.free_text.push_str(text);
    }

    /// Flushes pending plain text, the last line split into its own run so a
    /// following setext underline can restyle it.
    fn place_free_text(&mut self) {
        if self.free_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.free_text);
        let (other, last_line) = match text.rfind('\n') {
            Some(idx) => text.split_at(idx + 1),
            None => ("", text.as_str()),
        };
        self.builder.add_text(other, true);
        self.builder.add_text(last_line, true);
    }

    fn finish(mut self) -> ParsedDocument {
        self.pop_table();
        self.place_free_text();
        let (tree, broken_links) = self.builder.into_document();
        ParsedDocument { tree, broken_links }
    }
}

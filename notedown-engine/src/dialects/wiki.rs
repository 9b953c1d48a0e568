//! Wiki dialect driver
//!
//!     Imports zim-style wiki pages. The file carries a metadata header which is
//!     skipped up to and including the `Creation-Date:` line; the body is then
//!     parsed line by line, each line ending in an explicit newline run.

use std::sync::Arc;

use crate::builder::DocumentBuilder;
use crate::config::BuilderConfig;
use crate::dialect::{Dialect, ParsedDocument};
use crate::error::EngineError;
use crate::schema::{CheckboxState, TagAction, TokenSchema};
use crate::tokenizer::TokenTable;

fn token_schemas() -> Vec<TokenSchema> {
    vec![
        TokenSchema::symmetric("**", TagAction::Bold),
        TokenSchema::symmetric("//", TagAction::Italic),
        TokenSchema::symmetric("~~", TagAction::Strikethrough),
        TokenSchema::to_stream_end("\t", TagAction::Indent),
        TokenSchema::to_stream_end("* ", TagAction::Bullet),
        TokenSchema::to_stream_end_raw("http://", TagAction::UrlPrefix("http://")),
        TokenSchema::to_stream_end_raw("https://", TagAction::UrlPrefix("https://")),
        TokenSchema::to_stream_end_raw("==", TagAction::WikiHeading),
        TokenSchema::raw("{{", "}}", TagAction::Image),
        TokenSchema::delimited("[ ", "]", TagAction::Todo(CheckboxState::Unchecked)),
        TokenSchema::delimited("[*", "]", TagAction::Todo(CheckboxState::Ticked)),
        TokenSchema::delimited("[x", "]", TagAction::Todo(CheckboxState::Marked)),
        TokenSchema::delimited("[>", "]", TagAction::Todo(CheckboxState::Marked)),
        TokenSchema::raw("[[", "]]", TagAction::PageLink),
        TokenSchema::symmetric_raw("''", TagAction::Verbatim),
        TokenSchema::raw("^{", "}", TagAction::Superscript),
        TokenSchema::raw("_{", "}", TagAction::Subscript),
    ]
}

/// Zim-style wiki importer
pub struct WikiDialect {
    table: Arc<TokenTable>,
    config: BuilderConfig,
}

impl WikiDialect {
    pub fn new(config: BuilderConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(WikiDialect {
            table: Arc::new(TokenTable::new(token_schemas())),
            config,
        })
    }
}

impl Dialect for WikiDialect {
    fn name(&self) -> &str {
        "wiki"
    }

    fn description(&self) -> &str {
        "Zim-style wiki import"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "wiki"]
    }

    fn token_table(&self) -> &Arc<TokenTable> {
        &self.table
    }

    fn parse(&self, source: &str) -> Result<ParsedDocument, EngineError> {
        let mut lines = source.lines();
        let header_found = lines.any(|line| line.contains("Creation-Date:"));
        if !header_found {
            return Err(EngineError::Structure(
                "wiki page without a Creation-Date header".to_owned(),
            ));
        }
        let mut session = Session {
            builder: DocumentBuilder::new(&self.config)?,
            list_level: 0,
        };
        for line in lines {
            session.parse_line(&self.table, line);
        }
        let (tree, broken_links) = session.builder.into_document();
        Ok(ParsedDocument { tree, broken_links })
    }
}

struct Session {
    builder: DocumentBuilder,
    list_level: usize,
}

impl Session {
    fn parse_line(&mut self, table: &TokenTable, line: &str) {
        let tokens = table.tokenize(line);
        for pair in table.parse_tokens(&tokens) {
            match pair.schema {
                Some(schema) => {
                    self.builder.close_current_tag();
                    self.dispatch(schema.action, &pair.content);
                }
                None => self.builder.add_text(&pair.content, true),
            }
        }
        self.builder.add_newline();
        self.list_level = 0;
    }

    fn dispatch(&mut self, action: TagAction, content: &str) {
        let b = &mut self.builder;
        match action {
            TagAction::Bold => {
                b.add_weight_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Italic => {
                b.add_italic_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Strikethrough => {
                b.add_strikethrough_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Indent => self.list_level += 1,
            TagAction::Bullet => b.add_list(self.list_level, content),
            TagAction::UrlPrefix(prefix) => {
                let url = format!("{prefix}{content}");
                b.add_link(&url);
                b.add_text(&url, true);
            }
            TagAction::WikiHeading => self.add_heading(content),
            TagAction::Image => b.add_image(content.trim()),
            TagAction::Todo(state) => b.add_todo_list(state, content),
            TagAction::PageLink => {
                b.add_broken_link(content);
                b.add_text(content, true);
            }
            TagAction::Superscript => {
                b.add_superscript_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Subscript => {
                b.add_subscript_tag(Some(content));
                b.close_current_tag();
            }
            TagAction::Verbatim => b.add_text(content, true),
            _ => {
                tracing::debug!(?action, "action not used by the wiki driver");
            }
        }
    }

    /// Heading depth counts down from five with every extra `=` still leading
    /// the captured rest of the line, so `======` comes out h1 and `==` h5.
    /// Anything deeper than the top level is plain text, and everything below
    /// h3 clamps to h3.
    fn add_heading(&mut self, content: &str) {
        let extra = content.chars().take_while(|&c| c == '=').count();
        if extra >= 5 {
            self.builder.add_text(&format!("=={content}"), true);
            return;
        }
        let level = (5 - extra).min(3) as u8;
        let text = content.trim_matches(|c: char| c == '=' || c == ' ');
        self.builder.add_scale_tag(level, Some(text));
        self.builder.close_current_tag();
    }
}

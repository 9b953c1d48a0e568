//! Token-stream parser
//!
//!     Resolves a flat token stream into `(schema, content)` pairs. Open markers
//!     push a frame onto an explicit stack; a close marker resolves the whole open
//!     group at once. Recovery is lenient: a close with nothing open and a frame
//!     still open at end of stream both degrade to literal text instead of being
//!     dropped.

use std::collections::HashSet;

use crate::schema::{ScanMode, TokenSchema};
use crate::tokenizer::{Token, TokenTable};

/// A resolved region of the stream. `schema` is `None` for plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken<'t> {
    pub schema: Option<&'t TokenSchema>,
    pub content: String,
}

impl<'t> ParsedToken<'t> {
    fn text(content: impl Into<String>) -> Self {
        ParsedToken { schema: None, content: content.into() }
    }

    fn tagged(schema: &'t TokenSchema, content: impl Into<String>) -> Self {
        ParsedToken { schema: Some(schema), content: content.into() }
    }
}

struct Frame<'t> {
    schema: &'t TokenSchema,
    buffer: String,
    // same-marker opens seen inside a raw region, matched against closes
    raw_depth: usize,
}

impl TokenTable {
    /// Resolves `tokens` into tagged regions and literal text.
    pub fn parse_tokens<'t>(&'t self, tokens: &[Token]) -> Vec<ParsedToken<'t>> {
        let mut out = Vec::new();
        self.parse_into(tokens, &mut out);
        out
    }

    fn parse_into<'t>(&'t self, tokens: &[Token], out: &mut Vec<ParsedToken<'t>>) {
        let mut stack: Vec<Frame<'t>> = Vec::new();
        // symmetric markers currently open, their next occurrence closes
        let mut toggled: HashSet<&'t str> = HashSet::new();
        let mut idx = 0;

        while idx < tokens.len() {
            let token = &tokens[idx];
            idx += 1;
            let marker = match token {
                Token::Text(text) => {
                    push_text(&mut stack, out, text);
                    continue;
                }
                Token::Marker(marker) => marker,
            };

            // inside a raw region everything except the close is literal
            let raw_close = stack
                .last()
                .filter(|f| f.schema.mode.is_raw())
                .map(|f| f.schema.close_tag().unwrap_or_default() == marker && f.raw_depth == 0);
            match raw_close {
                Some(true) => {
                    if let Some(frame) = stack.pop() {
                        toggled.remove(frame.schema.open_tag.as_str());
                        out.push(ParsedToken::tagged(frame.schema, frame.buffer));
                    }
                    continue;
                }
                Some(false) => {
                    if let Some(frame) = stack.last_mut() {
                        if marker == frame.schema.close_tag().unwrap_or_default() {
                            frame.raw_depth -= 1;
                        } else if *marker == frame.schema.open_tag {
                            frame.raw_depth += 1;
                        }
                        frame.buffer.push_str(marker);
                    }
                    continue;
                }
                None => {}
            }

            if let Some(schema) = self.open_schema(marker) {
                let closes_instead =
                    schema.is_symmetrical() && toggled.contains(schema.open_tag.as_str());
                if !closes_instead {
                    match &schema.mode {
                        ScanMode::ToStreamEnd { raw } => {
                            flush_open_frames(&mut stack, out);
                            if *raw {
                                let rest: String =
                                    tokens[idx..].iter().map(Token::text).collect();
                                out.push(ParsedToken::tagged(schema, rest));
                            } else {
                                out.push(ParsedToken::tagged(schema, ""));
                                self.parse_into(&tokens[idx..], out);
                            }
                            return;
                        }
                        ScanMode::Delimited { .. } | ScanMode::Raw { .. } => {
                            // a repeated open of the innermost frame is content,
                            // not a new region (table cell separators rely on it)
                            if stack
                                .last()
                                .is_some_and(|f| f.schema.open_tag == schema.open_tag)
                            {
                                push_text(&mut stack, out, marker);
                                continue;
                            }
                            if schema.is_symmetrical() {
                                toggled.insert(schema.open_tag.as_str());
                            }
                            stack.push(Frame { schema, buffer: String::new(), raw_depth: 0 });
                            continue;
                        }
                    }
                }
            }

            if self.is_close_marker(marker) {
                if stack.is_empty() {
                    tracing::debug!(%marker, "close marker with nothing open, kept as text");
                    out.push(ParsedToken::text(marker.clone()));
                    continue;
                }
                // one close resolves the whole group: the outermost schema gets
                // the concatenated buffers, every other distinct schema an empty
                // region so its action still runs
                let combined: String = stack.iter().map(|f| f.buffer.as_str()).collect();
                let outermost = stack[0].schema;
                out.push(ParsedToken::tagged(outermost, combined));
                for frame in stack.iter().skip(1) {
                    if frame.schema.open_tag != outermost.open_tag {
                        out.push(ParsedToken::tagged(frame.schema, ""));
                    }
                }
                for frame in &stack {
                    toggled.remove(frame.schema.open_tag.as_str());
                }
                stack.clear();
                continue;
            }

            // known marker that neither opens nor closes anything here
            push_text(&mut stack, out, marker);
        }

        flush_open_frames(&mut stack, out);
    }
}

fn push_text<'t>(stack: &mut [Frame<'t>], out: &mut Vec<ParsedToken<'t>>, text: &str) {
    if text.is_empty() {
        return;
    }
    match stack.last_mut() {
        Some(frame) => frame.buffer.push_str(text),
        None => out.push(ParsedToken::text(text)),
    }
}

/// Frames still open when the stream ends are recovered as literal text, the
/// unmatched open marker included.
fn flush_open_frames<'t>(stack: &mut Vec<Frame<'t>>, out: &mut Vec<ParsedToken<'t>>) {
    for frame in stack.drain(..) {
        tracing::debug!(open = %frame.schema.open_tag, "unclosed region at end of stream");
        out.push(ParsedToken::text(frame.schema.open_tag.clone()));
        if !frame.buffer.is_empty() {
            out.push(ParsedToken::text(frame.buffer));
        }
    }
}

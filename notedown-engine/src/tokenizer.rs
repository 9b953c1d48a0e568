//! Marker tokenizer
//!
//!     `TokenTable` indexes a dialect's schemas by their open and close markers and
//!     splits raw text into literal runs and marker tokens. Matching is greedy: at
//!     every position the longest marker that matches wins. A backslash escapes the
//!     next character, and a space always ends the current literal run so that
//!     multi-word markers never straddle a word boundary.

use std::collections::HashMap;

use crate::schema::TokenSchema;

/// One unit of tokenizer output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text between markers
    Text(String),
    /// A schema open or close marker
    Marker(String),
}

impl Token {
    /// The underlying characters, regardless of kind
    pub fn text(&self) -> &str {
        match self {
            Token::Text(s) | Token::Marker(s) => s,
        }
    }
}

/// A dialect's schema table with marker lookup indexes
#[derive(Debug)]
pub struct TokenTable {
    schemas: Vec<TokenSchema>,
    open_index: HashMap<String, usize>,
    close_index: HashMap<String, usize>,
    // markers grouped by first char, for the scan loop
    by_first_char: HashMap<char, Vec<String>>,
}

enum Match {
    /// A complete marker matched at the scan position
    Full(String),
    /// Input ended while a marker was still possible
    Partial,
    None,
}

impl TokenTable {
    pub fn new(schemas: Vec<TokenSchema>) -> Self {
        let mut open_index = HashMap::new();
        let mut close_index = HashMap::new();
        let mut by_first_char: HashMap<char, Vec<String>> = HashMap::new();

        for (idx, schema) in schemas.iter().enumerate() {
            open_index.insert(schema.open_tag.clone(), idx);
            if let Some(close) = schema.close_tag() {
                if !close.is_empty() {
                    close_index.insert(close.to_owned(), idx);
                }
            }
        }
        for marker in open_index.keys().chain(close_index.keys()) {
            if let Some(first) = marker.chars().next() {
                let group = by_first_char.entry(first).or_default();
                if !group.iter().any(|m| m == marker) {
                    group.push(marker.clone());
                }
            }
        }

        TokenTable { schemas, open_index, close_index, by_first_char }
    }

    pub fn schemas(&self) -> &[TokenSchema] {
        &self.schemas
    }

    /// Schema opened by `marker`, if any
    pub fn open_schema(&self, marker: &str) -> Option<&TokenSchema> {
        self.open_index.get(marker).map(|&idx| &self.schemas[idx])
    }

    /// Whether `marker` closes some schema in the table
    pub fn is_close_marker(&self, marker: &str) -> bool {
        self.close_index.contains_key(marker)
    }

    /// Open markers that start with `prefix`
    pub fn open_markers_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.open_index
            .keys()
            .filter(move |marker| marker.starts_with(prefix))
            .map(String::as_str)
    }

    /// Splits `text` into literal runs and markers.
    ///
    /// A space terminates the current literal run and leads the next one, so a
    /// marker can never begin in one word and end in another. If the input ends
    /// in the middle of a possible marker, the pending characters are emitted as
    /// a marker token so downstream consumers see the partial delimiter.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if ch == ' ' {
                if !literal.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut literal)));
                }
                literal.push(' ');
                i += 1;
                continue;
            }
            if ch == '\\' {
                // escaped char is always literal, the backslash is dropped
                i += 1;
                if i < chars.len() {
                    literal.push(chars[i]);
                    i += 1;
                }
                continue;
            }
            if let Some(candidates) = self.by_first_char.get(&ch) {
                let at_line_start = i == 0 || chars[i - 1] == '\n';
                let permitted = candidates
                    .iter()
                    .filter(|marker| at_line_start || self.matches_mid_line(marker));
                match longest_match(&chars[i..], permitted) {
                    Match::Full(marker) => {
                        if !literal.is_empty() {
                            tokens.push(Token::Text(std::mem::take(&mut literal)));
                        }
                        i += marker.chars().count();
                        tracing::trace!(%marker, "tokenize: matched marker");
                        tokens.push(Token::Marker(marker));
                        continue;
                    }
                    Match::Partial => {
                        if !literal.is_empty() {
                            tokens.push(Token::Text(std::mem::take(&mut literal)));
                        }
                        tokens.push(Token::Marker(chars[i..].iter().collect()));
                        return tokens;
                    }
                    Match::None => {}
                }
            }
            literal.push(ch);
            i += 1;
        }
        if !literal.is_empty() {
            tokens.push(Token::Text(literal));
        }
        tokens
    }

    /// Whether `marker` may still match away from a line start. Close markers
    /// always may, anchored open markers may not.
    fn matches_mid_line(&self, marker: &str) -> bool {
        self.is_close_marker(marker)
            || !self.open_schema(marker).is_some_and(|schema| schema.line_anchored)
    }
}

/// Longest candidate matching at the head of `rest`. When no candidate matches
/// in full but `rest` ran out inside one, the match is reported as partial.
fn longest_match<'a>(rest: &[char], candidates: impl Iterator<Item = &'a String>) -> Match {
    let mut best: Option<&'a str> = None;
    let mut partial = false;
    for candidate in candidates {
        let mut matched = 0;
        let mut complete = true;
        for (idx, want) in candidate.chars().enumerate() {
            match rest.get(idx) {
                Some(&got) if got == want => matched += 1,
                Some(_) => {
                    complete = false;
                    break;
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            if best.map_or(true, |b| candidate.chars().count() > b.chars().count()) {
                best = Some(candidate.as_str());
            }
        } else if matched == rest.len() && matched > 0 {
            // every remaining char agreed with the candidate
            partial = true;
        }
    }
    match best {
        Some(marker) => Match::Full(marker.to_owned()),
        None if partial => Match::Partial,
        None => Match::None,
    }
}

//! Incremental token matcher
//!
//!     Watches a single candidate span as the user types in front of it. Characters
//!     arrive through `feed`, edits behind the caret through `insert` and `erase`.
//!     All edit offsets are character distances from the caret, i.e. from the right
//!     end of the span; offset 0 is the caret itself.
//!
//!     The span is three segments: the open marker, the content, and the close
//!     marker. Until the open marker is committed the pending characters live in a
//!     candidate buffer; the same buffer then tracks the close marker as it is
//!     typed. Edits to the content of a finished span are applied in place, edits
//!     touching either marker re-scan the whole span from scratch.

use std::sync::Arc;

use crate::tokenizer::TokenTable;

/// Segment of the span an edit lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Open,
    Content,
    Close,
}

#[derive(Debug, Clone, Copy)]
enum Edit {
    Insert,
    Erase,
}

#[derive(Debug)]
pub struct TokenMatcher {
    table: Arc<TokenTable>,
    open: String,
    content: String,
    close: String,
    // open marker in progress before commit, close marker in progress after
    candidate: String,
    found_open: bool,
    finished: bool,
}

impl TokenMatcher {
    pub fn new(table: Arc<TokenTable>) -> Self {
        TokenMatcher {
            table,
            open: String::new(),
            content: String::new(),
            close: String::new(),
            candidate: String::new(),
            found_open: false,
            finished: false,
        }
    }

    /// Whether an open marker has been committed
    pub fn has_open(&self) -> bool {
        self.found_open
    }

    /// Whether the close marker completed the span
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn contents(&self) -> &str {
        &self.content
    }

    /// The whole span as typed, markers included
    pub fn raw_str(&self) -> String {
        let mut raw = String::with_capacity(
            self.open.len() + self.content.len() + self.close.len() + self.candidate.len(),
        );
        raw.push_str(self.open_segment());
        raw.push_str(&self.content);
        raw.push_str(self.close_segment());
        raw
    }

    pub fn reset(&mut self) {
        self.open.clear();
        self.content.clear();
        self.close.clear();
        self.candidate.clear();
        self.found_open = false;
        self.finished = false;
    }

    /// Feeds the next typed character. No-op once the span is finished.
    pub fn feed(&mut self, ch: char) {
        if self.finished {
            return;
        }
        if self.found_open {
            self.feed_close(ch);
        } else {
            self.feed_open(ch);
        }
    }

    /// Removes the character `offset` places behind the caret.
    ///
    /// Offset 0 is the last character of the span. Content edits leave the match
    /// state alone; marker edits re-scan, so erasing into the open marker can
    /// flip a finished span back to unfinished.
    pub fn erase(&mut self, offset: usize) {
        match self.locate(offset, Edit::Erase) {
            Some((Segment::Content, idx)) => {
                if let Some((pos, _)) = self.content.char_indices().nth(idx) {
                    self.content.remove(pos);
                }
            }
            Some((_, _)) => {
                let mut raw: Vec<char> = self.raw_str().chars().collect();
                let total = raw.len();
                raw.remove(total - 1 - offset);
                self.rescan(&raw);
            }
            None => {
                tracing::debug!(offset, "erase offset outside the span, ignored");
            }
        }
    }

    /// Inserts `ch` at the gap `offset` places behind the caret.
    ///
    /// Offset 0 is the caret itself, which for an unfinished span is a plain
    /// `feed`. Content inserts of a finished span keep it finished.
    pub fn insert(&mut self, ch: char, offset: usize) {
        if offset == 0 && !self.finished {
            self.feed(ch);
            return;
        }
        match self.locate(offset, Edit::Insert) {
            Some((Segment::Content, idx)) => {
                let pos = self
                    .content
                    .char_indices()
                    .nth(idx)
                    .map(|(p, _)| p)
                    .unwrap_or(self.content.len());
                self.content.insert(pos, ch);
            }
            Some((_, _)) => {
                let mut raw: Vec<char> = self.raw_str().chars().collect();
                let total = raw.len();
                raw.insert(total - offset, ch);
                self.rescan(&raw);
            }
            None => {
                tracing::debug!(offset, "insert offset outside the span, fed instead");
                self.feed(ch);
            }
        }
    }

    /// Drops the last character of the span, the usual backspace path.
    pub fn pop_back(&mut self) {
        if self.raw_str().is_empty() {
            return;
        }
        self.erase(0);
    }

    fn open_segment(&self) -> &str {
        if self.found_open { &self.open } else { &self.candidate }
    }

    fn close_segment(&self) -> &str {
        if !self.found_open {
            ""
        } else if self.finished {
            &self.close
        } else {
            &self.candidate
        }
    }

    /// Maps a caret-relative offset to its segment and the character (for an
    /// erase) or gap (for an insert) index from the segment's left edge. Insert
    /// offsets on a segment boundary belong to the marker segment, so marker
    /// extensions re-scan.
    fn locate(&self, offset: usize, edit: Edit) -> Option<(Segment, usize)> {
        let open_len = self.open_segment().chars().count();
        let content_len = self.content.chars().count();
        let close_len = self.close_segment().chars().count();
        let total = open_len + content_len + close_len;

        let abs = match edit {
            Edit::Insert => {
                if offset > total {
                    return None;
                }
                total - offset
            }
            Edit::Erase => {
                if offset >= total {
                    return None;
                }
                total - 1 - offset
            }
        };
        let seg = match edit {
            Edit::Insert => {
                if abs <= open_len {
                    (Segment::Open, abs)
                } else if abs <= open_len + content_len {
                    (Segment::Content, abs - open_len)
                } else {
                    (Segment::Close, abs - open_len - content_len)
                }
            }
            Edit::Erase => {
                if abs < open_len {
                    (Segment::Open, abs)
                } else if abs < open_len + content_len {
                    (Segment::Content, abs - open_len)
                } else {
                    (Segment::Close, abs - open_len - content_len)
                }
            }
        };
        Some(seg)
    }

    fn rescan(&mut self, raw: &[char]) {
        self.reset();
        for &ch in raw {
            self.feed(ch);
        }
    }

    /// Whether `marker` takes part in live matching. Line- and table-oriented
    /// markers never do, they only make sense to the batch parser.
    fn eligible(marker: &str) -> bool {
        !marker.contains('\n') && !marker.starts_with('|')
    }

    fn feed_open(&mut self, ch: char) {
        let mut probe = self.candidate.clone();
        probe.push(ch);
        let extends = self
            .table
            .open_markers_with_prefix(&probe)
            .any(Self::eligible);
        if extends {
            self.candidate = probe;
            // commit straight away when no longer marker can still win
            let exact = self.table.open_schema(&self.candidate).is_some();
            let longer = self
                .table
                .open_markers_with_prefix(&self.candidate)
                .any(|m| Self::eligible(m) && m.len() > self.candidate.len());
            if exact && !longer {
                self.commit_open();
            }
            return;
        }
        // ch does not extend the candidate: commit what we have if it is a
        // complete marker and re-feed ch, otherwise restart from ch
        if self.table.open_schema(&self.candidate).is_some() {
            self.commit_open();
            self.feed_close(ch);
            return;
        }
        self.candidate.clear();
        let restart = ch.to_string();
        if self
            .table
            .open_markers_with_prefix(&restart)
            .any(Self::eligible)
        {
            self.candidate = restart;
        }
    }

    fn commit_open(&mut self) {
        self.open = std::mem::take(&mut self.candidate);
        self.found_open = true;
        tracing::trace!(open = %self.open, "live match: open committed");
    }

    fn close_target(&self) -> Option<String> {
        self.table
            .open_schema(&self.open)
            .and_then(|schema| schema.close_tag())
            .filter(|close| !close.is_empty())
            .map(str::to_owned)
    }

    fn feed_close(&mut self, ch: char) {
        let Some(target) = self.close_target() else {
            // open-ended schema, everything after the marker is content
            self.content.push(ch);
            return;
        };
        let mut probe = self.candidate.clone();
        probe.push(ch);
        if target.starts_with(&probe) {
            if probe == target && !self.content.is_empty() {
                self.close = probe;
                self.candidate.clear();
                self.finished = true;
                tracing::trace!(open = %self.open, content = %self.content, "live match: finished");
                return;
            }
            if probe == target {
                // a close with nothing inside is content, not a match
                self.content.push_str(&probe);
                self.candidate.clear();
                return;
            }
            self.candidate = probe;
            return;
        }
        // the partial close turns out to be content
        self.content.push_str(&self.candidate);
        self.candidate.clear();
        if target.starts_with(ch) {
            self.candidate.push(ch);
            if self.candidate == target && !self.content.is_empty() {
                self.close = std::mem::take(&mut self.candidate);
                self.finished = true;
            }
        } else {
            self.content.push(ch);
        }
    }
}

//! Dialect trait definition
//!
//! This module defines the core Dialect trait that all markup dialects must
//! implement. A dialect bundles its token table with the driver that turns a
//! parsed token stream into a document tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::EngineError;
use crate::matcher::TokenMatcher;
use crate::tokenizer::TokenTable;
use crate::tree::Element;

/// Result of importing one source document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// The `root > slot` element tree
    pub tree: Element,
    /// Link targets that point inside the notebook, with the indexes of the
    /// slot children they were recorded against
    pub broken_links: BTreeMap<String, Vec<usize>>,
}

/// Trait for markup dialects
///
/// Implementors expose their token table and drive the document builder over
/// the parsed token stream.
pub trait Dialect: Send + Sync {
    /// The name of this dialect (e.g., "markdown", "wiki")
    fn name(&self) -> &str;

    /// Optional description of this dialect
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this dialect, without the leading dot.
    /// Used for automatic dialect detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// The table the tokenizer and the live matcher share
    fn token_table(&self) -> &Arc<TokenTable>;

    /// Imports `source` into a document tree
    fn parse(&self, source: &str) -> Result<ParsedDocument, EngineError>;

    /// A live matcher over this dialect's table, one per watched span
    fn matcher(&self) -> TokenMatcher {
        TokenMatcher::new(Arc::clone(self.token_table()))
    }
}

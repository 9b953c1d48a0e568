//! Markdown dialect tests
//!
//! End-to-end checks from Markdown source to the output element tree.

mod documents;

//! Markup import engine for rich-text notebooks
//!
//!     This crate turns lightweight-markup sources (Markdown, zim-style wiki) into
//!     an attributed document tree a notebook application can load. It deliberately
//!     does not render anything: the output is a `root > slot` element tree of
//!     `rich_text` runs plus codebox/table/image anchors.
//!
//!     TLDR: For dialect authors:
//!         - A dialect is a token table plus a driver; the tokenizer, the
//!           token-stream parser and the live matcher are shared machinery.
//!         - Describe your markers as `TokenSchema` rows and map each resolved
//!           region onto `DocumentBuilder` calls in the driver.
//!         - Register the dialect in `DialectRegistry` so hosts can select it by
//!           name or detect it from a filename.
//!
//! Architecture
//!
//!     Input text flows through three stages. `TokenTable::tokenize` splits it
//!     into literal runs and markers (greedy longest match, backslash escapes,
//!     space as a hard run boundary). `TokenTable::parse_tokens` resolves the
//!     marker stream against the schema table with an explicit frame stack, so
//!     nesting, symmetric toggles and raw captures need no recursion through the
//!     grammar. The dialect driver finally walks the resolved regions and feeds
//!     the `DocumentBuilder`.
//!
//!     `TokenMatcher` serves the interactive path: a host editor feeds one
//!     candidate span character by character and applies caret-relative edits,
//!     asking the matcher whether the span still forms a complete token.
//!
//!     This is a pure lib: it powers the notedown CLI but no code here assumes a
//!     shell environment.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── schema.rs               # TokenSchema, ScanMode, TagAction
//!     ├── tokenizer.rs            # TokenTable and the marker scanner
//!     ├── parser.rs               # token-stream resolution
//!     ├── matcher.rs              # incremental per-span matcher
//!     ├── tree.rs                 # output Element tree
//!     ├── builder.rs              # DocumentBuilder
//!     ├── config.rs               # BuilderConfig
//!     ├── dialect.rs              # Dialect trait definition
//!     ├── registry.rs             # DialectRegistry for discovery and selection
//!     └── dialects
//!         ├── markdown.rs
//!         └── wiki.rs

pub mod builder;
pub mod config;
pub mod dialect;
pub mod dialects;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod tokenizer;
pub mod tree;

pub use builder::DocumentBuilder;
pub use config::BuilderConfig;
pub use dialect::{Dialect, ParsedDocument};
pub use error::EngineError;
pub use matcher::TokenMatcher;
pub use parser::ParsedToken;
pub use registry::DialectRegistry;
pub use schema::{CheckboxState, ScanMode, TagAction, TokenSchema};
pub use tokenizer::{Token, TokenTable};
pub use tree::Element;

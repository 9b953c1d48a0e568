//! Shared configuration loader for the notedown toolchain.
//!
//! `defaults/notedown.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`NotedownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use notedown_engine::BuilderConfig;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/notedown.default.toml");

/// Top-level configuration consumed by notedown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NotedownConfig {
    pub builder: BuilderSection,
    pub output: OutputSection,
}

/// Mirrors the knobs exposed by the document builder.
#[derive(Debug, Clone, Deserialize)]
pub struct BuilderSection {
    pub bullet_chars: Vec<char>,
    pub todo_glyphs: Vec<char>,
    pub codebox_width: u32,
    pub codebox_height: u32,
    pub table_col_width: u32,
    pub hrule: String,
}

impl BuilderSection {
    /// Converts into the engine's config, checking the glyph sets on the way.
    pub fn engine_config(&self) -> Result<BuilderConfig, ConfigError> {
        if self.bullet_chars.is_empty() {
            return Err(ConfigError::Message(
                "builder.bullet_chars must not be empty".to_owned(),
            ));
        }
        let todo_glyphs: [char; 3] = self.todo_glyphs.as_slice().try_into().map_err(|_| {
            ConfigError::Message("builder.todo_glyphs must hold exactly three glyphs".to_owned())
        })?;
        Ok(BuilderConfig {
            bullet_chars: self.bullet_chars.clone(),
            todo_glyphs,
            codebox_width: self.codebox_width,
            codebox_height: self.codebox_height,
            table_col_width: self.table_col_width,
            hrule: self.hrule.clone(),
        })
    }
}

/// Output shaping for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<NotedownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NotedownConfig, ConfigError> {
    Loader::new().build()
}

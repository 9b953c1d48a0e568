//! Builder-facing configuration
//!
//!     The glyph sets and anchor dimensions the document builder needs. Hosts
//!     usually fill this from their own configuration layer; the defaults match
//!     the stock notebook appearance.

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    /// Bullet glyph per list nesting level, outermost first
    pub bullet_chars: Vec<char>,
    /// Unchecked, ticked and marked checkbox glyphs
    pub todo_glyphs: [char; 3],
    pub codebox_width: u32,
    pub codebox_height: u32,
    pub table_col_width: u32,
    /// Text inserted for a horizontal rule
    pub hrule: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            bullet_chars: vec!['•', '◇', '▪', '-', '→', '⇒'],
            todo_glyphs: ['☐', '☑', '☒'],
            codebox_width: 500,
            codebox_height: 100,
            table_col_width: 60,
            hrule: "~".repeat(33),
        }
    }
}

impl BuilderConfig {
    /// A builder cannot run without at least one bullet glyph.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.bullet_chars.is_empty() {
            return Err(EngineError::Config(
                "no bullet-list characters set".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BuilderConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_bullets_rejected() {
        let config = BuilderConfig { bullet_chars: vec![], ..Default::default() };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }
}

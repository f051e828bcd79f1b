//! Configuration types for the formatting pipeline.
//!
//! All pipeline behaviour is controlled through [`FormatConfig`], built via
//! its [`FormatConfigBuilder`]. The defaults reproduce the canonical
//! clipboard transform; every knob only switches a stage off or adjusts a
//! constant, never the order in which stages run.

use crate::error::ClipFmtError;
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::format_text`] and [`crate::mark_done`].
///
/// # Example
/// ```rust
/// use clipfmt::{FormatConfig, ScriptTarget};
///
/// let config = FormatConfig::builder()
///     .script(ScriptTarget::HongKong)
///     .continuation_indent(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.continuation_indent, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Target script for Chinese characters. Default: [`ScriptTarget::Taiwan`].
    pub script: ScriptTarget,

    /// Rewrite `, . ? ! : ; ( )` to their full-width forms outside protected
    /// spans. Default: true.
    pub fullwidth_punctuation: bool,

    /// Insert spaces at CJK / Latin-or-digit boundaries. Default: true.
    pub cjk_spacing: bool,

    /// Turn a trailing URL into a `---` + `source: URL` footer. Default: true.
    pub source_footer: bool,

    /// Spaces prefixed to continuation lines under an open ordered list.
    /// Range: 1–8. Default: 3 (aligns with the text after `N. `).
    pub continuation_indent: usize,

    /// Prefix emitted by `mark-done` before each non-empty line. Default: `✅`.
    pub done_marker: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            script: ScriptTarget::default(),
            fullwidth_punctuation: true,
            cjk_spacing: true,
            source_footer: true,
            continuation_indent: 3,
            done_marker: "✅".to_string(),
        }
    }
}

impl FormatConfig {
    /// Create a new builder for `FormatConfig`.
    pub fn builder() -> FormatConfigBuilder {
        FormatConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`FormatConfig`].
#[derive(Debug)]
pub struct FormatConfigBuilder {
    config: FormatConfig,
}

impl FormatConfigBuilder {
    pub fn script(mut self, target: ScriptTarget) -> Self {
        self.config.script = target;
        self
    }

    pub fn fullwidth_punctuation(mut self, v: bool) -> Self {
        self.config.fullwidth_punctuation = v;
        self
    }

    pub fn cjk_spacing(mut self, v: bool) -> Self {
        self.config.cjk_spacing = v;
        self
    }

    pub fn source_footer(mut self, v: bool) -> Self {
        self.config.source_footer = v;
        self
    }

    pub fn continuation_indent(mut self, n: usize) -> Self {
        self.config.continuation_indent = n;
        self
    }

    pub fn done_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.done_marker = marker.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<FormatConfig, ClipFmtError> {
        let c = &self.config;
        if !(1..=8).contains(&c.continuation_indent) {
            return Err(ClipFmtError::InvalidConfig(format!(
                "continuation indent must be 1–8 spaces, got {}",
                c.continuation_indent
            )));
        }
        if c.done_marker.trim().is_empty() {
            return Err(ClipFmtError::InvalidConfig(
                "done marker must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which Chinese script variant the Script Converter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptTarget {
    /// Traditional Chinese with Taiwan conventions (default).
    #[default]
    Taiwan,
    /// Generic Traditional Chinese.
    Traditional,
    /// Traditional Chinese with Hong Kong conventions.
    HongKong,
    /// Leave characters as they are.
    Keep,
}

impl ScriptTarget {
    /// Parse a user-supplied name (`tw`, `hant`, `hk`, `keep`, …).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tw" | "taiwan" | "zh-tw" => Some(ScriptTarget::Taiwan),
            "hant" | "traditional" | "zh-hant" => Some(ScriptTarget::Traditional),
            "hk" | "hongkong" | "hong-kong" | "zh-hk" => Some(ScriptTarget::HongKong),
            "keep" | "none" | "off" => Some(ScriptTarget::Keep),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_transform() {
        let c = FormatConfig::default();
        assert_eq!(c.script, ScriptTarget::Taiwan);
        assert!(c.fullwidth_punctuation && c.cjk_spacing && c.source_footer);
        assert_eq!(c.continuation_indent, 3);
        assert_eq!(c.done_marker, "✅");
    }

    #[test]
    fn builder_rejects_zero_indent() {
        let err = FormatConfig::builder()
            .continuation_indent(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("continuation indent"));
    }

    #[test]
    fn builder_rejects_blank_marker() {
        assert!(FormatConfig::builder().done_marker("  ").build().is_err());
    }

    #[test]
    fn script_target_parse() {
        assert_eq!(ScriptTarget::parse("TW"), Some(ScriptTarget::Taiwan));
        assert_eq!(ScriptTarget::parse("hk"), Some(ScriptTarget::HongKong));
        assert_eq!(ScriptTarget::parse("zh-hant"), Some(ScriptTarget::Traditional));
        assert_eq!(ScriptTarget::parse("off"), Some(ScriptTarget::Keep));
        assert_eq!(ScriptTarget::parse("klingon"), None);
    }

    #[test]
    fn script_target_serde_is_kebab_case() {
        let json = serde_json::to_string(&ScriptTarget::HongKong).unwrap();
        assert_eq!(json, "\"hong-kong\"");
    }
}

//! Error types for the clipfmt library.
//!
//! The text pipeline itself cannot fail: every stage is a pure
//! `&str → String` function and degrades silently on odd input (an
//! unparseable Chinese numeral becomes `0`, an unrestorable placeholder stays
//! visible). The only fatal conditions are at the boundary:
//!
//! * nothing to format ([`ClipFmtError::EmptyInput`]), which the CLI reports
//!   as a notice rather than a failure;
//! * reading the input or writing the output;
//! * an invalid [`crate::config::FormatConfig`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the clipfmt library.
#[derive(Debug, Error)]
pub enum ClipFmtError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input contained no text at all.
    #[error("No text selected")]
    EmptyInput,

    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file (or stdin) could not be read as UTF-8 text.
    #[error("Failed to read input '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClipFmtError {
    /// True for the "nothing to do" case the CLI surfaces as a notice.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ClipFmtError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_display() {
        let e = ClipFmtError::EmptyInput;
        assert_eq!(e.to_string(), "No text selected");
        assert!(e.is_empty_input());
    }

    #[test]
    fn input_not_found_display() {
        let e = ClipFmtError::InputNotFound {
            path: PathBuf::from("/tmp/nope.txt"),
        };
        assert!(e.to_string().contains("/tmp/nope.txt"));
        assert!(!e.is_empty_input());
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;
        let e = ClipFmtError::OutputWriteFailed {
            path: PathBuf::from("out.md"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(e.to_string().contains("disk full"));
        assert!(e.source().is_some());
    }

    #[test]
    fn every_variant_has_a_producer() {
        // No wildcard arm: each variant names the code path that builds it.
        let producer = |e: &ClipFmtError| match e {
            ClipFmtError::EmptyInput => "convert::format_clipboard",
            ClipFmtError::InputNotFound { .. } => "input::read_file",
            ClipFmtError::PermissionDenied { .. } => "input::read_file",
            ClipFmtError::InputReadFailed { .. } => "input::read_file",
            ClipFmtError::OutputWriteFailed { .. } => "convert::write_output",
            ClipFmtError::InvalidConfig(_) => "config::FormatConfigBuilder::build",
        };
        assert_eq!(producer(&ClipFmtError::EmptyInput), "convert::format_clipboard");
    }

    #[test]
    fn invalid_config_display() {
        let e = ClipFmtError::InvalidConfig("indent must be 1–8".into());
        assert!(e.to_string().contains("indent must be"));
    }
}

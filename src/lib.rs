//! # clipfmt
//!
//! Reformat text copied out of chat apps, web pages and PDFs into clean
//! Traditional-Chinese Markdown.
//!
//! ## Why this crate?
//!
//! Pasted CJK text is rarely ready to use: it mixes Simplified and
//! Traditional characters, glues Latin words onto Chinese ones, uses
//! half-width punctuation, and carries half a dozen ordered-list notations
//! (`1)`, `一、`, `（一）` …) that editors do not recognise as lists. This
//! crate runs a fixed, deterministic pipeline over the text so the result
//! pastes cleanly into a Markdown editor, and produces an HTML flavour when
//! the target needs one to see a real list.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─ 1. Preprocess  line separators, stray bullets, inline markers
//!  ├─ 2. Classify    marker + content per line, `N. ` for every ordered list
//!  ├─ 3. Content     protect spans → script → punctuation → CJK spacing
//!  ├─ 4. Reflow      blank lines, continuation indentation
//!  ├─ 5. Source      trailing URL → `source:` footer
//!  └─ 6. HTML        optional list or link-preserving HTML flavour
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use clipfmt::{format_text, FormatConfig};
//!
//! let config = FormatConfig::default();
//! let out = format_text("一、用Rust写CLI\n二、测试", &config);
//! assert_eq!(out, "1. 用 Rust 寫 CLI\n2. 測試");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `clipfmt` binary (clap + anyhow + tracing-subscriber + serde_json) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! clipfmt = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{FormatConfig, FormatConfigBuilder, ScriptTarget};
pub use convert::{format_clipboard, format_file, format_text, mark_done, mark_done_file, write_output};
pub use error::ClipFmtError;
pub use output::{ClipboardPayload, PayloadKind};
pub use pipeline::input::InputSource;

//! Formatting entry points.
//!
//! [`format_text`] and [`mark_done`] are pure and synchronous: the whole
//! pipeline is a chain of `&str -> String` stages with no I/O. The async
//! `*_file` variants add input resolution and an atomic output write around
//! them for the CLI and other file-based callers.

use crate::config::FormatConfig;
use crate::error::ClipFmtError;
use crate::output::{ClipboardPayload, PayloadKind};
use crate::pipeline::input::{self, InputSource};
use crate::pipeline::{content, html, preprocess, reflow, script, source, spacing};
use std::path::Path;
use tracing::{debug, info};

/// Run the full formatting pipeline over `text`.
///
/// # Example
/// ```rust
/// use clipfmt::{format_text, FormatConfig};
///
/// let out = format_text("第一行\n第二行", &FormatConfig::default());
/// assert_eq!(out, "第一行\n\n第二行");
/// ```
pub fn format_text(text: &str, config: &FormatConfig) -> String {
    info!("Formatting {} chars", text.chars().count());

    // ── Step 1: Document-level repair ────────────────────────────────────
    let s = preprocess::preprocess(text);

    // ── Step 2: Markers and content, line by line ────────────────────────
    let s = content::transform_lines(&s, config);

    // ── Step 3: Blank lines and continuation indentation ─────────────────
    let s = reflow::reflow(&s, config.continuation_indent);

    // ── Step 4: Trailing URL footer ──────────────────────────────────────
    let s = if config.source_footer {
        source::rewrite_trailing_url(&s)
    } else {
        s
    };

    info!("Formatted into {} lines", s.split('\n').count());
    s
}

/// Prefix every non-blank line with the done marker.
///
/// Each prefixed line is trimmed, script-converted and spaced; blank lines
/// are kept exactly as they were. No marker detection happens here: calling
/// this is the decision to mark every line.
pub fn mark_done(text: &str, config: &FormatConfig) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return line.to_string();
            }
            let converted = script::convert_script(trimmed, config.script);
            let converted = if config.cjk_spacing {
                spacing::spacing_text(&converted)
            } else {
                converted
            };
            format!("{} {}", config.done_marker, converted)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a clipboard selection and choose the flavours to hand back.
///
/// * `html` containing a link: keep that HTML, reformatting only link text.
/// * formatted text containing a list: synthesise an HTML list.
/// * otherwise: plain text only.
///
/// # Errors
/// [`ClipFmtError::EmptyInput`] when `text` is empty.
pub fn format_clipboard(
    text: &str,
    html_flavour: Option<&str>,
    config: &FormatConfig,
) -> Result<ClipboardPayload, ClipFmtError> {
    if text.is_empty() {
        return Err(ClipFmtError::EmptyInput);
    }

    let formatted = format_text(text, config);

    let (html, kind) = match html_flavour.filter(|h| html::has_anchor(h)) {
        Some(source_html) => {
            let projected =
                html::transform_anchor_text(source_html, |inner| format_text(inner, config));
            (Some(projected), PayloadKind::AnchorHtml)
        }
        None if html::has_list_items(&formatted) => {
            (Some(html::markdown_to_html(&formatted)), PayloadKind::ListHtml)
        }
        None => (None, PayloadKind::PlainText),
    };
    debug!(?kind, "selected clipboard flavours");

    Ok(ClipboardPayload {
        text: formatted,
        html,
        kind,
    })
}

/// Read `source` (and an optional HTML companion), format it, and write the
/// plain text to `output_path` when one is given.
pub async fn format_file(
    source: &InputSource,
    html_path: Option<&Path>,
    output_path: Option<&Path>,
    config: &FormatConfig,
) -> Result<ClipboardPayload, ClipFmtError> {
    let text = input::read_input(source).await?;
    let html_flavour = input::read_optional(html_path).await?;

    let payload = format_clipboard(&text, html_flavour.as_deref(), config)?;

    if let Some(path) = output_path {
        write_output(path, &payload.text).await?;
    }
    Ok(payload)
}

/// Read `source`, mark every line done, and write the result to
/// `output_path` when one is given.
///
/// # Errors
/// [`ClipFmtError::EmptyInput`] when the input is empty or whitespace only.
pub async fn mark_done_file(
    source: &InputSource,
    output_path: Option<&Path>,
    config: &FormatConfig,
) -> Result<String, ClipFmtError> {
    let text = input::read_input(source).await?;
    if text.trim().is_empty() {
        return Err(ClipFmtError::EmptyInput);
    }

    let marked = mark_done(&text, config);

    if let Some(path) = output_path {
        write_output(path, &marked).await?;
    }
    Ok(marked)
}

/// Write `contents` to `path` atomically (temp file + rename), creating
/// parent directories as needed.
pub async fn write_output(path: &Path, contents: &str) -> Result<(), ClipFmtError> {
    let write_err = |e| ClipFmtError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("clipfmt.tmp");
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

//! Trailing-URL rewriter.
//!
//! A clipping that ends with the page it came from ("…\nhttps://x.io/post")
//! gets that URL moved into a footer:
//!
//! ```text
//! body
//!
//! ---
//!
//! source: https://x.io/post
//! ```

use crate::pipeline::protect::RE_MD_LINK;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_TRAILING_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?<?(https?://[^\s<>]+)>?$").unwrap());

/// A footer left by an earlier pass (`source:` may have been made full-width).
static RE_EXISTING_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)---\s*source[:：]$").unwrap());

static RE_TRAILING_HEADINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\n\s*#+\s+.*)*$").unwrap());

static RE_TRAILING_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s#><\-*+\x{FFFC}]*$").unwrap());

/// Move a trailing bare URL into a `source:` footer.
///
/// Text that does not end in a bare URL (including text ending in a Markdown
/// link) is returned unchanged.
pub fn rewrite_trailing_url(text: &str) -> String {
    let trimmed = text.trim_end();

    let Some(caps) = RE_TRAILING_URL.captures(trimmed) else {
        return text.to_string();
    };
    if RE_MD_LINK
        .find_iter(trimmed)
        .any(|m| m.end() == trimmed.len())
    {
        return text.to_string();
    }

    let url = caps[1].trim_end_matches('>');
    let Some(mut start) = trimmed.rfind(url) else {
        return text.to_string();
    };
    if trimmed[..start].ends_with('<') {
        start -= 1;
    }

    let before = trimmed[..start].trim_end();
    let body = RE_EXISTING_FOOTER.replace(before, "");
    let body = RE_TRAILING_HEADINGS.replace(&body, "");
    let body = RE_TRAILING_NOISE.replace(&body, "");
    debug!(url, body_lines = body.lines().count(), "moved trailing URL into footer");

    if body.is_empty() {
        format!("---\n\nsource: {url}")
    } else {
        format!("{body}\n\n---\n\nsource: {url}")
    }
}

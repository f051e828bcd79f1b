//! Content transformation: the per-line heart of the pipeline.
//!
//! Only the content after a line's marker is touched; markers, fence lines
//! and everything inside a fenced code block pass through byte-for-byte.
//!
//! ## Order
//!
//! 1. protect spans (code, links, URLs, tags, ellipses, dotted tokens)
//! 2. script conversion
//! 3. punctuation table, before spacing: the spacing rules would otherwise
//!    pad the half-width symbols
//! 4. CJK spacing
//! 5. restore spans

use crate::config::FormatConfig;
use crate::pipeline::classify::{classify_line, is_fence};
use crate::pipeline::protect::{protect, RE_BARE_URL, RE_MD_LINK};
use crate::pipeline::script::convert_script;
use crate::pipeline::spacing::spacing_text;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_ELLIPSIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static RE_DOTTED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9]+(?:\.[a-zA-Z0-9]+)+").unwrap());

/// Protection priority: a later pattern never sees inside an earlier span.
static CONTENT_PATTERNS: Lazy<Vec<&'static Regex>> = Lazy::new(|| {
    vec![
        &*RE_INLINE_CODE,
        &*RE_MD_LINK,
        &*RE_BARE_URL,
        &*RE_HTML_TAG,
        &*RE_ELLIPSIS,
        &*RE_DOTTED_TOKEN,
    ]
});

/// Half-width → full-width punctuation, applied by literal replacement.
pub const PUNCTUATION_TABLE: [(char, char); 8] = [
    (',', '，'),
    ('.', '。'),
    ('?', '？'),
    ('!', '！'),
    (':', '：'),
    (';', '；'),
    ('(', '（'),
    (')', '）'),
];

/// Replace every half-width punctuation mark in the table.
pub fn substitute_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            PUNCTUATION_TABLE
                .iter()
                .find(|(half, _)| *half == c)
                .map_or(c, |(_, full)| *full)
        })
        .collect()
}

/// Transform one line's content (never its marker).
pub fn transform_content(content: &str, config: &FormatConfig) -> String {
    let (s, table) = protect(content, &CONTENT_PATTERNS);

    let s = convert_script(&s, config.script);
    let s = if config.fullwidth_punctuation {
        substitute_punctuation(&s)
    } else {
        s
    };
    let s = if config.cjk_spacing { spacing_text(&s) } else { s };

    table.restore(&s)
}

/// Classify, normalise and transform every line of a preprocessed document.
///
/// Fence lines toggle code-block state; while inside a block, lines are
/// emitted untouched.
pub fn transform_lines(text: &str, config: &FormatConfig) -> String {
    let mut in_code_block = false;
    let mut out = Vec::new();

    for line in text.split('\n') {
        if is_fence(line) {
            in_code_block = !in_code_block;
            out.push(line.to_string());
            continue;
        }
        if in_code_block {
            out.push(line.to_string());
            continue;
        }

        let mut classified = classify_line(line);
        classified.content = transform_content(&classified.content, config);
        out.push(classified.render());
    }

    debug!(lines = out.len(), "transformed line content");
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cfg() -> FormatConfig {
        FormatConfig::default()
    }

    #[test]
    fn punctuation_table_is_literal() {
        assert_eq!(substitute_punctuation("測試,測試.測試"), "測試，測試。測試");
        assert_eq!(substitute_punctuation("a?b!c:d;e(f)"), "a？b！c：d；e（f）");
    }

    #[test]
    fn punctuation_then_spacing() {
        assert_eq!(transform_content("測試,測試.測試", &cfg()), "測試，測試。測試");
    }

    #[test]
    fn protected_spans_survive() {
        let out = transform_content("升級到v1.2.3,見`a.b()`", &cfg());
        assert_eq!(out, "升級到v1.2.3，見`a.b()`");
    }

    #[test]
    fn urls_and_links_survive() {
        let out = transform_content("看https://x.io/a.b?q=1,好", &cfg());
        assert_eq!(out, "看https://x.io/a.b?q=1,好");

        let out = transform_content("見[文件](https://x.io/a_(b).md).", &cfg());
        assert_eq!(out, "見[文件](https://x.io/a_(b).md)。");
    }

    #[test]
    fn html_tags_and_ellipsis_survive() {
        assert_eq!(transform_content("<b>粗體</b>...", &cfg()), "<b>粗體</b>...");
    }

    #[test]
    fn simplified_text_is_converted() {
        assert_eq!(transform_content("测试", &cfg()), "測試");
    }

    #[test]
    fn stages_can_be_switched_off() {
        let config = FormatConfig::builder()
            .fullwidth_punctuation(false)
            .cjk_spacing(false)
            .build()
            .unwrap();
        assert_eq!(transform_content("中文abc, ok", &config), "中文abc, ok");
    }

    #[test]
    fn fenced_code_is_byte_identical() {
        let text = "```\n1) not a list,\n  - keep.\n```\n一、甲乙";
        let out = transform_lines(text, &cfg());
        assert_eq!(out, "```\n1) not a list,\n  - keep.\n```\n1. 甲乙");
    }

    #[test]
    fn markers_are_not_transformed() {
        assert_eq!(transform_lines("(1) a.b", &cfg()), "1. a.b");
        assert_eq!(transform_lines("> 說:", &cfg()), "> 說：");
    }
}

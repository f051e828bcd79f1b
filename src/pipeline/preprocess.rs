//! Document-level preprocessing, run before the text is split into lines.
//!
//! Text pasted from chat apps and PDF viewers often arrives with exotic line
//! separators, object-replacement junk, escaped list numbers and list markers
//! that were rendered without a real line break ("說明：1. 第一 2. 第二").
//! These passes repair all of that so the line classifier sees one marker per
//! line.
//!
//! ## Pass order
//!
//! 1. Normalise vertical whitespace to `\n` (everything below relies on it)
//! 2. Split off fenced code blocks; only prose segments go through 3–7
//! 3. Strip U+FFFC and any Markdown marker characters glued to it
//! 4. Un-escape `N\.` / `N\)`
//! 5. Protect links, URLs, inline code, HTML tags and dotted tokens so the
//!    repair heuristics never fire inside them
//! 6. Line-break repair for bullets, blockquotes, headers and ordered lists
//! 7. Restore protected spans

use crate::pipeline::classify::is_fence;
use crate::pipeline::protect::{protect, RE_AUTOLINK_URL, RE_MD_LINK};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Run every preprocessing pass.
pub fn preprocess(input: &str) -> String {
    let text = normalise_vertical_whitespace(input);

    let out = split_code_segments(&text)
        .into_iter()
        .map(|seg| match seg {
            Segment::Code(code) => code,
            Segment::Prose(prose) => preprocess_prose(&prose),
        })
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        lines_in = input.lines().count(),
        lines_out = out.lines().count(),
        "preprocessed"
    );
    out
}

fn preprocess_prose(text: &str) -> String {
    let s = strip_object_replacement(text);
    let s = unescape_ordered_markers(&s);

    let (s, table) = protect(&s, &DOCUMENT_PATTERNS);
    let s = repair_bullets(&s);
    let s = repair_inline_blocks(&s);
    let s = repair_ordered_markers(&s);
    table.restore(&s)
}

// ── Pass 1: Vertical whitespace ──────────────────────────────────────────────

/// CRLF, CR, LS, PS, NEL, VT and FF all become `\n`.
pub fn normalise_vertical_whitespace(input: &str) -> String {
    input.replace("\r\n", "\n").replace(
        [
            '\r', '\u{2028}', '\u{2029}', '\u{0085}', '\u{000B}', '\u{000C}',
        ],
        "\n",
    )
}

// ── Pass 2: Code segments ────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Prose(String),
    Code(String),
}

/// Group lines into prose and fenced-code runs (fence lines belong to the
/// code run). An unclosed fence runs to the end of the text.
fn split_code_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code = false;

    for line in text.split('\n') {
        let fence = is_fence(line);
        if fence && !in_code {
            if !current.is_empty() {
                segments.push(Segment::Prose(current.join("\n")));
                current.clear();
            }
            in_code = true;
            current.push(line);
        } else if fence {
            current.push(line);
            segments.push(Segment::Code(current.join("\n")));
            current.clear();
            in_code = false;
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() || segments.is_empty() {
        let rest = current.join("\n");
        segments.push(if in_code {
            Segment::Code(rest)
        } else {
            Segment::Prose(rest)
        });
    }
    segments
}

// ── Pass 3: Object replacement character ─────────────────────────────────────

static RE_OBJECT_REPLACEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{FFFC}[#>\-*+]*").unwrap());

fn strip_object_replacement(input: &str) -> String {
    RE_OBJECT_REPLACEMENT.replace_all(input, "").into_owned()
}

// ── Pass 4: Escaped list numbers ─────────────────────────────────────────────

static RE_ESCAPED_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\\([.)])").unwrap());

fn unescape_ordered_markers(input: &str) -> String {
    RE_ESCAPED_ORDERED.replace_all(input, "$1$2").into_owned()
}

// ── Pass 5: Protection set ───────────────────────────────────────────────────

static RE_DOC_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`\n]+`").unwrap());
static RE_DOC_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^<>\n]*>").unwrap());
static RE_DOC_DOTTED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9]+(?:\.[a-zA-Z0-9]+)+").unwrap());

static DOCUMENT_PATTERNS: Lazy<Vec<&'static Regex>> = Lazy::new(|| {
    vec![
        &*RE_MD_LINK,
        &*RE_AUTOLINK_URL,
        &*RE_DOC_INLINE_CODE,
        &*RE_DOC_HTML_TAG,
        &*RE_DOC_DOTTED_TOKEN,
    ]
});

// ── Pass 6: Line-break repair ────────────────────────────────────────────────

// Indentation class: space, tab, NBSP, ideographic space.
static RE_LINE_START_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t\x{A0}\x{3000}]*[•・][ \t\x{A0}\x{3000}]*").unwrap());
static RE_INLINE_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^ \t\n\x{A0}\x{3000}])[ \t\x{A0}\x{3000}]*[•・][ \t\x{A0}\x{3000}]*").unwrap()
});

/// Bullets at a line start lose their indentation; bullets after text get
/// their own line. Both become `- `.
fn repair_bullets(input: &str) -> String {
    let s = RE_LINE_START_BULLET.replace_all(input, "- ");
    RE_INLINE_BULLET.replace_all(&s, "$1\n- ").into_owned()
}

static RE_INLINE_BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^ \t\n\x{A0}\x{3000}])[ \t\x{A0}\x{3000}]*>").unwrap());
static RE_INLINE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^ \t\n\x{A0}\x{3000}#])[ \t\x{A0}\x{3000}]*(#+\s)").unwrap());

/// `>` and `#… ` after text start a new line.
fn repair_inline_blocks(input: &str) -> String {
    let s = RE_INLINE_BLOCKQUOTE.replace_all(input, "$1\n> ");
    RE_INLINE_HEADER.replace_all(&s, "$1\n$2").into_owned()
}

static RE_INLINE_ARABIC_DOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\s0-9(（])[ \t\x{A0}\x{3000}]*([0-9]+[.、])[ \t]*").unwrap()
});
static RE_INLINE_ARABIC_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s0-9(（])[ \t\x{A0}\x{3000}]*([0-9]+\))[ \t]*").unwrap());
static RE_INLINE_CHINESE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\s一二三四五六七八九十])[ \t\x{A0}\x{3000}]*([一二三四五六七八九十]+、)")
        .unwrap()
});
static RE_INLINE_PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\s])[ \t\x{A0}\x{3000}]*([（(][一二三四五六七八九十0-9]+[)）])").unwrap()
});
static RE_LINE_START_ORDERED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t\x{A0}\x{3000}]+([0-9]+[.、)]|[一二三四五六七八九十]+、|[（(][一二三四五六七八九十0-9]+[)）])",
    )
    .unwrap()
});

/// Ordered markers after text get their own line; markers already at a line
/// start lose their indentation.
///
/// A digit or an opening parenthesis right before an Arabic marker keeps it
/// inline (`12.`, `(1)`), and a Chinese numeral before `、` is part of the
/// same numeral (`十一、`).
fn repair_ordered_markers(input: &str) -> String {
    let s = RE_INLINE_ARABIC_DOT.replace_all(input, "$1\n$2 ");
    let s = RE_INLINE_ARABIC_PAREN.replace_all(&s, "$1\n$2 ");
    let s = RE_INLINE_CHINESE.replace_all(&s, "$1\n$2");
    let s = RE_INLINE_PAREN.replace_all(&s, "$1\n$2");
    RE_LINE_START_ORDERED.replace_all(&s, "$1").into_owned()
}

//! Line classification and marker normalisation.
//!
//! Every line outside a fenced code block is split into a *marker* (bullet,
//! task box, list number, `>`, `#`s) and its *content*. Input indentation is
//! always dropped. Every ordered-list notation seen in the wild (`1.`, `1)`,
//! `1、`, `一、`, `(1)`, `（一）`) is rewritten to the one canonical `N. ` form,
//! so later stages recognise a list item with a single pattern.

use crate::pipeline::numeral::chinese_to_arabic;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading indentation: space, tab, NBSP and ideographic space.
pub const INDENT_CHARS: &[char] = &[' ', '\t', '\u{00A0}', '\u{3000}'];

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•・]\s*").unwrap());
static RE_TASK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+\[[ xX]\]\s+").unwrap());
static RE_ARABIC_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)[.、)]\s*").unwrap());
static RE_CHINESE_ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([一二三四五六七八九十]+)、\s*").unwrap());
static RE_PAREN_ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[（(]([一二三四五六七八九十]+|[0-9]+)[)）]\s*").unwrap());
static RE_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+").unwrap());
static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s*").unwrap());
static RE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s+").unwrap());

// Kinds of an already-normalised line, as the reflow engine and HTML
// projector see it.
static RE_IS_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+[.)]\s").unwrap());
static RE_IS_TASK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+\[[ xX]\]\s").unwrap());
static RE_IS_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s").unwrap());
static RE_IS_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+\s").unwrap());

/// Structural kind of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    OrderedList,
    UnorderedList,
    Task,
    Blockquote,
    Header,
    CodeFence,
    Plain,
    Empty,
}

impl LineKind {
    /// Kind of a line that has already been through marker normalisation.
    pub fn of(line: &str) -> Self {
        if line.trim().is_empty() {
            LineKind::Empty
        } else if is_fence(line) {
            LineKind::CodeFence
        } else if RE_IS_ORDERED.is_match(line) {
            LineKind::OrderedList
        } else if RE_IS_TASK.is_match(line) {
            LineKind::Task
        } else if RE_IS_UNORDERED.is_match(line) {
            LineKind::UnorderedList
        } else if line.starts_with('>') {
            LineKind::Blockquote
        } else if RE_IS_HEADER.is_match(line) {
            LineKind::Header
        } else {
            LineKind::Plain
        }
    }

    /// Ordered, unordered and task items all count as list lines.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            LineKind::OrderedList | LineKind::UnorderedList | LineKind::Task
        )
    }
}

/// A code fence line toggles code-block state; the info string is ignored.
pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// One line split into its canonical marker and the remaining content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub marker: String,
    pub content: String,
}

impl ClassifiedLine {
    fn new(kind: LineKind, marker: impl Into<String>, content: &str) -> Self {
        Self {
            kind,
            marker: marker.into(),
            content: content.to_string(),
        }
    }

    /// Reassemble the line. Indentation is never carried over from input.
    pub fn render(&self) -> String {
        format!("{}{}", self.marker, self.content)
    }
}

/// Classify one line (outside any code block) and normalise its marker.
///
/// Markers are tested in priority order and the first match wins: round
/// bullet, task box, Arabic ordered, Chinese ordered, parenthesised ordered,
/// plain unordered, blockquote, header. A Chinese numeral that does not parse
/// is treated as no numeral at all, so `一一、` stays plain text.
pub fn classify_line(line: &str) -> ClassifiedLine {
    let content = line.trim_start_matches(INDENT_CHARS);

    if content.is_empty() {
        return ClassifiedLine::new(LineKind::Empty, "", "");
    }

    if let Some(m) = RE_BULLET.find(content) {
        return ClassifiedLine::new(LineKind::UnorderedList, "- ", &content[m.end()..]);
    }

    if let Some(m) = RE_TASK.find(content) {
        return ClassifiedLine::new(LineKind::Task, m.as_str(), &content[m.end()..]);
    }

    if let Some(caps) = RE_ARABIC_ORDERED.captures(content) {
        let end = caps.get(0).map_or(0, |m| m.end());
        return ClassifiedLine::new(
            LineKind::OrderedList,
            format!("{}. ", &caps[1]),
            &content[end..],
        );
    }

    if let Some(caps) = RE_CHINESE_ORDERED.captures(content) {
        let n = chinese_to_arabic(&caps[1]);
        if n > 0 {
            let end = caps.get(0).map_or(0, |m| m.end());
            return ClassifiedLine::new(LineKind::OrderedList, format!("{n}. "), &content[end..]);
        }
    }

    if let Some(caps) = RE_PAREN_ORDERED.captures(content) {
        if let Some(n) = paren_number(&caps[1]) {
            let end = caps.get(0).map_or(0, |m| m.end());
            return ClassifiedLine::new(LineKind::OrderedList, format!("{n}. "), &content[end..]);
        }
    }

    for (re, kind) in [
        (&RE_UNORDERED, LineKind::UnorderedList),
        (&RE_BLOCKQUOTE, LineKind::Blockquote),
        (&RE_HEADER, LineKind::Header),
    ] {
        if let Some(m) = re.find(content) {
            return ClassifiedLine::new(kind, m.as_str(), &content[m.end()..]);
        }
    }

    ClassifiedLine::new(LineKind::Plain, "", content)
}

/// Number inside `(…)`/`（…）`: decimal digits or a Chinese numeral.
fn paren_number(num: &str) -> Option<String> {
    if num.bytes().all(|b| b.is_ascii_digit()) {
        // Leading zeros are dropped; absurdly long digit runs are kept verbatim.
        return Some(
            num.parse::<u64>()
                .map(|n| n.to_string())
                .unwrap_or_else(|_| num.to_string()),
        );
    }
    match chinese_to_arabic(num) {
        0 => None,
        n => Some(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1. item")]
    #[case("1) item")]
    #[case("1、item")]
    #[case("一、item")]
    #[case("(1) item")]
    #[case("（一）item")]
    #[case("（1）item")]
    fn every_ordered_notation_normalises_to_one_dot(#[case] line: &str) {
        let c = classify_line(line);
        assert_eq!(c.kind, LineKind::OrderedList);
        assert_eq!(c.marker, "1. ");
        assert_eq!(c.content, "item");
    }

    #[test]
    fn chinese_tens_and_parenthesised_zeros() {
        assert_eq!(classify_line("二十三、x").marker, "23. ");
        assert_eq!(classify_line("(007) x").marker, "7. ");
        assert_eq!(classify_line("12. x").marker, "12. ");
    }

    #[test]
    fn round_bullets_become_dash() {
        let c = classify_line("・ 項目");
        assert_eq!(c.kind, LineKind::UnorderedList);
        assert_eq!(c.render(), "- 項目");
        assert_eq!(classify_line("•item").render(), "- item");
    }

    #[test]
    fn task_marker_passes_through() {
        let c = classify_line("- [x] done");
        assert_eq!(c.kind, LineKind::Task);
        assert_eq!(c.marker, "- [x] ");
        assert_eq!(c.content, "done");
    }

    #[test]
    fn other_markers_pass_through() {
        assert_eq!(classify_line("*  star").marker, "*  ");
        assert_eq!(classify_line(">quote").marker, ">");
        assert_eq!(classify_line("## Title").marker, "## ");
        assert_eq!(classify_line("## Title").kind, LineKind::Header);
    }

    #[test]
    fn indentation_is_always_stripped() {
        assert_eq!(classify_line("   plain").render(), "plain");
        assert_eq!(classify_line("\u{3000}\u{00A0}\t- x").render(), "- x");
    }

    #[test]
    fn hashtag_without_space_is_plain() {
        let c = classify_line("#tag");
        assert_eq!(c.kind, LineKind::Plain);
        assert_eq!(c.render(), "#tag");
    }

    #[test]
    fn unparseable_chinese_numeral_is_not_a_list() {
        let c = classify_line("一一、text");
        assert_eq!(c.kind, LineKind::Plain);
        assert_eq!(c.render(), "一一、text");
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(classify_line(" \t").kind, LineKind::Empty);
        assert_eq!(classify_line(" \t").render(), "");
    }

    #[rstest]
    #[case("1. a", LineKind::OrderedList)]
    #[case("2) a", LineKind::OrderedList)]
    #[case("- a", LineKind::UnorderedList)]
    #[case("- [ ] a", LineKind::Task)]
    #[case("> a", LineKind::Blockquote)]
    #[case("# a", LineKind::Header)]
    #[case("```rust", LineKind::CodeFence)]
    #[case("   ", LineKind::Empty)]
    #[case("1.5 million", LineKind::Plain)]
    fn kind_of_normalised_line(#[case] line: &str, #[case] kind: LineKind) {
        assert_eq!(LineKind::of(line), kind);
    }
}

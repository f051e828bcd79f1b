//! Span protection: lift spans that must survive the pipeline verbatim (code,
//! links, URLs, tags, version strings) out of the text, and put them back
//! afterwards.
//!
//! Each protected span is replaced by a token `⟨open⟩index⟨close⟩` where
//! `open`/`close` are two private-use characters that do not occur anywhere
//! in the text being protected, so a token can never collide with user
//! content. A token holds only the two sentinels and decimal digits, so script
//! conversion, punctuation substitution and spacing all leave it alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Markdown link or image, allowing one level of nested parentheses in the
/// URL part: `[text](url)`, `![alt](https://x/a_(b))`.
pub static RE_MD_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[[^\]]*\]\((?:[^()]|\([^)]*\))*\)").unwrap());

/// Bare URL, stopping before `)` so a Markdown link's closing paren is not
/// swallowed.
pub static RE_BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

/// Bare URL optionally wrapped in `<…>` (Markdown autolink).
pub static RE_AUTOLINK_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<?(https?://[^\s<>)]+)>?").unwrap());

/// One protected span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub index: usize,
    pub original: String,
}

/// Ordered record of every span lifted out of a text.
#[derive(Debug, Clone)]
pub struct PlaceholderTable {
    open: char,
    close: char,
    entries: Vec<Placeholder>,
}

impl PlaceholderTable {
    /// Create an empty table whose tokens cannot collide with `text`.
    pub fn for_text(text: &str) -> Self {
        let (open, close) = pick_sentinels(text);
        Self {
            open,
            close,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Placeholder] {
        &self.entries
    }

    /// The token standing in for entry `index`.
    pub fn token(&self, index: usize) -> String {
        format!("{}{}{}", self.open, index, self.close)
    }

    /// Replace every match of `re` in `text` with a fresh token.
    pub fn protect(&mut self, text: &str, re: &Regex) -> String {
        re.replace_all(text, |caps: &Captures<'_>| {
            let index = self.entries.len();
            self.entries.push(Placeholder {
                index,
                original: caps[0].to_string(),
            });
            self.token(index)
        })
        .into_owned()
    }

    /// Put every protected span back, in index order.
    ///
    /// A span captured by a later pattern may itself contain an earlier
    /// token (e.g. inline code inside link text); such tokens only reappear
    /// once their container is restored, so passes repeat until no token is
    /// left or a pass makes no progress. A token that cannot be restored
    /// stays visible in the output.
    pub fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for _ in 0..=self.entries.len() {
            if !out.contains(self.open) {
                break;
            }
            let mut changed = false;
            for entry in &self.entries {
                let token = self.token(entry.index);
                if out.contains(&token) {
                    out = out.replacen(&token, &entry.original, 1);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        out
    }
}

/// Apply `patterns` in order, returning the redacted text and its table.
pub fn protect(text: &str, patterns: &[&Regex]) -> (String, PlaceholderTable) {
    let mut table = PlaceholderTable::for_text(text);
    let mut out = text.to_string();
    for re in patterns {
        out = table.protect(&out, re);
    }
    (out, table)
}

/// First pair of adjacent private-use characters absent from `text`.
fn pick_sentinels(text: &str) -> (char, char) {
    (0xE000u32..0xF8FF)
        .step_by(2)
        .filter_map(|cp| Some((char::from_u32(cp)?, char::from_u32(cp + 1)?)))
        .find(|(open, close)| !text.contains(*open) && !text.contains(*close))
        .unwrap_or(('\u{E000}', '\u{E001}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());

    #[test]
    fn protect_and_restore_round_trip() {
        let text = "see `a.b` and https://x.io/p and [t](u)";
        let (redacted, table) = protect(text, &[&*RE_CODE, &*RE_MD_LINK, &*RE_BARE_URL]);
        assert_eq!(table.len(), 3);
        assert!(!redacted.contains("a.b"));
        assert!(!redacted.contains("https://"));
        assert_eq!(table.restore(&redacted), text);
    }

    #[test]
    fn indices_are_monotonic_in_pattern_order() {
        let (_, table) = protect("[l](u) `c`", &[&*RE_CODE, &*RE_MD_LINK]);
        let originals: Vec<_> = table.entries().iter().map(|e| e.original.as_str()).collect();
        assert_eq!(originals, vec!["`c`", "[l](u)"]);
        assert_eq!(table.entries()[1].index, 1);
    }

    #[test]
    fn nested_token_is_fully_restored() {
        let text = "[`code`](https://x.io)";
        let (redacted, table) = protect(text, &[&*RE_CODE, &*RE_MD_LINK]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.restore(&redacted), text);
    }

    #[test]
    fn sentinels_avoid_characters_in_text() {
        let text = "\u{E000}\u{E001} literal";
        let table = PlaceholderTable::for_text(text);
        let token = table.token(0);
        assert!(!token.contains('\u{E000}'));
        assert!(!token.contains('\u{E001}'));
    }

    #[test]
    fn link_with_nested_parens_is_one_span() {
        let text = "![img](https://en.wikipedia.org/wiki/Rust_(language))";
        let m = RE_MD_LINK.find(text).unwrap();
        assert_eq!(m.as_str(), text);
    }

    #[test]
    fn bare_url_stops_before_closing_paren() {
        let m = RE_BARE_URL.find("(see https://x.io/a)").unwrap();
        assert_eq!(m.as_str(), "https://x.io/a");
    }

    #[test]
    fn unknown_token_stays_visible() {
        let table = PlaceholderTable::for_text("");
        let stray = format!("x{}y", table.token(7));
        assert_eq!(table.restore(&stray), stray);
    }
}

//! CJK spacing: insert a space wherever CJK text touches Latin letters,
//! digits, or certain symbols ("當你凝視著bug" → "當你凝視著 bug").
//!
//! The rules follow the widely used *pangu* convention and run in a fixed
//! order. Each rule is a single regex replacement over the whole string; text
//! with no CJK character at all is returned unchanged. Spacing is idempotent:
//! a second pass finds every boundary already spaced.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// CJK ranges: radicals, kana, bopomofo, enclosed CJK, unified ideographs
/// (incl. extension A) and compatibility ideographs. U+30FB (・) is left out
/// on purpose: it is punctuation, not a letter.
const CJK: &str = r"\x{2e80}-\x{2eff}\x{2f00}-\x{2fdf}\x{3040}-\x{309f}\x{30a0}-\x{30fa}\x{30fc}-\x{30ff}\x{3100}-\x{312f}\x{3200}-\x{32ff}\x{3400}-\x{4dbf}\x{4e00}-\x{9fff}\x{f900}-\x{faff}";

/// Characters that get a space when they directly follow CJK.
const ANS_AFTER_CJK: &str = r"A-Za-z\x{0370}-\x{03ff}0-9@\$%\^\&\*\-\+\\=\|/\x{00a1}-\x{00ff}\x{2150}-\x{218f}\x{2700}-\x{27bf}";

/// Characters that get a space when CJK directly follows them.
const ANS_BEFORE_CJK: &str = r"A-Za-z\x{0370}-\x{03ff}0-9\~\$%\^\&\*\-\+\\=\|/!;:,\.\?\x{00a1}-\x{00ff}\x{2150}-\x{218f}\x{2700}-\x{27bf}";

fn cjk_regex(pattern: &str) -> Regex {
    let pattern = pattern
        .replace("ANS_AFTER", ANS_AFTER_CJK)
        .replace("ANS_BEFORE", ANS_BEFORE_CJK)
        .replace("CJK", CJK);
    Regex::new(&pattern).unwrap()
}

static RE_ANY_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"[CJK]"));

// ── Half-width symbols squeezed between CJK ──────────────────────────────────

static RE_SYMBOLS_BETWEEN_CJK: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"([CJK])( *(?::+|\.) *)([CJK])"));
static RE_SYMBOLS_AFTER_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK]) *([\~!;,\?]+) *"));

// ── Dots, colons, quotes ─────────────────────────────────────────────────────

static RE_DOTS_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"(\.{2,}|\x{2026})([CJK])"));
static RE_CJK_COLON_ANS: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK]):([A-Z0-9\(\)])"));
static RE_CJK_QUOTE: Lazy<Regex> = Lazy::new(|| cjk_regex(r#"([CJK])([`"\x{05f4}])"#));
static RE_QUOTE_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r#"([`"\x{05f4}])([CJK])"#));
static RE_QUOTE_ANY_QUOTE: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r#"([`"\x{05f4}]+) *(.+?) *([`"\x{05f4}]+)"#));
static RE_CJK_SINGLE_QUOTE: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK])('[^s])"));
static RE_SINGLE_QUOTE_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"(')([CJK])"));
static RE_POSSESSIVE: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([A-Za-z0-9CJK])( )('s)"));

// ── Hashtags and operators ───────────────────────────────────────────────────

static RE_HASH_CJK_HASH: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK])(#)([CJK]+)(#)([CJK])"));
static RE_CJK_HASH: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK])(#([^ ]))"));
static RE_HASH_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"(([^ ])#)([CJK])"));
static RE_CJK_OPERATOR_AN: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"([CJK])([\+\-\*/=\&\|<>])([A-Za-z0-9])"));
static RE_AN_OPERATOR_CJK: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"([A-Za-z0-9])([\+\-\*/=\&\|<>])([CJK])"));
static RE_SLASH_SPACE: Lazy<Regex> = Lazy::new(|| cjk_regex(r"(/) ([a-z\-_\./]+)"));
static RE_SLASH_SPACE_SLASH: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([/\.])([A-Za-z\-_\./]+) (/)"));

// ── Brackets ─────────────────────────────────────────────────────────────────

static RE_CJK_LEFT_BRACKET: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK])([\(\[\{<>\x{201c}])"));
static RE_RIGHT_BRACKET_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([\)\]\}<>\x{201d}])([CJK])"));
static RE_BRACKET_INNER: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"([\(\[\{<\x{201c}]+) *(.+?) *([\)\]\}>\x{201d}]+)"));
static RE_AN_CURLY_QUOTED: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"([A-Za-z0-9CJK]) *(\x{201c})([A-Za-z0-9CJK\-_ ]+)(\x{201d})"));
static RE_CURLY_QUOTED_AN: Lazy<Regex> =
    Lazy::new(|| cjk_regex(r"(\x{201c})([A-Za-z0-9CJK\-_ ]+)(\x{201d}) *([A-Za-z0-9CJK])"));
static RE_AN_LEFT_BRACKET: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([A-Za-z0-9])([\(\[\{])"));
static RE_RIGHT_BRACKET_AN: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([\)\]\}])([A-Za-z0-9])"));

// ── The main boundary rules ──────────────────────────────────────────────────

static RE_CJK_ANS: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([CJK])([ANS_AFTER])"));
static RE_ANS_CJK: Lazy<Regex> = Lazy::new(|| cjk_regex(r"([ANS_BEFORE])([CJK])"));
static RE_PERCENT_LETTER: Lazy<Regex> = Lazy::new(|| cjk_regex(r"(%)([A-Za-z])"));
static RE_MIDDLE_DOT: Lazy<Regex> = Lazy::new(|| cjk_regex(r" *([\x{00b7}\x{2022}\x{2027}]) *"));

fn to_fullwidth(symbols: &str) -> String {
    symbols
        .chars()
        .filter_map(|c| match c {
            ' ' => None,
            '~' => Some('～'),
            '!' => Some('！'),
            ';' => Some('；'),
            ':' => Some('：'),
            ',' => Some('，'),
            '.' => Some('。'),
            '?' => Some('？'),
            other => Some(other),
        })
        .collect()
}

/// Insert spaces between CJK and half-width runs.
pub fn spacing_text(text: &str) -> String {
    if text.chars().nth(1).is_none() || !RE_ANY_CJK.is_match(text) {
        return text.to_string();
    }

    let s = RE_SYMBOLS_BETWEEN_CJK.replace_all(text, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], to_fullwidth(&caps[2]), &caps[3])
    });
    let s = RE_SYMBOLS_AFTER_CJK.replace_all(&s, |caps: &Captures<'_>| {
        format!("{}{}", &caps[1], to_fullwidth(&caps[2]))
    });

    let s = RE_DOTS_CJK.replace_all(&s, "$1 $2");
    let s = RE_CJK_COLON_ANS.replace_all(&s, "${1}：$2");

    let s = RE_CJK_QUOTE.replace_all(&s, "$1 $2");
    let s = RE_QUOTE_CJK.replace_all(&s, "$1 $2");
    let s = RE_QUOTE_ANY_QUOTE.replace_all(&s, "$1$2$3");
    let s = RE_CJK_SINGLE_QUOTE.replace_all(&s, "$1 $2");
    let s = RE_SINGLE_QUOTE_CJK.replace_all(&s, "$1 $2");
    let s = RE_POSSESSIVE.replace_all(&s, "$1$3");

    let s = RE_HASH_CJK_HASH.replace_all(&s, "$1 $2$3$4 $5");
    let s = RE_CJK_HASH.replace_all(&s, "$1 $2");
    let s = RE_HASH_CJK.replace_all(&s, "$1 $3");

    let s = RE_CJK_OPERATOR_AN.replace_all(&s, "$1 $2 $3");
    let s = RE_AN_OPERATOR_CJK.replace_all(&s, "$1 $2 $3");
    let s = RE_SLASH_SPACE.replace_all(&s, "$1$2");
    let s = RE_SLASH_SPACE_SLASH.replace_all(&s, "$1$2$3");

    let s = RE_CJK_LEFT_BRACKET.replace_all(&s, "$1 $2");
    let s = RE_RIGHT_BRACKET_CJK.replace_all(&s, "$1 $2");
    let s = RE_BRACKET_INNER.replace(&s, "$1$2$3");
    let s = RE_AN_CURLY_QUOTED.replace_all(&s, "$1 $2$3$4");
    let s = RE_CURLY_QUOTED_AN.replace_all(&s, "$1$2$3 $4");
    let s = RE_AN_LEFT_BRACKET.replace_all(&s, "$1 $2");
    let s = RE_RIGHT_BRACKET_AN.replace_all(&s, "$1 $2");

    let s = RE_CJK_ANS.replace_all(&s, "$1 $2");
    let s = RE_ANS_CJK.replace_all(&s, "$1 $2");
    let s = RE_PERCENT_LETTER.replace_all(&s, "$1 $2");
    let s = RE_MIDDLE_DOT.replace_all(&s, "・");

    s.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("當你凝視著bug，bug也凝視著你", "當你凝視著 bug，bug 也凝視著你")]
    #[case("中文abc", "中文 abc")]
    #[case("abc中文", "abc 中文")]
    #[case("中文123中文", "中文 123 中文")]
    #[case("中a中a", "中 a 中 a")]
    #[case("測試，測試。測試", "測試，測試。測試")]
    fn spaces_cjk_boundaries(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(spacing_text(input), expected);
    }

    #[test]
    fn text_without_cjk_is_untouched() {
        let s = "print(x) and foo.bar";
        assert_eq!(spacing_text(s), s);
    }

    #[test]
    fn single_char_is_untouched() {
        assert_eq!(spacing_text("中"), "中");
    }

    #[test]
    fn halfwidth_symbols_between_cjk_become_fullwidth() {
        assert_eq!(spacing_text("中文:中文"), "中文：中文");
        assert_eq!(spacing_text("好!"), "好！");
    }

    #[test]
    fn spacing_is_idempotent() {
        let once = spacing_text("用Rust寫CLI工具v2版");
        assert_eq!(spacing_text(&once), once);
    }

    #[test]
    fn private_use_sentinels_get_no_space() {
        let s = "看\u{E000}0\u{E001}看";
        assert_eq!(spacing_text(s), s);
    }
}

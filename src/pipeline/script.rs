//! Script conversion: Simplified → Traditional Chinese.
//!
//! A thin wrapper over [`zhconv`], which ships the OpenCC and MediaWiki
//! conversion tables compiled into the binary. The converter is treated as a
//! pure `&str → String` function; text without Chinese characters passes
//! through untouched.

use crate::config::ScriptTarget;
use zhconv::{zhconv, Variant};

/// Convert `text` to the configured Chinese script variant.
pub fn convert_script(text: &str, target: ScriptTarget) -> String {
    let variant = match target {
        ScriptTarget::Keep => return text.to_string(),
        ScriptTarget::Taiwan => Variant::ZhTW,
        ScriptTarget::Traditional => Variant::ZhHant,
        ScriptTarget::HongKong => Variant::ZhHK,
    };
    if !text.chars().any(is_han) {
        return text.to_string();
    }
    zhconv(text, variant)
}

fn is_han(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplified_becomes_traditional() {
        assert_eq!(convert_script("测试", ScriptTarget::Taiwan), "測試");
    }

    #[test]
    fn traditional_is_stable() {
        assert_eq!(convert_script("測試", ScriptTarget::Taiwan), "測試");
    }

    #[test]
    fn keep_leaves_text_alone() {
        assert_eq!(convert_script("测试", ScriptTarget::Keep), "测试");
    }

    #[test]
    fn non_han_text_passes_through() {
        let s = "v1.2.3, hello (world)";
        assert_eq!(convert_script(s, ScriptTarget::Taiwan), s);
    }

    #[test]
    fn private_use_sentinels_survive() {
        let s = "测试\u{E000}0\u{E001}测试";
        assert_eq!(convert_script(s, ScriptTarget::Taiwan), "測試\u{E000}0\u{E001}測試");
    }
}

//! Chinese numeral → integer for ordered-list markers (一、, （十二）, …).
//!
//! Only the vocabulary list markers actually use is supported: 1–99 written
//! with 一 … 九 and 十. Anything else yields `0`, which callers treat as
//! "numeral absent" rather than an error.

fn digit(s: &str) -> Option<u32> {
    match s {
        "一" => Some(1),
        "二" => Some(2),
        "三" => Some(3),
        "四" => Some(4),
        "五" => Some(5),
        "六" => Some(6),
        "七" => Some(7),
        "八" => Some(8),
        "九" => Some(9),
        _ => None,
    }
}

/// Convert a Chinese numeral in 1–99 to its value, or `0` when unparseable.
///
/// Rules are checked in order: single digit, `十`, `十` + digit, digit + `十`,
/// digit + `十` + digit. An unknown part inside an otherwise well-shaped
/// numeral contributes `0` (so `十x` is `10`).
pub fn chinese_to_arabic(chinese: &str) -> u32 {
    if let Some(d) = digit(chinese) {
        return d;
    }

    if chinese == "十" {
        return 10;
    }

    // 十一 … 十九
    if let Some(unit) = chinese.strip_prefix('十') {
        return 10 + digit(unit).unwrap_or(0);
    }

    // 二十 … 九十
    if let Some(tens) = chinese.strip_suffix('十') {
        return digit(tens).unwrap_or(0) * 10;
    }

    // 二十一 … 九十九
    if let Some((tens, unit)) = chinese.split_once('十') {
        if !tens.is_empty() {
            return digit(tens).unwrap_or(0) * 10 + digit(unit).unwrap_or(0);
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("一", 1)]
    #[case("九", 9)]
    #[case("十", 10)]
    #[case("十一", 11)]
    #[case("十九", 19)]
    #[case("二十", 20)]
    #[case("二十三", 23)]
    #[case("九十九", 99)]
    fn converts_supported_range(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(chinese_to_arabic(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("百")]
    #[case("零")]
    #[case("abc")]
    fn unparseable_is_zero(#[case] input: &str) {
        assert_eq!(chinese_to_arabic(input), 0);
    }

    #[test]
    fn unknown_part_contributes_zero() {
        assert_eq!(chinese_to_arabic("十百"), 10);
        assert_eq!(chinese_to_arabic("百十"), 0);
    }
}

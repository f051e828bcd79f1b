//! HTML projection of formatted text.
//!
//! Rich-text editors only recognise a pasted list as a real list when an HTML
//! flavour travels alongside the plain text. [`markdown_to_html`] builds that
//! flavour from the formatted Markdown; [`transform_anchor_text`] instead
//! keeps an incoming HTML fragment and only reformats the text of its links.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.*)$").unwrap());
static RE_UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static RE_HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s+(.*)$").unwrap());
static RE_QUOTE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s*(.*)$").unwrap());
static RE_INDENTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{3,}(.*)$").unwrap());

static RE_HAS_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[0-9]+\.|[-*+])\s+").unwrap());

static RE_ANCHOR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a\s").unwrap());
static RE_ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a\s+([^>]*)>(.*?)</a>").unwrap());
static RE_ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

const HTML_PREFIX: &str = r#"<meta charset="utf-8">"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenList {
    None,
    Ordered,
    Unordered,
}

impl OpenList {
    fn close(&mut self, html: &mut String) {
        match self {
            OpenList::Ordered => html.push_str("</ol>"),
            OpenList::Unordered => html.push_str("</ul>"),
            OpenList::None => {}
        }
        *self = OpenList::None;
    }

    fn open(&mut self, want: OpenList, html: &mut String) {
        if *self == want {
            return;
        }
        self.close(html);
        match want {
            OpenList::Ordered => html.push_str("<ol>"),
            OpenList::Unordered => html.push_str("<ul>"),
            OpenList::None => {}
        }
        *self = want;
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Whether an HTML fragment contains at least one link.
pub fn has_anchor(html: &str) -> bool {
    RE_ANCHOR_OPEN.is_match(html)
}

/// Whether any line looks like an ordered (`N.`) or unordered list item.
pub fn has_list_items(text: &str) -> bool {
    RE_HAS_LIST.is_match(text)
}

/// Render formatted Markdown as a flat HTML fragment.
///
/// Lines indented three or more spaces under an open list become further
/// `<li>` entries of that list rather than nested content.
pub fn markdown_to_html(text: &str) -> String {
    let mut html = String::from(HTML_PREFIX);
    let mut list = OpenList::None;

    for line in text.split('\n') {
        if let Some(caps) = RE_ORDERED_ITEM.captures(line) {
            list.open(OpenList::Ordered, &mut html);
            html.push_str(&format!("<li>{}</li>", escape(&caps[1])));
        } else if let Some(caps) = RE_UNORDERED_ITEM.captures(line) {
            list.open(OpenList::Unordered, &mut html);
            html.push_str(&format!("<li>{}</li>", escape(&caps[1])));
        } else if let Some(caps) = RE_HEADER_LINE.captures(line) {
            list.close(&mut html);
            let level = caps[1].len().min(6);
            html.push_str(&format!("<h{level}>{}</h{level}>", escape(&caps[2])));
        } else if let Some(caps) = RE_QUOTE_LINE.captures(line) {
            list.close(&mut html);
            html.push_str(&format!("<blockquote>{}</blockquote>", escape(&caps[1])));
        } else if line.trim().is_empty() {
            list.close(&mut html);
        } else if let Some(caps) = RE_INDENTED
            .captures(line)
            .filter(|_| list != OpenList::None)
        {
            html.push_str(&format!("<li>{}</li>", escape(&caps[1])));
        } else {
            list.close(&mut html);
            html.push_str(&format!("<p>{}</p>", escape(line)));
        }
    }

    list.close(&mut html);
    html
}

/// Rewrite the text of every `<a …>…</a>` in `html` through `transform`.
///
/// Tags nested inside the anchor are dropped; attributes and everything
/// outside anchors are kept verbatim.
pub fn transform_anchor_text<F>(html: &str, transform: F) -> String
where
    F: Fn(&str) -> String,
{
    RE_ANCHOR
        .replace_all(html, |caps: &Captures<'_>| {
            let inner = RE_ANY_TAG.replace_all(&caps[2], "");
            format!("<a {}>{}</a>", &caps[1], transform(&inner))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_open_and_close_on_transitions() {
        let html = markdown_to_html("1. a\n2. b\n- c\n\n段落");
        assert_eq!(
            html,
            r#"<meta charset="utf-8"><ol><li>a</li><li>b</li></ol><ul><li>c</li></ul><p>段落</p>"#
        );
    }

    #[test]
    fn headers_and_quotes() {
        let html = markdown_to_html("# 標題\n> 引用\n######## deep");
        assert_eq!(
            html,
            r#"<meta charset="utf-8"><h1>標題</h1><blockquote>引用</blockquote><h6>deep</h6>"#
        );
    }

    #[test]
    fn indented_continuation_becomes_list_item() {
        let html = markdown_to_html("1. 第一\n   說明\n2. 第二");
        assert_eq!(
            html,
            r#"<meta charset="utf-8"><ol><li>第一</li><li>說明</li><li>第二</li></ol>"#
        );
    }

    #[test]
    fn indented_line_without_list_is_a_paragraph() {
        assert_eq!(markdown_to_html("   x"), r#"<meta charset="utf-8"><p>   x</p>"#);
    }

    #[test]
    fn content_is_escaped() {
        let html = markdown_to_html(r#"- a < b & "c""#);
        assert!(html.contains("<li>a &lt; b &amp; "));
        assert!(!html.contains(r#""c""#));
        let html = markdown_to_html("it's");
        assert!(!html.contains('\''));
    }

    #[test]
    fn apostrophe_uses_hex_entity() {
        assert_eq!(
            markdown_to_html("it's"),
            r#"<meta charset="utf-8"><p>it&#x27;s</p>"#
        );
    }

    #[test]
    fn list_detection() {
        assert!(has_list_items("intro\n1. a"));
        assert!(has_list_items("  - a"));
        assert!(!has_list_items("1.5 million\n-dash"));
    }

    #[test]
    fn anchor_text_is_transformed_and_attributes_kept() {
        let html = r#"<p>x <A HREF="https://x.io" class=l><b>link</b></A> y</p>"#;
        let out = transform_anchor_text(html, |t| t.to_uppercase());
        assert_eq!(out, r#"<p>x <a HREF="https://x.io" class=l>LINK</a> y</p>"#);
    }

    #[test]
    fn anchor_detection() {
        assert!(has_anchor(r#"<p><A href="x">y</A></p>"#));
        assert!(!has_anchor("<abbr>x</abbr><p>a</p>"));
    }

    #[test]
    fn html_without_anchors_is_unchanged() {
        let html = "<p>plain</p>";
        assert_eq!(transform_anchor_text(html, |t| t.to_uppercase()), html);
    }
}

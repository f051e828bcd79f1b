//! Paragraph reflow: blank-line normalisation and continuation indentation.
//!
//! A single left-to-right pass over marker-normalised lines. Two pieces of
//! state live only for the duration of one call:
//!
//! - **list context**: opened by an ordered item, closed by a blockquote or
//!   header. While open, every other non-blank line is indented as a
//!   continuation of the item.
//! - **code-block state**: toggled by fences; fenced lines pass through.
//!
//! Blank lines between two adjacent non-blank lines are decided by the first
//! matching rule:
//!
//! | current → next                  | result      |
//! |---------------------------------|-------------|
//! | list → list                     | none        |
//! | blockquote → blockquote         | none        |
//! | list → anything but blockquote  | none        |
//! | header → anything               | one blank   |
//! | plain → plain                   | one blank   |

use crate::pipeline::classify::LineKind;
use tracing::debug;

/// Reflow normalised lines, indenting continuations by `indent` spaces.
pub fn reflow(text: &str, indent: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let continuation = " ".repeat(indent);
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut in_list = false;
    let mut in_code_block = false;
    let mut blanks_added = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let kind = LineKind::of(line);

        if kind == LineKind::CodeFence {
            in_code_block = !in_code_block;
            out.push(line.to_string());
            continue;
        }
        if in_code_block {
            out.push(line.to_string());
            continue;
        }

        let indented = in_list
            && !matches!(
                kind,
                LineKind::Empty | LineKind::Blockquote | LineKind::Header | LineKind::OrderedList
            );
        if indented {
            out.push(format!("{continuation}{line}"));
        } else {
            out.push(line.to_string());
        }

        match kind {
            LineKind::OrderedList => in_list = true,
            LineKind::Blockquote | LineKind::Header => in_list = false,
            _ => {}
        }

        let Some(next) = lines.get(i + 1) else {
            continue;
        };
        if needs_blank_line(kind, LineKind::of(next)) {
            out.push(String::new());
            blanks_added += 1;
        }
    }

    debug!(lines = out.len(), blanks_added, "reflowed paragraphs");
    out.join("\n")
}

/// Whether a blank line goes between two adjacent lines of these kinds.
fn needs_blank_line(current: LineKind, next: LineKind) -> bool {
    use LineKind::*;

    if matches!(current, Empty | CodeFence) || matches!(next, Empty | CodeFence) {
        return false;
    }
    if current.is_list() && next.is_list() {
        return false;
    }
    if current == Blockquote && next == Blockquote {
        return false;
    }
    if current.is_list() && next != Blockquote {
        return false;
    }
    if current == Header {
        return true;
    }
    !current.is_list() && !next.is_list() && current != Blockquote && next != Blockquote
}

//! Output types for a formatted clipboard selection.

use serde::{Deserialize, Serialize};

/// Which flavours a formatted selection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Plain text only.
    PlainText,
    /// The incoming HTML with its link text reformatted.
    AnchorHtml,
    /// HTML synthesised from the formatted text because it contains a list.
    ListHtml,
}

/// The result of formatting one selection: always the plain text, plus an
/// HTML flavour when the paste target should receive rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardPayload {
    /// Formatted plain text.
    pub text: String,

    /// HTML flavour, present for [`PayloadKind::AnchorHtml`] and
    /// [`PayloadKind::ListHtml`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    pub kind: PayloadKind,
}

impl ClipboardPayload {
    /// The HTML flavour if present, else the plain text.
    pub fn preferred(&self) -> &str {
        self.html.as_deref().unwrap_or(&self.text)
    }
}

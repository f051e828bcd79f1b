//! Pipeline stages for reformatting pasted text.
//!
//! Each submodule implements one transformation step as a pure
//! `&str -> String` function, so every stage is testable on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ preprocess ──▶ classify + content ──▶ reflow ──▶ source ──▶ html
//! (file/    (line breaks,   (markers, script,      (blank     (URL       (optional
//!  stdin)    bullets)        punctuation, spacing)  lines)     footer)    flavour)
//! ```
//!
//! 1. [`input`]      read the text from a file or stdin
//! 2. [`preprocess`] document-level repair so each marker starts a line
//! 3. [`classify`]   split each line into marker and content, normalising
//!    ordered-list notations to `N. `
//! 4. [`content`]    transform content: [`protect`] spans, [`script`]
//!    conversion, full-width punctuation, [`spacing`]
//! 5. [`reflow`]     blank lines and continuation indentation
//! 6. [`source`]     move a trailing URL into a `source:` footer
//! 7. [`html`]       HTML flavour for rich-text paste targets
//!
//! [`numeral`] backs the Chinese ordered-list markers in [`classify`].

pub mod classify;
pub mod content;
pub mod html;
pub mod input;
pub mod numeral;
pub mod preprocess;
pub mod protect;
pub mod reflow;
pub mod script;
pub mod source;
pub mod spacing;

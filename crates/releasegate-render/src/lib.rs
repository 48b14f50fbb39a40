//! Rendering for human surfaces (terminal text, Markdown for PR comments and job summaries).
//!
//! Renderers are pure: the same report always renders to the same bytes.

#![forbid(unsafe_code)]

mod markdown;
mod text;

pub use markdown::render_markdown;
pub use text::{TextOptions, render_text};

#[cfg(test)]
mod test_support;

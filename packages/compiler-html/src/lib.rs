//! # CloudPage HTML generator
//!
//! Lowers a [`CloudPage`](cloudpage_model::CloudPage) snapshot into a single
//! HTML document with embedded template-language and server-script blocks.
//!
//! ```rust,ignore
//! use cloudpage_compiler_html::{generate_document, GenerateOptions};
//!
//! let html = generate_document(&page, &GenerateOptions::published("https://studio.example.com"));
//! ```
//!
//! Generation is a pure function of its inputs and never fails. Invalid
//! props degrade to fallback markup and a `tracing` warning.

pub mod client_script;
pub mod components;
pub mod compose;
pub mod context;
pub mod cookie_banner;
pub mod dates;
pub mod document;
pub mod markup;
pub mod tracking;

pub use client_script::CLIENT_SCRIPT;
pub use components::render_component;
pub use compose::{Composer, MAX_DEPTH};
pub use context::{GenerateOptions, RenderContext};
pub use document::generate_document;
pub use markup::{Element, Node};
pub use tracking::{tracking_snippets, TrackingSnippets};

#[cfg(test)]
mod tests;

#![deny(missing_docs)]
//! mermaid-lite core: Markdown to HTML plumbing and the mermaid fence rewrite.

/// Processor configuration.
pub mod config;
/// Core error types.
pub mod error;
/// HTML syntax tree (hast) types.
pub mod hast;
/// Mermaid code block rewriting.
pub mod mermaid;
/// Markdown parsing utilities.
pub mod parse;
/// Transform pipeline from Markdown source to HTML.
pub mod pipeline;
/// mdast to hast conversion.
pub mod to_hast;
/// hast to HTML serialization.
pub mod to_html;

pub use config::{Options, markdown_to_html};
pub use error::{ProcessError, SourceLocation};
pub use mermaid::{MERMAID_LANGUAGE, MermaidTransform, rehype_mermaid_lite};
pub use parse::{ParseOptions, parse_mdast, parse_mdast_with_options};
pub use pipeline::{AstTransform, HastTransform, Processor, TextTransform};
pub use to_hast::{ToHastOptions, mdast_to_hast};
pub use to_html::to_html;

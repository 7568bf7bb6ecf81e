//! Processor configuration.

use crate::mermaid::{MERMAID_LANGUAGE, MermaidTransform};
use crate::parse::ParseOptions;
use crate::pipeline::Processor;
use crate::to_hast::ToHastOptions;
use crate::ProcessError;
use serde::{Deserialize, Serialize};

/// Options for building a [`Processor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Enable GitHub Flavored Markdown constructs.
    #[serde(default = "default_true")]
    pub gfm: bool,
    /// Enable YAML frontmatter parsing (the frontmatter itself is not rendered).
    #[serde(default = "default_true")]
    pub frontmatter: bool,
    /// Parse raw HTML and pass it through to the output.
    #[serde(default, alias = "allowRawHtml")]
    pub allow_raw_html: bool,
    /// Enable math syntax ($inline$ and $$block$$).
    #[serde(default)]
    pub math: bool,
    /// Whether to register the mermaid rewrite.
    #[serde(default = "default_true")]
    pub mermaid: bool,
    /// Language tag rewritten by the mermaid transform.
    #[serde(default = "default_mermaid_language", alias = "mermaidLanguage")]
    pub mermaid_language: String,
}

fn default_true() -> bool {
    true
}

fn default_mermaid_language() -> String {
    MERMAID_LANGUAGE.to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
            allow_raw_html: false,
            math: false,
            mermaid: true,
            mermaid_language: default_mermaid_language(),
        }
    }
}

impl Options {
    /// Parser options derived from these settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            gfm: self.gfm,
            frontmatter: self.frontmatter,
            raw_html: self.allow_raw_html,
            math: self.math,
        }
    }

    /// The configured mermaid transform, if enabled.
    pub fn mermaid_transform(&self) -> Option<MermaidTransform> {
        self.mermaid
            .then(|| MermaidTransform::new(self.mermaid_language.as_str()))
    }
}

impl Processor {
    /// Build a processor from [`Options`].
    pub fn from_options(options: &Options) -> Self {
        let mut processor = Processor::new(options.parse_options().to_markdown())
            .with_to_hast_options(ToHastOptions {
                allow_dangerous_html: options.allow_raw_html,
            });
        if let Some(transform) = options.mermaid_transform() {
            processor.add_hast_transform(transform);
        }
        processor
    }
}

/// Renders markdown to HTML with the configured pipeline.
pub fn markdown_to_html(input: &str, options: &Options) -> Result<String, ProcessError> {
    Processor::from_options(options).process(input)
}

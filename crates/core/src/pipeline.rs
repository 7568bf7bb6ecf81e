//! Markdown to HTML processing pipeline with transform hooks.
//!
//! Stages run in a fixed order: text transforms, parse, mdast transforms, mdast to
//! hast conversion, hast transforms, serialization. Transforms within a stage run in
//! registration order.

use crate::hast;
use crate::to_hast::{ToHastOptions, mdast_to_hast};
use crate::to_html::to_html;
use crate::{ProcessError, parse::parse_mdast_with_options};
use markdown::mdast;
use std::borrow::Cow;

/// Trait for preprocessing raw markdown text before parsing.
pub trait TextTransform {
    /// Transform the input markdown text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Trait for mutating the parsed MDAST after parsing.
pub trait AstTransform {
    /// Mutate the parsed markdown AST in place.
    fn transform(&self, root: &mut mdast::Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut mdast::Node),
{
    fn transform(&self, root: &mut mdast::Node) {
        (self)(root)
    }
}

/// Trait for mutating the HTML syntax tree before serialization.
pub trait HastTransform {
    /// Mutate the hast tree in place.
    fn transform(&self, root: &mut hast::Node);
}

impl<F> HastTransform for F
where
    F: Fn(&mut hast::Node),
{
    fn transform(&self, root: &mut hast::Node) {
        (self)(root)
    }
}

/// Configurable Markdown to HTML pipeline.
pub struct Processor {
    options: markdown::ParseOptions,
    to_hast: ToHastOptions,
    text_transforms: Vec<Box<dyn TextTransform + Send + Sync>>,
    ast_transforms: Vec<Box<dyn AstTransform + Send + Sync>>,
    hast_transforms: Vec<Box<dyn HastTransform + Send + Sync>>,
}

impl Processor {
    /// Create a new pipeline from markdown-rs parse options.
    pub fn new(options: markdown::ParseOptions) -> Self {
        Self {
            options,
            to_hast: ToHastOptions::default(),
            text_transforms: Vec::new(),
            ast_transforms: Vec::new(),
            hast_transforms: Vec::new(),
        }
    }

    /// Set the mdast to hast conversion options.
    pub fn with_to_hast_options(mut self, options: ToHastOptions) -> Self {
        self.to_hast = options;
        self
    }

    /// Add a text preprocessor transform.
    pub fn add_text_transform<T: TextTransform + Send + Sync + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Add an mdast transform.
    pub fn add_ast_transform<T: AstTransform + Send + Sync + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Add a hast transform, run after mdast to hast conversion.
    pub fn add_hast_transform<T: HastTransform + Send + Sync + 'static>(&mut self, transform: T) {
        self.hast_transforms.push(Box::new(transform));
    }

    /// Builder-style variant of [`Processor::add_hast_transform`].
    pub fn with_hast_transform<T: HastTransform + Send + Sync + 'static>(
        mut self,
        transform: T,
    ) -> Self {
        self.add_hast_transform(transform);
        self
    }

    /// Parse markdown and run the text and mdast stages.
    pub fn parse(&self, input: &str) -> Result<mdast::Node, ProcessError> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref());
            current = Cow::Owned(next.into_owned());
        }

        let mut root = parse_mdast_with_options(&current, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }
        log::trace!(
            "parsed markdown ({} bytes), applied {} mdast transforms",
            current.len(),
            self.ast_transforms.len()
        );

        Ok(root)
    }

    /// Run the pipeline up to, but not including, serialization.
    pub fn run(&self, input: &str) -> Result<hast::Node, ProcessError> {
        let mdast = self.parse(input)?;
        let mut tree = mdast_to_hast(&mdast, &self.to_hast);
        for transform in &self.hast_transforms {
            transform.transform(&mut tree);
        }
        log::trace!("applied {} hast transforms", self.hast_transforms.len());
        Ok(tree)
    }

    /// Process markdown into an HTML string.
    pub fn process(&self, input: &str) -> Result<String, ProcessError> {
        let tree = self.run(input)?;
        Ok(to_html(&tree))
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(crate::ParseOptions::default().to_markdown())
    }
}

//! Mermaid code block rewriting.
//!
//! Fenced code is represented in hast as `pre > code.language-<tag>`. Blocks tagged
//! `mermaid` are collapsed into `<pre class="mermaid">` holding the diagram source as
//! plain text, which is the markup mermaid.js looks for in the browser. Every other
//! node is left alone.
//!
//! Node types the tree model does not know (MDX JSX elements and the like) are kept
//! as JSON; their `children` arrays are still searched, and only the children that
//! change are re-encoded.

use crate::hast::{Element, Node};
use crate::pipeline::HastTransform;

/// Language tag that marks a fenced block as a mermaid diagram.
pub const MERMAID_LANGUAGE: &str = "mermaid";

/// Rewrites mermaid code blocks in place using the default language tag.
pub fn rehype_mermaid_lite(tree: &mut Node) {
    MermaidTransform::default().apply(tree);
}

/// Hast transform that rewrites fenced blocks of one language into marker `pre`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidTransform {
    language: String,
    language_class: String,
}

impl MermaidTransform {
    /// Creates a transform matching `language` instead of [`MERMAID_LANGUAGE`].
    ///
    /// The rewritten block uses `language` as its class marker.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        let language_class = format!("language-{language}");
        Self {
            language,
            language_class,
        }
    }

    /// Language tag this transform matches.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Rewrites every matching block in `tree`, including `tree` itself.
    pub fn apply(&self, tree: &mut Node) {
        self.visit_node(tree);
    }

    /// Returns whether anything at or below `node` was rewritten.
    fn visit_node(&self, node: &mut Node) -> bool {
        if let Some(content) = self.match_block(node) {
            *node = self.marker_block(content);
            return true;
        }
        match node {
            Node::Other(value) => self.visit_value(value),
            _ => node.children_mut().is_some_and(|children| {
                children
                    .iter_mut()
                    .fold(false, |changed, child| self.visit_node(child) | changed)
            }),
        }
    }

    /// Walks the `children` array of a node kept as raw JSON.
    fn visit_value(&self, value: &mut serde_json::Value) -> bool {
        let Some(children) = value
            .get_mut("children")
            .and_then(serde_json::Value::as_array_mut)
        else {
            return false;
        };
        let mut changed = false;
        for child in children.iter_mut() {
            let Ok(mut node) = serde_json::from_value::<Node>(child.clone()) else {
                changed |= self.visit_value(child);
                continue;
            };
            if let Node::Other(_) = node {
                changed |= self.visit_value(child);
            } else if self.visit_node(&mut node)
                && let Ok(encoded) = serde_json::to_value(&node)
            {
                *child = encoded;
                changed = true;
            }
        }
        changed
    }

    /// Returns the literal block content when `node` is `pre > code.language-<lang>`.
    fn match_block(&self, node: &Node) -> Option<String> {
        let Node::Element(pre) = node else {
            return None;
        };
        if pre.tag_name != "pre" {
            return None;
        }
        let [Node::Element(code)] = pre.children.as_slice() else {
            return None;
        };
        if code.tag_name != "code" || !code.has_class(&self.language_class) {
            return None;
        }
        Some(code.text_content())
    }

    fn marker_block(&self, content: String) -> Node {
        Node::Element(
            Element::new("pre", vec![Node::text(content)]).with_classes([self.language.as_str()]),
        )
    }
}

impl Default for MermaidTransform {
    fn default() -> Self {
        Self::new(MERMAID_LANGUAGE)
    }
}

impl HastTransform for MermaidTransform {
    fn transform(&self, root: &mut Node) {
        self.apply(root);
    }
}

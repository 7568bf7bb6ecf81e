//! HTML syntax tree (hast) types.
//!
//! The node shapes mirror the JSON form used by JavaScript hosts, so a tree can be
//! handed across a bindings boundary, transformed, and handed back. Node types this
//! module does not model decode to [`Node::Other`] and are re-encoded untouched.

use crate::ProcessError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Element properties keyed by hast property name (`className`, `href`, ...).
pub type Properties = BTreeMap<String, PropertyValue>;

/// Node fields outside the modelled set (`data`, host-specific keys).
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A single hast property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Unset attribute (`null`); never rendered.
    Null,
    /// Boolean attribute (`disabled`, `checked`).
    Bool(bool),
    /// Numeric attribute (`start`).
    Number(serde_json::Number),
    /// Plain string attribute.
    String(String),
    /// Space separated token list (`className`).
    List(Vec<String>),
    /// Any other JSON value, such as a list mixing numbers and strings.
    Other(serde_json::Value),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(value.into())
    }
}

/// A point in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset (0-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// Source span of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Start of the span.
    pub start: Point,
    /// End of the span.
    pub end: Point,
}

impl From<&markdown::unist::Position> for Position {
    fn from(position: &markdown::unist::Position) -> Self {
        Position {
            start: Point {
                line: position.start.line,
                column: position.start.column,
                offset: Some(position.start.offset),
            },
            end: Point {
                line: position.end.line,
                column: position.end.column,
                offset: Some(position.end.offset),
            },
        }
    }
}

/// Document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    /// Top-level nodes.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Source span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Unmodelled fields, re-emitted as-is.
    #[serde(flatten)]
    pub extra: Extra,
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Element properties.
    #[serde(default)]
    pub properties: Properties,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Source span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Unmodelled fields, re-emitted as-is.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Element {
    /// Creates an element with no properties.
    pub fn new(tag_name: impl Into<String>, children: Vec<Node>) -> Self {
        Element {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children,
            position: None,
            extra: Extra::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Builder-style `className` setter.
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = classes.into_iter().map(Into::into).collect();
        self.properties
            .insert("className".to_string(), PropertyValue::List(list));
        self
    }

    /// Returns the element's class tokens.
    ///
    /// A string `className` is split on ASCII whitespace.
    pub fn class_names(&self) -> Vec<&str> {
        match self.properties.get("className") {
            Some(PropertyValue::List(list)) => list.iter().map(String::as_str).collect(),
            Some(PropertyValue::String(value)) => value.split_ascii_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns true if `class` is one of the element's class tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_names().contains(&class)
    }

    /// Concatenated value of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut buffer = String::new();
        collect_text(&self.children, &mut buffer);
        buffer
    }
}

fn collect_text(nodes: &[Node], buffer: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => buffer.push_str(&text.value),
            Node::Element(element) => collect_text(&element.children, buffer),
            _ => {}
        }
    }
}

/// A text leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Literal text, unescaped.
    pub value: String,
    /// Source span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Unmodelled fields, re-emitted as-is.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Text {
    /// Creates a text node without position.
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            value: value.into(),
            position: None,
            extra: Extra::new(),
        }
    }
}

/// An HTML comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body.
    pub value: String,
    /// Source span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Unmodelled fields, re-emitted as-is.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Raw HTML emitted verbatim by the serializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Raw {
    /// Raw markup.
    pub value: String,
    /// Source span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Unmodelled fields, re-emitted as-is.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A hast node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document root.
    Root(Root),
    /// HTML element.
    Element(Element),
    /// Text leaf.
    Text(Text),
    /// HTML comment.
    Comment(Comment),
    /// Raw HTML.
    Raw(Raw),
    /// Any node type not modelled here, kept as its JSON form.
    Other(serde_json::Value),
}

impl Node {
    /// Creates an element node.
    pub fn element(element: Element) -> Self {
        Node::Element(element)
    }

    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    /// Creates a root node.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root {
            children,
            ..Root::default()
        })
    }

    /// Child list for parent nodes (`Root`, `Element`).
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(root) => Some(&root.children),
            Node::Element(element) => Some(&element.children),
            _ => None,
        }
    }

    /// Mutable child list for parent nodes (`Root`, `Element`).
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(root) => Some(&mut root.children),
            Node::Element(element) => Some(&mut element.children),
            _ => None,
        }
    }

    /// Decodes a tree from its hast JSON form.
    pub fn from_json(input: &str) -> Result<Self, ProcessError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Encodes the tree in its hast JSON form.
    pub fn to_json(&self) -> Result<String, ProcessError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedRef<'a> {
    Root(&'a Root),
    Element(&'a Element),
    Text(&'a Text),
    Comment(&'a Comment),
    Raw(&'a Raw),
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Root(root) => TaggedRef::Root(root).serialize(serializer),
            Node::Element(element) => TaggedRef::Element(element).serialize(serializer),
            Node::Text(text) => TaggedRef::Text(text).serialize(serializer),
            Node::Comment(comment) => TaggedRef::Comment(comment).serialize(serializer),
            Node::Raw(raw) => TaggedRef::Raw(raw).serialize(serializer),
            Node::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        if matches!(
            kind.as_deref(),
            Some("root" | "element" | "text" | "comment" | "raw")
        ) && let Some(object) = value.as_object_mut()
        {
            // The tag is re-added on serialization; keep it out of `extra`.
            object.remove("type");
        }
        let node = match kind.as_deref() {
            Some("root") => serde_json::from_value(value).map(Node::Root),
            Some("element") => serde_json::from_value(value).map(Node::Element),
            Some("text") => serde_json::from_value(value).map(Node::Text),
            Some("comment") => serde_json::from_value(value).map(Node::Comment),
            Some("raw") => serde_json::from_value(value).map(Node::Raw),
            _ => Ok(Node::Other(value)),
        };
        node.map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn class_names_from_list_and_string() {
        let listed = Element::new("code", vec![]).with_classes(["language-js", "x"]);
        assert_eq!(listed.class_names(), vec!["language-js", "x"]);

        let spaced = Element::new("code", vec![]).with_property("className", "a  b");
        assert_eq!(spaced.class_names(), vec!["a", "b"]);
        assert!(spaced.has_class("b"));
        assert!(!spaced.has_class("a b"));
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let element = Element::new(
            "code",
            vec![
                Node::text("one "),
                Node::element(Element::new("span", vec![Node::text("two")])),
            ],
        );
        assert_eq!(element.text_content(), "one two");
    }

    #[test]
    fn decodes_hast_json() {
        let tree: Node = serde_json::from_value(json!({
            "type": "root",
            "children": [{
                "type": "element",
                "tagName": "pre",
                "properties": {},
                "children": [{
                    "type": "element",
                    "tagName": "code",
                    "properties": { "className": ["language-mermaid"] },
                    "children": [{ "type": "text", "value": "pie\n" }]
                }]
            }]
        }))
        .unwrap();

        let pre = tree.children().unwrap()[0].as_element().unwrap();
        assert_eq!(pre.tag_name, "pre");
        let code = pre.children[0].as_element().unwrap();
        assert!(code.has_class("language-mermaid"));
        assert_eq!(code.text_content(), "pie\n");
    }

    #[test]
    fn unknown_node_types_survive_round_trip() {
        let jsx = json!({
            "type": "mdxJsxFlowElement",
            "name": "Chart",
            "attributes": [],
            "children": []
        });
        let tree: Node = serde_json::from_value(json!({
            "type": "root",
            "children": [jsx.clone()]
        }))
        .unwrap();

        assert_eq!(tree.children().unwrap()[0], Node::Other(jsx.clone()));

        let encoded = serde_json::to_value(&tree).unwrap();
        assert_eq!(encoded["type"], "root");
        assert_eq!(encoded["children"][0], jsx);
    }

    #[test]
    fn unmodelled_fields_survive_round_trip() {
        let input = json!({
            "type": "element",
            "tagName": "pre",
            "properties": {},
            "children": [{
                "type": "element",
                "tagName": "code",
                "properties": { "className": ["language-js"] },
                "children": [{ "type": "text", "value": "x\n", "data": { "k": 1 } }],
                "data": { "meta": "title=\"a.js\"" }
            }]
        });
        let node: Node = serde_json::from_value(input.clone()).unwrap();

        let code = node.as_element().unwrap().children[0].as_element().unwrap();
        assert_eq!(code.extra["data"], json!({ "meta": "title=\"a.js\"" }));
        assert!(!code.extra.contains_key("type"));

        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn null_and_mixed_property_values_decode() {
        let input = json!({
            "type": "element",
            "tagName": "a",
            "properties": { "href": null, "coords": [1, 2, "x"], "start": 3 },
            "children": []
        });
        let node: Node = serde_json::from_value(input.clone()).unwrap();

        let a = node.as_element().unwrap();
        assert_eq!(a.properties["href"], PropertyValue::Null);
        assert_eq!(a.properties["coords"], PropertyValue::Other(json!([1, 2, "x"])));
        assert_eq!(a.properties["start"], PropertyValue::from(3_u32));
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Node::from_json("{\"type\": \"element\"}").unwrap_err();
        assert!(matches!(err, ProcessError::Json(_)));
    }

    #[test]
    fn encodes_element_with_type_tag() {
        let node = Node::element(Element::new("pre", vec![]).with_classes(["mermaid"]));
        let encoded = serde_json::to_value(&node).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "element",
                "tagName": "pre",
                "properties": { "className": ["mermaid"] },
                "children": []
            })
        );
    }
}

//! hast to HTML serialization.

use crate::hast::{Element, Node, PropertyValue};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serializes a hast tree to an HTML string.
pub fn to_html(tree: &Node) -> String {
    let mut out = String::new();
    write_node(tree, &mut out, false);
    out
}

fn write_node(node: &Node, out: &mut String, raw_text: bool) {
    match node {
        Node::Root(root) => write_children(&root.children, out, false),
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => {
            if raw_text {
                out.push_str(&text.value);
            } else {
                html_escape::encode_text_to_string(&text.value, out);
            }
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(&comment.value);
            out.push_str("-->");
        }
        Node::Raw(raw) => out.push_str(&raw.value),
        Node::Other(value) => {
            log::warn!(
                "Unhandled hast node type: {}",
                value
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<untyped>")
            );
        }
    }
}

fn write_children(children: &[Node], out: &mut String, raw_text: bool) {
    for child in children {
        write_node(child, out, raw_text);
    }
}

fn write_element(element: &Element, out: &mut String) {
    let tag = element.tag_name.as_str();
    out.push('<');
    out.push_str(tag);

    for (name, value) in &element.properties {
        write_attribute(name, value, out);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    write_children(&element.children, out, RAW_TEXT_ELEMENTS.contains(&tag));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_attribute(name: &str, value: &PropertyValue, out: &mut String) {
    let rendered = match value {
        PropertyValue::Null | PropertyValue::Bool(false) => return,
        PropertyValue::Bool(true) => None,
        PropertyValue::Number(n) => Some(n.to_string()),
        PropertyValue::String(s) => Some(s.clone()),
        PropertyValue::List(items) => Some(items.join(" ")),
        PropertyValue::Other(serde_json::Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
        ),
        PropertyValue::Other(other) => {
            log::debug!("Skipping unsupported value for property `{name}`: {other}");
            return;
        }
    };

    out.push(' ');
    out.push_str(&attribute_name(name));
    if let Some(rendered) = rendered {
        out.push_str("=\"");
        html_escape::encode_double_quoted_attribute_to_string(&rendered, out);
        out.push('"');
    }
}

/// Maps a hast property name to its HTML attribute name.
fn attribute_name(property: &str) -> String {
    match property {
        "className" => return "class".to_string(),
        "htmlFor" => return "for".to_string(),
        "acceptCharset" => return "accept-charset".to_string(),
        "httpEquiv" => return "http-equiv".to_string(),
        "xLinkHref" => return "xlink:href".to_string(),
        "xmlLang" => return "xml:lang".to_string(),
        "xmlSpace" => return "xml:space".to_string(),
        _ => {}
    }

    if let Some(rest) = camel_suffix(property, "data") {
        let mut name = String::from("data");
        for ch in rest.chars() {
            if ch.is_ascii_uppercase() {
                name.push('-');
                name.push(ch.to_ascii_lowercase());
            } else {
                name.push(ch);
            }
        }
        return name;
    }

    if let Some(rest) = camel_suffix(property, "aria") {
        return format!("aria-{}", rest.to_ascii_lowercase());
    }

    property.to_ascii_lowercase()
}

/// Returns the remainder when `property` is `prefix` followed by an uppercase letter.
fn camel_suffix<'a>(property: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = property.strip_prefix(prefix)?;
    rest.starts_with(|c: char| c.is_ascii_uppercase())
        .then_some(rest)
}

//! mdast to hast conversion.
//!
//! Follows the element shapes produced by remark-rehype so downstream hast
//! transforms see the same tree a JavaScript pipeline would hand them. Notably a
//! fenced code block becomes `pre > code.language-<tag>` whose text is the block
//! value plus a trailing newline (empty blocks get an empty text node).

use crate::hast::{Element, Node, Position, PropertyValue, Root, Text};
use markdown::mdast;

/// Options for mdast to hast conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToHastOptions {
    /// Keep raw HTML nodes as [`Node::Raw`] instead of dropping them.
    pub allow_dangerous_html: bool,
}

/// Converts an mdast tree into a hast tree.
pub fn mdast_to_hast(tree: &mdast::Node, options: &ToHastOptions) -> Node {
    let state = State { options };
    match tree {
        mdast::Node::Root(root) => Node::Root(Root {
            children: wrap(state.all(&root.children), false),
            position: root.position.as_ref().map(Position::from),
            ..Root::default()
        }),
        other => Node::root(state.one(other)),
    }
}

struct State<'a> {
    options: &'a ToHastOptions,
}

impl State<'_> {
    fn all(&self, nodes: &[mdast::Node]) -> Vec<Node> {
        nodes.iter().flat_map(|node| self.one(node)).collect()
    }

    fn one(&self, node: &mdast::Node) -> Vec<Node> {
        match node {
            mdast::Node::Root(root) => wrap(self.all(&root.children), false),
            mdast::Node::Paragraph(p) => {
                vec![element("p", self.all(&p.children), p.position.as_ref())]
            }
            mdast::Node::Heading(h) => {
                let tag = format!("h{}", h.depth);
                vec![element(tag, self.all(&h.children), h.position.as_ref())]
            }
            mdast::Node::Text(text) => vec![Node::Text(Text {
                value: text.value.clone(),
                position: text.position.as_ref().map(Position::from),
                ..Text::default()
            })],
            mdast::Node::Emphasis(em) => {
                vec![element("em", self.all(&em.children), em.position.as_ref())]
            }
            mdast::Node::Strong(strong) => vec![element(
                "strong",
                self.all(&strong.children),
                strong.position.as_ref(),
            )],
            mdast::Node::Delete(del) => {
                vec![element("del", self.all(&del.children), del.position.as_ref())]
            }
            mdast::Node::InlineCode(code) => {
                let value = code.value.replace("\r\n", " ").replace(['\n', '\r'], " ");
                vec![element("code", vec![Node::text(value)], code.position.as_ref())]
            }
            mdast::Node::Break(br) => {
                vec![element("br", Vec::new(), br.position.as_ref()), Node::text("\n")]
            }
            mdast::Node::ThematicBreak(hr) => {
                vec![element("hr", Vec::new(), hr.position.as_ref())]
            }
            mdast::Node::Blockquote(quote) => vec![element(
                "blockquote",
                wrap(self.all(&quote.children), true),
                quote.position.as_ref(),
            )],
            mdast::Node::Link(link) => {
                let mut a = Element::new("a", self.all(&link.children))
                    .with_property("href", link.url.as_str());
                if let Some(title) = &link.title {
                    a = a.with_property("title", title.as_str());
                }
                vec![positioned(a, link.position.as_ref())]
            }
            mdast::Node::Image(image) => {
                let mut img = Element::new("img", Vec::new())
                    .with_property("src", image.url.as_str())
                    .with_property("alt", image.alt.as_str());
                if let Some(title) = &image.title {
                    img = img.with_property("title", title.as_str());
                }
                vec![positioned(img, image.position.as_ref())]
            }
            mdast::Node::Code(code) => vec![self.code(code)],
            mdast::Node::Math(math) => {
                let code = Element::new("code", vec![Node::text(math.value.as_str())])
                    .with_classes(["language-math", "math-display"]);
                vec![positioned(
                    Element::new("pre", vec![Node::Element(code)]),
                    math.position.as_ref(),
                )]
            }
            mdast::Node::InlineMath(math) => {
                let code = Element::new("code", vec![Node::text(math.value.as_str())])
                    .with_classes(["language-math", "math-inline"]);
                vec![positioned(code, math.position.as_ref())]
            }
            mdast::Node::Html(html) => {
                if self.options.allow_dangerous_html {
                    vec![Node::Raw(crate::hast::Raw {
                        value: html.value.clone(),
                        position: html.position.as_ref().map(Position::from),
                        ..Default::default()
                    })]
                } else {
                    log::debug!("Dropping raw HTML node: {}", html.value);
                    Vec::new()
                }
            }
            mdast::Node::List(list) => vec![self.list(list)],
            mdast::Node::ListItem(item) => vec![self.list_item(item, item.spread)],
            mdast::Node::Table(table) => vec![self.table(table)],
            mdast::Node::Yaml(_) | mdast::Node::Toml(_) | mdast::Node::Definition(_) => {
                Vec::new()
            }
            other => match other.children() {
                Some(children) => self.all(children),
                None => {
                    log::debug!("Dropping unsupported mdast node: {:?}", other);
                    Vec::new()
                }
            },
        }
    }

    fn code(&self, code: &mdast::Code) -> Node {
        let value = if code.value.is_empty() {
            String::new()
        } else {
            format!("{}\n", code.value)
        };
        let mut inner = Element::new("code", vec![Node::text(value)]);
        if let Some(lang) = code.lang.as_deref().and_then(|l| l.split_whitespace().next()) {
            inner = inner.with_classes([format!("language-{lang}")]);
        }
        positioned(
            Element::new("pre", vec![Node::Element(inner)]),
            code.position.as_ref(),
        )
    }

    fn list(&self, list: &mdast::List) -> Node {
        let loose = list.spread
            || list.children.iter().any(|child| match child {
                mdast::Node::ListItem(item) => item.spread,
                _ => false,
            });

        let mut children = Vec::new();
        let mut has_task = false;
        for child in &list.children {
            match child {
                mdast::Node::ListItem(item) => {
                    has_task |= item.checked.is_some();
                    children.push(self.list_item(item, loose));
                }
                other => children.extend(self.one(other)),
            }
        }

        let tag = if list.ordered { "ol" } else { "ul" };
        let mut el = Element::new(tag, wrap(children, true));
        if list.ordered
            && let Some(start) = list.start
            && start != 1
        {
            el = el.with_property("start", PropertyValue::from(start));
        }
        if has_task {
            el = el.with_classes(["contains-task-list"]);
        }
        positioned(el, list.position.as_ref())
    }

    fn list_item(&self, item: &mdast::ListItem, loose: bool) -> Node {
        let mut results: Vec<(bool, Node)> = item
            .children
            .iter()
            .flat_map(|child| {
                let is_paragraph = matches!(child, mdast::Node::Paragraph(_));
                self.one(child)
                    .into_iter()
                    .map(move |node| (is_paragraph, node))
            })
            .collect();

        if let Some(checked) = item.checked {
            let checkbox = Node::Element(
                Element::new("input", Vec::new())
                    .with_property("type", "checkbox")
                    .with_property("checked", checked)
                    .with_property("disabled", true),
            );
            match results.first_mut() {
                Some((true, Node::Element(p))) => {
                    if !p.children.is_empty() {
                        p.children.insert(0, Node::text(" "));
                    }
                    p.children.insert(0, checkbox);
                }
                _ => results.insert(0, (true, Node::Element(Element::new("p", vec![checkbox])))),
            }
        }

        let last_is_paragraph = results.last().is_some_and(|(is_p, _)| *is_p);
        let has_results = !results.is_empty();
        let mut children = Vec::new();
        for (index, (is_paragraph, node)) in results.into_iter().enumerate() {
            if loose || index != 0 || !is_paragraph {
                children.push(Node::text("\n"));
            }
            match node {
                Node::Element(p) if is_paragraph && !loose => children.extend(p.children),
                other => children.push(other),
            }
        }
        if has_results && (loose || !last_is_paragraph) {
            children.push(Node::text("\n"));
        }

        let mut li = Element::new("li", children);
        if item.checked.is_some() {
            li = li.with_classes(["task-list-item"]);
        }
        positioned(li, item.position.as_ref())
    }

    fn table(&self, table: &mdast::Table) -> Node {
        let mut rows = table.children.iter().filter_map(|row| match row {
            mdast::Node::TableRow(row) => Some(row),
            _ => None,
        });

        let mut sections = Vec::new();
        if let Some(head) = rows.next() {
            let tr = self.table_row(head, &table.align, "th");
            sections.push(Node::Element(Element::new("thead", wrap(vec![tr], true))));
        }
        let body: Vec<Node> = rows
            .map(|row| self.table_row(row, &table.align, "td"))
            .collect();
        if !body.is_empty() {
            sections.push(Node::Element(Element::new("tbody", wrap(body, true))));
        }

        positioned(
            Element::new("table", wrap(sections, true)),
            table.position.as_ref(),
        )
    }

    fn table_row(&self, row: &mdast::TableRow, align: &[mdast::AlignKind], cell_tag: &str) -> Node {
        let cells = row
            .children
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let children = cell.children().map(|c| self.all(c)).unwrap_or_default();
                let mut el = Element::new(cell_tag, children);
                let alignment = match align.get(index) {
                    Some(mdast::AlignKind::Left) => Some("left"),
                    Some(mdast::AlignKind::Right) => Some("right"),
                    Some(mdast::AlignKind::Center) => Some("center"),
                    _ => None,
                };
                if let Some(alignment) = alignment {
                    el = el.with_property("align", alignment);
                }
                positioned(el, cell.position())
            })
            .collect();
        positioned(Element::new("tr", wrap(cells, true)), row.position.as_ref())
    }
}

fn element(
    tag_name: impl Into<String>,
    children: Vec<Node>,
    position: Option<&markdown::unist::Position>,
) -> Node {
    positioned(Element::new(tag_name, children), position)
}

fn positioned(mut element: Element, position: Option<&markdown::unist::Position>) -> Node {
    element.position = position.map(Position::from);
    Node::Element(element)
}

/// Joins block nodes with newline text, optionally padding both ends.
fn wrap(nodes: Vec<Node>, loose: bool) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len() * 2 + 1);
    let has_nodes = !nodes.is_empty();
    if loose {
        result.push(Node::text("\n"));
    }
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            result.push(Node::text("\n"));
        }
        result.push(node);
    }
    if loose && has_nodes {
        result.push(Node::text("\n"));
    }
    result
}

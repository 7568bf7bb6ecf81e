use mermaid_lite_core::hast::Node;
use mermaid_lite_core::{
    MermaidTransform, Options, Processor, markdown_to_html, rehype_mermaid_lite,
};

fn render(input: &str) -> String {
    markdown_to_html(input, &Options::default()).expect("render should succeed")
}

#[test]
fn transforms_mermaid_code_block() {
    let html = render("\n```mermaid\ngraph TD\nA --> B\n```\n");

    assert!(html.contains("<pre class=\"mermaid\">"));
    assert!(html.contains("graph TD"));
    assert!(!html.contains("language-mermaid"));
    insta::assert_snapshot!(html, @r#"
<pre class="mermaid">graph TD
A --&gt; B
</pre>
"#);
}

#[test]
fn leaves_other_languages_alone() {
    let html = render("\n```js\nconsole.log(\"hi\")\n```\n");

    assert!(html.contains("language-js"));
    assert!(!html.contains("class=\"mermaid\""));
    assert_eq!(
        html,
        "<pre><code class=\"language-js\">console.log(\"hi\")\n</code></pre>"
    );
}

#[test]
fn plain_text_is_untouched() {
    let html = render("Hello, world!");

    assert_eq!(html, "<p>Hello, world!</p>");
    assert!(!html.contains("mermaid"));
    assert!(!html.contains("<pre"));
}

#[test]
fn preserves_multiline_indentation() {
    let input = "\n```mermaid\nsequenceDiagram\n    Alice->>Bob: Hello Bob\n    Bob-->>Alice: Hi Alice\n    Alice->>Bob: How are you?\n```\n";
    let tree = Processor::from_options(&Options::default())
        .run(input)
        .expect("run should succeed");

    let pre = tree.children().unwrap()[0].as_element().unwrap();
    assert_eq!(pre.class_names(), vec!["mermaid"]);
    assert_eq!(
        pre.text_content(),
        "sequenceDiagram\n    Alice->>Bob: Hello Bob\n    Bob-->>Alice: Hi Alice\n    Alice->>Bob: How are you?\n"
    );

    let html = render(input);
    assert!(html.contains("    Alice-&gt;&gt;Bob: Hello Bob\n"));
    assert!(!html.contains("language-mermaid"));
}

#[test]
fn rewrites_every_mermaid_block_in_order() {
    let input = "```mermaid\ngraph TD\nA --> B\n```\n\nSome text between.\n\n```mermaid\npie\n\"A\" : 40\n\"B\" : 60\n```\n\n```js\nconsole.log(\"hello\")\n```\n";
    let html = render(input);

    assert_eq!(html.matches("<pre class=\"mermaid\">").count(), 2);
    assert_eq!(html.matches("language-js").count(), 1);
    assert_eq!(
        html,
        concat!(
            "<pre class=\"mermaid\">graph TD\nA --&gt; B\n</pre>\n",
            "<p>Some text between.</p>\n",
            "<pre class=\"mermaid\">pie\n\"A\" : 40\n\"B\" : 60\n</pre>\n",
            "<pre><code class=\"language-js\">console.log(\"hello\")\n</code></pre>",
        )
    );
}

#[test]
fn empty_mermaid_block_keeps_marker() {
    let html = render("\n```mermaid\n```\n");

    assert_eq!(html, "<pre class=\"mermaid\"></pre>");
    assert!(!html.contains("language-mermaid"));
}

#[test]
fn untagged_and_unrelated_blocks_are_identical_with_or_without_transform() {
    let input = "```\nno language\n```\n\n```mermaidx\nnot quite\n```\n\n~~~rust\nfn main() {}\n~~~\n";
    let without = Options {
        mermaid: false,
        ..Options::default()
    };

    assert_eq!(render(input), markdown_to_html(input, &without).unwrap());
}

#[test]
fn rewrites_blocks_nested_in_containers() {
    let html = render("> ```mermaid\n> pie\n> ```\n\n- item\n\n  ```mermaid\n  flowchart LR\n  ```\n");

    assert!(html.contains("<blockquote>\n<pre class=\"mermaid\">pie\n</pre>\n</blockquote>"));
    assert!(html.contains("<pre class=\"mermaid\">flowchart LR\n</pre>"));
    assert!(!html.contains("language-mermaid"));
}

#[test]
fn second_application_changes_nothing() {
    let input = "```mermaid\ngraph TD\n```\n\n```js\nx\n```\n";
    let mut once = Processor::from_options(&Options::default())
        .run(input)
        .unwrap();
    let snapshot = once.clone();

    rehype_mermaid_lite(&mut once);
    assert_eq!(once, snapshot);
}

#[test]
fn transform_registers_on_a_bare_processor() {
    let processor = Processor::default().with_hast_transform(MermaidTransform::default());
    assert_eq!(
        processor.process("```mermaid\npie\n```").unwrap(),
        "<pre class=\"mermaid\">pie\n</pre>"
    );
}

#[test]
fn accepts_hast_from_json_hosts() {
    let mut tree = Node::from_json(
        r#"{
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "pre",
                    "properties": {},
                    "children": [{
                        "type": "element",
                        "tagName": "code",
                        "properties": {"className": ["language-mermaid"]},
                        "children": [{"type": "text", "value": "graph LR\n"}],
                        "position": {
                            "start": {"line": 1, "column": 1, "offset": 0},
                            "end": {"line": 3, "column": 4, "offset": 24}
                        }
                    }]
                },
                {"type": "mdxJsxFlowElement", "name": "Note", "attributes": [], "children": []}
            ]
        }"#,
    )
    .unwrap();

    rehype_mermaid_lite(&mut tree);

    let encoded: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();
    assert_eq!(
        encoded["children"][0],
        serde_json::json!({
            "type": "element",
            "tagName": "pre",
            "properties": {"className": ["mermaid"]},
            "children": [{"type": "text", "value": "graph LR\n"}]
        })
    );
    assert_eq!(encoded["children"][1]["type"], "mdxJsxFlowElement");
}

#[test]
fn rewrites_blocks_wrapped_in_mdx_components() {
    let mut tree = Node::from_json(
        r#"{
            "type": "root",
            "children": [{
                "type": "mdxJsxFlowElement",
                "name": "Figure",
                "attributes": [],
                "children": [
                    {
                        "type": "element",
                        "tagName": "pre",
                        "properties": {},
                        "children": [{
                            "type": "element",
                            "tagName": "code",
                            "properties": {"className": ["language-mermaid"]},
                            "children": [{"type": "text", "value": "graph TD\n"}]
                        }]
                    },
                    {
                        "type": "element",
                        "tagName": "pre",
                        "properties": {},
                        "children": [{
                            "type": "element",
                            "tagName": "code",
                            "properties": {"className": ["language-ts"]},
                            "children": [{"type": "text", "value": "let a = 1;\n"}],
                            "data": {"meta": "title=\"a.ts\""}
                        }]
                    }
                ]
            }]
        }"#,
    )
    .unwrap();

    rehype_mermaid_lite(&mut tree);

    let encoded: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();
    let figure = &encoded["children"][0];
    assert_eq!(figure["type"], "mdxJsxFlowElement");
    assert_eq!(figure["children"][0]["properties"]["className"][0], "mermaid");
    assert_eq!(figure["children"][0]["children"][0]["value"], "graph TD\n");
    assert_eq!(
        figure["children"][1]["children"][0]["data"]["meta"],
        "title=\"a.ts\""
    );
}

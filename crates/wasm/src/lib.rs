use mermaid_lite_core::hast::Node;
use mermaid_lite_core::{MermaidTransform, Options, markdown_to_html};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Decodes the JS config object; undefined, null, or malformed input yields defaults.
fn parse_config(config: JsValue) -> Options {
    if config.is_undefined() || config.is_null() {
        return Options::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

// ============================================================================
// Markdown API
// ============================================================================

/// Renders markdown to HTML, rewriting mermaid fences into `<pre class="mermaid">`.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { render } from './mermaid_lite_wasm';
///
/// const html = render("```mermaid\ngraph TD\nA --> B\n```", { allowRawHtml: false });
/// // html = '<pre class="mermaid">graph TD\nA --&gt; B\n</pre>'
/// ```
#[wasm_bindgen]
pub fn render(input: &str, config: JsValue) -> Result<String, JsError> {
    let options = parse_config(config);
    markdown_to_html(input, &options).map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// Tree API
// ============================================================================

/// Applies the mermaid rewrite to a hast tree produced by a JavaScript pipeline.
///
/// The tree is decoded from the plain-object hast shape, rewritten, and returned as
/// a new plain object. Only `mermaidLanguage` is read from `config`.
#[wasm_bindgen(js_name = rehypeMermaidLite)]
pub fn rehype_mermaid_lite(tree: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let options = parse_config(config);
    let mut tree: Node = serde_wasm_bindgen::from_value(tree)
        .map_err(|e| JsError::new(&format!("Invalid tree: {}", e)))?;

    MermaidTransform::new(options.mermaid_language).apply(&mut tree);

    tree.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

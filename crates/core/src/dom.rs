//! Read-only helpers over scraper's node tree.
//!
//! The transformer never mutates input; everything here takes a
//! [`NodeRef`] and produces owned strings for rules and diagnostics.
//!
//! # Example
//!
//! ```rust
//! use articulate_core::dom;
//! use scraper::Html;
//!
//! let html = Html::parse_fragment("<p>Hello <b>world</b></p>");
//! let p = html.root_element().first_child().unwrap();
//! assert_eq!(dom::node_name(p), "p");
//! assert_eq!(dom::text_content(p), "Hello world");
//! ```

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Shared borrow of a node inside a parsed [`scraper::Html`] tree.
pub type HtmlNode<'a> = NodeRef<'a, Node>;

/// Whether the dispatch loop should pass over a node without trying rules.
///
/// Whitespace-only text, comments, doctypes and processing instructions
/// carry no article content.
pub fn is_skippable(node: HtmlNode<'_>) -> bool {
    match node.value() {
        Node::Text(text) => text.trim().is_empty(),
        Node::Comment(_) | Node::Doctype(_) | Node::ProcessingInstruction(_) => true,
        Node::Document | Node::Fragment | Node::Element(_) => false,
    }
}

/// Lowercase tag name for elements, `#kind` for everything else.
pub fn node_name(node: HtmlNode<'_>) -> String {
    match node.value() {
        Node::Element(el) => el.name().to_lowercase(),
        Node::Text(_) => "#text".to_string(),
        Node::Comment(_) => "#comment".to_string(),
        Node::Doctype(_) => "#doctype".to_string(),
        Node::ProcessingInstruction(_) => "#processing-instruction".to_string(),
        Node::Document => "#document".to_string(),
        Node::Fragment => "#fragment".to_string(),
    }
}

/// Concatenated text of the node and all its descendants.
pub fn text_content(node: HtmlNode<'_>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|text| &**text)
        .collect()
}

/// Elements whose text children are serialized verbatim.
const RAW_TEXT_ELEMENTS: [&str; 8] = ["iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp"];

/// Serialized markup of a node, including its own tags for elements.
///
/// Text is entity-escaped unless its parent is a raw-text element, so the
/// result parses back to the same tree.
pub fn outer_markup(node: HtmlNode<'_>) -> String {
    match node.value() {
        Node::Element(_) => ElementRef::wrap(node).map(|el| el.html()).unwrap_or_default(),
        Node::Text(text) if in_raw_text_element(node) => String::from(&**text),
        Node::Text(text) => html_escape::encode_text(&**text).into_owned(),
        Node::Comment(comment) => format!("<!--{}-->", &**comment),
        Node::Document | Node::Fragment => node.children().map(outer_markup).collect(),
        Node::Doctype(_) | Node::ProcessingInstruction(_) => String::new(),
    }
}

fn in_raw_text_element(node: HtmlNode<'_>) -> bool {
    node.parent()
        .and_then(|parent| parent.value().as_element().map(|el| el.name().to_ascii_lowercase()))
        .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name.as_str()))
}

/// Serialized markup of a sequence of sibling nodes.
pub fn markup_of(nodes: &[HtmlNode<'_>]) -> String {
    nodes.iter().map(|n| outer_markup(*n)).collect()
}

/// Short human-readable label used in error messages: the opening tag for
/// elements, the node name otherwise.
pub fn describe(node: HtmlNode<'_>) -> String {
    match node.value() {
        Node::Element(el) => {
            let mut label = format!("<{}", el.name());
            for (name, value) in el.attrs() {
                label.push_str(&format!(" {}=\"{}\"", name, html_escape::encode_double_quoted_attribute(value)));
            }
            label.push('>');
            label
        }
        _ => node_name(node),
    }
}

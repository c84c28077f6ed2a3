//! Property getters: named strategies that pull typed values out of a node.
//!
//! A [`GetterRegistry`] maps a getter kind name (`"text"`, `"attribute"`,
//! `"children"`, ...) to a plain function. Kinds are resolved when a
//! [`PropertyDescriptor`] is built, so a misspelled kind fails while the rule
//! is being configured rather than halfway through a document.
//!
//! # Example
//!
//! ```rust
//! use articulate_core::{GetterRegistry, PropertyDescriptor, PropertyValue};
//! use scraper::Html;
//!
//! let getters = GetterRegistry::with_builtins();
//! let url = PropertyDescriptor::new(&getters, "interactive.url", "attribute", "iframe", Some("src")).unwrap();
//!
//! let html = Html::parse_fragment(r#"<figure><iframe src="https://example.com/e"></iframe></figure>"#);
//! let figure = html.root_element().first_child().unwrap();
//! assert_eq!(url.get(figure).and_then(|v| v.as_text().map(str::to_string)), Some("https://example.com/e".to_string()));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::dom::{self, HtmlNode};
use crate::selector::Selector;
use crate::{Result, TransformError};

/// A value extracted by a getter.
#[derive(Debug, Clone)]
pub enum PropertyValue<'a> {
    Text(String),
    Node(HtmlNode<'a>),
    Nodes(Vec<HtmlNode<'a>>),
    Flag(bool),
}

impl<'a> PropertyValue<'a> {
    /// Borrowed text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the value counts as set.
    ///
    /// Empty strings, empty node lists and `false` are not truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Text(text) => !text.is_empty(),
            PropertyValue::Node(_) => true,
            PropertyValue::Nodes(nodes) => !nodes.is_empty(),
            PropertyValue::Flag(flag) => *flag,
        }
    }

    /// Text view of the value: node values collapse to their text content.
    pub fn into_text(self) -> String {
        match self {
            PropertyValue::Text(text) => text,
            PropertyValue::Node(node) => dom::text_content(node),
            PropertyValue::Nodes(nodes) => nodes.into_iter().map(dom::text_content).collect(),
            PropertyValue::Flag(flag) => flag.to_string(),
        }
    }

    /// Markup view of the value: node values are serialized as HTML.
    pub fn into_markup(self) -> String {
        match self {
            PropertyValue::Text(text) => text,
            PropertyValue::Node(node) => dom::outer_markup(node),
            PropertyValue::Nodes(nodes) => dom::markup_of(&nodes),
            PropertyValue::Flag(flag) => flag.to_string(),
        }
    }
}

/// Signature every getter kind implements.
///
/// Receives the descriptor's selector, its optional attribute name and the
/// node the rule matched.
pub type GetterFn = for<'a> fn(&Selector, Option<&str>, HtmlNode<'a>) -> Option<PropertyValue<'a>>;

/// A resolved getter kind.
#[derive(Clone, Copy)]
pub struct Getter {
    kind: &'static str,
    extract: GetterFn,
    needs_attribute: bool,
}

impl Getter {
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getter").field("kind", &self.kind).finish()
    }
}

/// Lookup table from getter kind name to getter.
#[derive(Debug, Clone)]
pub struct GetterRegistry {
    getters: HashMap<&'static str, Getter>,
}

impl GetterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { getters: HashMap::new() }
    }

    /// Registry with `text` (alias `string`), `attribute`, `children`,
    /// `element` and `exists`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("text", text_getter);
        registry.register("string", text_getter);
        registry.register_with_attribute("attribute", attribute_getter);
        registry.register("children", children_getter);
        registry.register("element", element_getter);
        registry.register("exists", exists_getter);
        registry
    }

    /// Adds or replaces a getter kind.
    pub fn register(&mut self, kind: &'static str, extract: GetterFn) {
        self.getters.insert(kind, Getter { kind, extract, needs_attribute: false });
    }

    /// Adds or replaces a getter kind whose descriptors must name an attribute.
    pub fn register_with_attribute(&mut self, kind: &'static str, extract: GetterFn) {
        self.getters.insert(kind, Getter { kind, extract, needs_attribute: true });
    }

    /// Resolves a getter kind.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownGetter`] for unregistered kinds.
    pub fn get(&self, kind: &str) -> Result<Getter> {
        self.getters
            .get(kind)
            .copied()
            .ok_or_else(|| TransformError::UnknownGetter(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.getters.contains_key(kind)
    }
}

impl Default for GetterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn text_getter<'a>(selector: &Selector, attribute: Option<&str>, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
    let found = selector.find_first(node)?;
    match attribute {
        Some(name) => attribute_of(found, name),
        None => Some(PropertyValue::Text(dom::text_content(found))),
    }
}

fn attribute_getter<'a>(
    selector: &Selector,
    attribute: Option<&str>,
    node: HtmlNode<'a>,
) -> Option<PropertyValue<'a>> {
    let found = selector.find_first(node)?;
    attribute_of(found, attribute?)
}

fn children_getter<'a>(selector: &Selector, _: Option<&str>, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
    let found = selector.find_first(node)?;
    Some(PropertyValue::Nodes(found.children().collect()))
}

fn element_getter<'a>(selector: &Selector, _: Option<&str>, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
    selector.find_first(node).map(PropertyValue::Node)
}

fn exists_getter<'a>(selector: &Selector, _: Option<&str>, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
    selector.find_first(node).map(|_| PropertyValue::Flag(true))
}

fn attribute_of<'a>(node: HtmlNode<'a>, name: &str) -> Option<PropertyValue<'a>> {
    node.value()
        .as_element()?
        .attr(name)
        .map(|value| PropertyValue::Text(value.to_string()))
}

/// Declares how to extract one named value from a matched node.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    getter: Getter,
    selector: Selector,
    attribute: Option<String>,
}

impl PropertyDescriptor {
    /// Builds a descriptor, resolving the getter kind and compiling the selector.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnknownGetter`] for an unregistered kind,
    /// [`TransformError::InvalidSelector`] for bad CSS, and
    /// [`TransformError::Config`] when an attribute getter has no attribute.
    pub fn new(
        getters: &GetterRegistry,
        name: &str,
        kind: &str,
        selector: &str,
        attribute: Option<&str>,
    ) -> Result<Self> {
        let getter = getters.get(kind)?;
        if getter.needs_attribute && attribute.is_none() {
            return Err(TransformError::Config(format!(
                "Property '{}' uses the '{}' getter but names no attribute",
                name, kind
            )));
        }

        Ok(Self {
            name: name.to_string(),
            getter,
            selector: Selector::parse(selector)?,
            attribute: attribute.map(str::to_string),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.getter.kind
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Runs the getter against a node.
    pub fn get<'a>(&self, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
        (self.getter.extract)(&self.selector, self.attribute.as_deref(), node)
    }
}

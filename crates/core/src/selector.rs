//! Compiled node queries.
//!
//! A [`Selector`] is either the node itself ([`Selector::Root`]) or a CSS
//! selector compiled once by scraper. Rules use [`Selector::matches`] to decide
//! whether a child node is theirs; property getters use
//! [`Selector::find_first`] and [`Selector::find_all`], which search the node
//! itself and then its descendants.
//!
//! # Example
//!
//! ```rust
//! use articulate_core::Selector;
//! use scraper::Html;
//!
//! let html = Html::parse_fragment(r#"<figure class="op-interactive"><iframe src="x"></iframe></figure>"#);
//! let figure = html.root_element().first_child().unwrap();
//!
//! let rule_selector = Selector::parse("figure.op-interactive").unwrap();
//! assert!(rule_selector.matches(figure));
//!
//! let iframe = Selector::parse("iframe").unwrap();
//! assert!(iframe.find_first(figure).is_some());
//! ```

use std::fmt;

use scraper::ElementRef;

use crate::dom::HtmlNode;
use crate::{Result, TransformError};

/// Spelling of [`Selector::Root`] in configuration.
pub const ROOT_SELECTOR: &str = "self";

/// An immutable query over an HTML tree.
#[derive(Debug, Clone)]
pub enum Selector {
    /// The node the query is evaluated on.
    Root,
    /// A compiled CSS selector together with its source text.
    Css { source: String, compiled: scraper::Selector },
}

impl Selector {
    /// Compiles a selector string.
    ///
    /// The empty string and `"self"` produce [`Selector::Root`].
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidSelector`] if the CSS cannot be parsed.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() || source == ROOT_SELECTOR {
            return Ok(Selector::Root);
        }

        let compiled = scraper::Selector::parse(source).map_err(|e| TransformError::InvalidSelector {
            selector: source.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Selector::Css { source: source.to_string(), compiled })
    }

    /// Source text of the selector.
    pub fn as_str(&self) -> &str {
        match self {
            Selector::Root => ROOT_SELECTOR,
            Selector::Css { source, .. } => source,
        }
    }

    /// Does this particular node satisfy the selector?
    ///
    /// Only element nodes can match. Combinators are checked against the
    /// node's ancestors, the same way a browser would.
    pub fn matches(&self, node: HtmlNode<'_>) -> bool {
        let Some(element) = ElementRef::wrap(node) else {
            return false;
        };
        match self {
            Selector::Root => true,
            Selector::Css { compiled, .. } => compiled.matches(&element),
        }
    }

    /// First node in document order, starting with `node` itself, that
    /// satisfies the selector.
    pub fn find_first<'a>(&self, node: HtmlNode<'a>) -> Option<HtmlNode<'a>> {
        match self {
            Selector::Root => Some(node),
            Selector::Css { compiled, .. } => {
                let element = ElementRef::wrap(node)?;
                if compiled.matches(&element) {
                    return Some(node);
                }
                element.select(compiled).next().map(|found| *found)
            }
        }
    }

    /// All nodes, starting with `node` itself, that satisfy the selector.
    pub fn find_all<'a>(&self, node: HtmlNode<'a>) -> Vec<HtmlNode<'a>> {
        match self {
            Selector::Root => vec![node],
            Selector::Css { compiled, .. } => {
                let Some(element) = ElementRef::wrap(node) else {
                    return Vec::new();
                };
                let mut found = Vec::new();
                if compiled.matches(&element) {
                    found.push(node);
                }
                found.extend(element.select(compiled).map(|el| *el));
                found
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

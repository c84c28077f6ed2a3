//! Transformation rules.
//!
//! A [`Rule`] pairs a selector with the [`ContextKind`] it applies to and the
//! logic that turns a matched node into changes on the context. Most built-in
//! rules keep their selector and named properties in a [`SelectorRule`].
//!
//! # Example
//!
//! ```rust
//! use articulate_core::elements::{Element, Header};
//! use articulate_core::rules::{HeaderKickerRule, HeaderTitleRule};
//! use articulate_core::Transformer;
//! use scraper::Html;
//!
//! let mut transformer = Transformer::new();
//! transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
//! transformer.add_rule(HeaderKickerRule::new("h3").unwrap());
//!
//! let html = Html::parse_fragment("<h1>Title</h1><h3>Kicker</h3>");
//! let header = transformer
//!     .transform(Element::from(Header::create()), *html.root_element())
//!     .unwrap()
//!     .into_header()
//!     .unwrap();
//! assert_eq!(header.title(), Some("Title"));
//! ```

pub mod article;
pub mod caption;
pub mod header;
pub mod interactive;
pub mod structural;
pub mod video;

use std::fmt;

use crate::dom::{self, HtmlNode};
use crate::elements::{ContextKind, Element};
use crate::getters::{GetterRegistry, PropertyDescriptor, PropertyValue};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::{Result, TransformError};

pub use article::InstantArticleRule;
pub use caption::CaptionRule;
pub use header::{HeaderKickerRule, HeaderRule, HeaderTitleRule};
pub use interactive::InteractiveRule;
pub use structural::{IgnoreRule, PassThroughRule};
pub use video::VideoRule;

/// A selector bound to one context kind, plus the step that applies it.
///
/// Rules are immutable once built and are shared between transformers, so
/// `apply` must only change the context it is handed.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Identifier used by rule sets and in error messages.
    fn name(&self) -> &'static str;

    /// The context kind this rule applies to.
    fn context_kind(&self) -> ContextKind;

    fn selector(&self) -> &Selector;

    /// True iff the context has this rule's kind and the node itself
    /// satisfies the selector.
    fn matches(&self, context: &Element, node: HtmlNode<'_>) -> bool {
        context.kind() == self.context_kind() && self.selector().matches(node)
    }

    /// Builds on `context` from `node` and returns the context to continue with.
    ///
    /// May call [`Transformer::transform`] to descend into nested content.
    fn apply(&self, transformer: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element>;
}

/// Selector plus named property extractors shared by the built-in rules.
#[derive(Debug, Clone)]
pub struct SelectorRule {
    selector: Selector,
    properties: Vec<PropertyDescriptor>,
}

impl SelectorRule {
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self { selector: Selector::parse(selector)?, properties: Vec::new() })
    }

    /// Builds the selector and the listed properties from a rule configuration.
    ///
    /// Property definitions whose names are not in `names` are ignored.
    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry, names: &[&str]) -> Result<Self> {
        let mut rule = Self::new(config.selector()?)?;
        for (name, property) in &config.properties {
            if !names.contains(&name.as_str()) {
                tracing::debug!(rule = %config.rule_type, property = %name, "Ignoring unknown property");
                continue;
            }
            rule = rule.with_property(property.descriptor(getters, name)?);
        }
        Ok(rule)
    }

    /// Adds a property, replacing any earlier one with the same name.
    pub fn with_property(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.retain(|p| p.name() != descriptor.name());
        self.properties.push(descriptor);
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name() == name)
    }

    /// Extracts a named property from a node.
    ///
    /// `None` when the property is not declared or the getter found nothing.
    pub fn property<'a>(&self, name: &str, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
        self.properties.iter().find(|p| p.name() == name)?.get(node)
    }

    /// Like [`SelectorRule::property`] but only returns truthy values.
    pub fn truthy_property<'a>(&self, name: &str, node: HtmlNode<'a>) -> Option<PropertyValue<'a>> {
        self.property(name, node).filter(|value| value.is_truthy())
    }

    /// A property the rule cannot do without.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingProperty`] naming the rule, property and node.
    pub fn require<'a>(&self, rule: &'static str, name: &str, node: HtmlNode<'a>) -> Result<PropertyValue<'a>> {
        self.truthy_property(name, node).ok_or_else(|| missing(rule, name, node))
    }

    /// Fails with a configuration error unless at least one of `names` is declared.
    pub fn expect_any(&self, rule: &'static str, names: &[&str]) -> Result<()> {
        if names.iter().any(|name| self.has_property(name)) {
            Ok(())
        } else {
            Err(TransformError::Config(format!(
                "{} needs a definition for {}",
                rule,
                names.join(" or ")
            )))
        }
    }
}

pub(crate) fn missing(rule: &'static str, property: &str, node: HtmlNode<'_>) -> TransformError {
    TransformError::MissingProperty { rule, property: property.to_string(), node: dom::describe(node) }
}

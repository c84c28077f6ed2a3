//! The rule registry and dispatch loop.
//!
//! A [`Transformer`] holds an ordered list of rules. For each child of the
//! node it is asked to transform, it tries the rules newest-first and applies
//! the first one that matches; children nothing matched are recorded as
//! [`Warning`]s. Rules may call back into [`Transformer::transform`] to build
//! nested elements, and those calls share the same warning list.
//!
//! # Example
//!
//! ```rust
//! use articulate_core::elements::{ContextKind, InstantArticle};
//! use articulate_core::rules::PassThroughRule;
//! use articulate_core::Transformer;
//! use scraper::Html;
//!
//! let mut transformer = Transformer::new();
//! transformer.add_rule(PassThroughRule::new("html, head, body", ContextKind::InstantArticle).unwrap());
//!
//! let html = Html::parse_document("<html><body><foo>bar</foo></body></html>");
//! let conversion = transformer.convert_document(InstantArticle::create().into(), &html).unwrap();
//! assert_eq!(conversion.warnings.len(), 1);
//! assert_eq!(conversion.warnings[0].node_name(), "foo");
//! ```

use std::fmt;
use std::sync::Arc;

use ego_tree::NodeId;
use scraper::Html;
use serde::Serialize;

use crate::dom::{self, HtmlNode};
use crate::elements::{ContextKind, Element};
use crate::rules::Rule;
use crate::{Result, TransformError};

/// Configuration for the Transformer.
///
/// # Example
///
/// ```rust
/// use articulate_core::TransformerConfig;
///
/// let config = TransformerConfig::builder().max_depth(64).build();
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone)]
pub struct TransformerConfig {
    /// Maximum nesting of transform calls before failing (default: 256).
    pub max_depth: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl TransformerConfig {
    /// Creates a new builder for TransformerConfig.
    pub fn builder() -> TransformerConfigBuilder {
        TransformerConfigBuilder::new()
    }
}

/// Builder for TransformerConfig.
pub struct TransformerConfigBuilder {
    config: TransformerConfig,
}

impl TransformerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: TransformerConfig::default() }
    }

    /// Sets the maximum transform depth.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.config.max_depth = value;
        self
    }

    /// Builds the TransformerConfig.
    pub fn build(self) -> TransformerConfig {
        self.config
    }
}

impl Default for TransformerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A child node no rule matched.
///
/// Carries what is needed to report it without the source tree: a snapshot
/// of the context as it stood when the node was visited, the node's name
/// and markup, and how deep in nested transforms it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    context: Element,
    #[serde(skip)]
    node_id: NodeId,
    node_name: String,
    markup: String,
    depth: usize,
}

impl Warning {
    fn unrecognized(context: &Element, node: HtmlNode<'_>, depth: usize) -> Self {
        Self {
            context: context.clone(),
            node_id: node.id(),
            node_name: dom::node_name(node),
            markup: dom::outer_markup(node),
            depth,
        }
    }

    /// The context as it was when the node was visited.
    pub fn context(&self) -> &Element {
        &self.context
    }

    pub fn context_kind(&self) -> ContextKind {
        self.context.kind()
    }

    /// Id of the offending node in the source tree.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Nesting level of the transform call that saw the node; 1 is the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unrecognized {} in {} context (depth {}): {}",
            self.node_name,
            self.context.kind(),
            self.depth,
            self.markup
        )
    }
}

/// Result of a finished conversion: the built context and every warning.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub context: Element,
    pub warnings: Vec<Warning>,
}

/// Priority-ordered rule registry with a depth-first dispatch loop.
#[derive(Debug, Default)]
pub struct Transformer {
    rules: Vec<Arc<dyn Rule>>,
    warnings: Vec<Warning>,
    config: TransformerConfig,
    depth: usize,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransformerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Registers a rule with higher priority than every rule before it.
    pub fn add_rule<R: Rule + 'static>(&mut self, rule: R) {
        self.add_shared_rule(Arc::new(rule));
    }

    /// Registers a rule that may also be registered with other transformers.
    pub fn add_shared_rule(&mut self, rule: Arc<dyn Rule>) {
        tracing::debug!(
            rule = rule.name(),
            selector = %rule.selector(),
            context = %rule.context_kind(),
            priority = self.rules.len(),
            "Registered rule"
        );
        self.rules.push(rule);
    }

    /// Registered rules, lowest priority first.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Warnings collected so far, in the order they were found.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Moves the collected warnings out, leaving the list empty.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Transforms the children of `node` into `context`.
    ///
    /// # Errors
    ///
    /// Any error a rule returns aborts the walk and is passed up unchanged;
    /// [`TransformError::DepthExceeded`] when nesting passes
    /// [`TransformerConfig::max_depth`]. Warnings found before the failure
    /// remain available from [`Transformer::warnings`].
    pub fn transform(&mut self, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        if self.depth >= self.config.max_depth {
            return Err(TransformError::DepthExceeded { limit: self.config.max_depth });
        }

        self.depth += 1;
        let result = self.transform_children(context, node);
        self.depth -= 1;

        if self.depth == 0 {
            tracing::debug!(warnings = self.warnings.len(), failed = result.is_err(), "Transform finished");
        }
        result
    }

    /// Transforms a whole parsed document, starting at its root node.
    pub fn transform_document(&mut self, context: Element, html: &Html) -> Result<Element> {
        self.transform(context, html.tree.root())
    }

    /// Runs [`Transformer::transform`] and hands back the context together
    /// with the warnings collected so far.
    pub fn convert(&mut self, context: Element, node: HtmlNode<'_>) -> Result<Conversion> {
        let context = self.transform(context, node)?;
        Ok(Conversion { context, warnings: self.take_warnings() })
    }

    /// [`Transformer::convert`] over a whole parsed document.
    pub fn convert_document(&mut self, context: Element, html: &Html) -> Result<Conversion> {
        self.convert(context, html.tree.root())
    }

    fn transform_children(&mut self, mut context: Element, node: HtmlNode<'_>) -> Result<Element> {
        for child in node.children() {
            if dom::is_skippable(child) {
                continue;
            }

            match self.find_rule(&context, child) {
                Some(rule) => context = rule.apply(self, context, child)?,
                None => self.warnings.push(Warning::unrecognized(&context, child, self.depth)),
            }
        }
        Ok(context)
    }

    /// First matching rule, newest registration first.
    fn find_rule(&self, context: &Element, node: HtmlNode<'_>) -> Option<Arc<dyn Rule>> {
        self.rules.iter().rev().find(|rule| rule.matches(context, node)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Header, InstantArticle};
    use crate::rules::{HeaderKickerRule, HeaderTitleRule, IgnoreRule, PassThroughRule};
    use crate::selector::Selector;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records which instance was applied by writing its tag into the kicker.
    #[derive(Debug)]
    struct TaggingRule {
        tag: &'static str,
        selector: Selector,
        applied: AtomicUsize,
    }

    impl TaggingRule {
        fn new(tag: &'static str, selector: &str) -> Self {
            Self { tag, selector: Selector::parse(selector).unwrap(), applied: AtomicUsize::new(0) }
        }
    }

    impl Rule for TaggingRule {
        fn name(&self) -> &'static str {
            "TaggingRule"
        }

        fn context_kind(&self) -> ContextKind {
            ContextKind::Header
        }

        fn selector(&self) -> &Selector {
            &self.selector
        }

        fn apply(&self, _: &mut Transformer, context: Element, _: HtmlNode<'_>) -> Result<Element> {
            self.applied.fetch_add(1, Ordering::SeqCst);
            Ok(context.into_header()?.with_kicker(self.tag)?.into())
        }
    }

    fn header() -> Element {
        Header::create().into()
    }

    #[test]
    fn test_empty_node_leaves_context_unchanged() {
        let html = Html::parse_fragment("<div></div>");
        let div = Selector::parse("div").unwrap().find_first(*html.root_element()).unwrap();

        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
        transformer.add_rule(HeaderKickerRule::new("h3").unwrap());

        let context = transformer.transform(header(), div).unwrap();
        assert_eq!(context, header());
        assert!(transformer.warnings().is_empty());
    }

    #[test]
    fn test_title_and_kicker() {
        let html = Html::parse_fragment("<h1>Title</h1><h3>Kicker</h3>");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
        transformer.add_rule(HeaderKickerRule::new("h3").unwrap());

        let header = transformer.transform(header(), *html.root_element()).unwrap().into_header().unwrap();
        assert_eq!(header.title(), Some("Title"));
        assert_eq!(header.kicker(), Some("Kicker"));
        assert!(transformer.warnings().is_empty());
    }

    #[test]
    fn test_unmatched_node_is_a_warning() {
        let html = Html::parse_fragment("<foo>bar</foo>");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());

        let context = transformer.transform(header(), *html.root_element()).unwrap();
        assert_eq!(context, header());

        let warnings = transformer.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].node_name(), "foo");
        assert_eq!(warnings[0].markup(), "<foo>bar</foo>");
        assert_eq!(warnings[0].context_kind(), ContextKind::Header);
        assert_eq!(warnings[0].depth(), 1);
    }

    #[test]
    fn test_warning_snapshots_context() {
        let html = Html::parse_fragment("<h1>Title</h1><foo>bar</foo><h3>Kicker</h3>");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
        transformer.add_rule(HeaderKickerRule::new("h3").unwrap());

        let header = transformer.transform(header(), *html.root_element()).unwrap().into_header().unwrap();
        assert_eq!(header.kicker(), Some("Kicker"));

        let snapshot = transformer.warnings()[0].context().clone().into_header().unwrap();
        assert_eq!(snapshot.title(), Some("Title"));
        assert_eq!(snapshot.kicker(), None);
    }

    #[test]
    fn test_last_registered_wins() {
        let html = Html::parse_fragment("<h3>x</h3>");
        let first = Arc::new(TaggingRule::new("A", "h3"));
        let second = Arc::new(TaggingRule::new("B", "h3"));

        let mut transformer = Transformer::new();
        transformer.add_shared_rule(first.clone());
        transformer.add_shared_rule(second.clone());

        let header = transformer.transform(header(), *html.root_element()).unwrap().into_header().unwrap();
        assert_eq!(header.kicker(), Some("B"));
        assert_eq!(first.applied.load(Ordering::SeqCst), 0);
        assert_eq!(second.applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_override_more_specific_rule() {
        let html = Html::parse_fragment(r#"<h3 class="op-kicker">x</h3><h3>y</h3>"#);
        let mut transformer = Transformer::new();
        transformer.add_rule(TaggingRule::new("generic", "h3"));
        transformer.add_rule(TaggingRule::new("specific", "h3.op-kicker"));

        let header = transformer.transform(header(), *html.root_element()).unwrap().into_header().unwrap();
        // The second h3 only matches the baseline rule, which runs last.
        assert_eq!(header.kicker(), Some("generic"));
    }

    #[rstest]
    #[case("   \n  ")]
    #[case("<!-- a comment -->")]
    #[case("\n<!-- a --> \t <!-- b -->\n")]
    fn test_whitespace_and_comments_never_warn(#[case] markup: &str) {
        let html = Html::parse_fragment(markup);
        let probe = Arc::new(TaggingRule::new("probe", "self"));
        let mut transformer = Transformer::new();
        transformer.add_shared_rule(probe.clone());

        let context = transformer.transform(header(), *html.root_element()).unwrap();
        assert_eq!(context, header());
        assert!(transformer.warnings().is_empty());
        assert_eq!(probe.applied.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_context_kind_mismatch_never_matches() {
        let html = Html::parse_fragment("<h1>Title</h1>");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("self").unwrap());

        let context = transformer.transform(InstantArticle::create().into(), *html.root_element()).unwrap();
        assert_eq!(context, Element::from(InstantArticle::create()));
        assert_eq!(transformer.warnings().len(), 1);
    }

    #[test]
    fn test_warning_count_is_stable_across_runs() {
        let html = Html::parse_fragment("<foo>a</foo><h1>Title</h1><bar>b</bar>text");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());

        transformer.transform(header(), *html.root_element()).unwrap();
        let first = transformer.warnings().len();
        transformer.transform(header(), *html.root_element()).unwrap();
        let second = transformer.warnings().len() - first;

        assert_eq!(first, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_warnings_reach_top_level() {
        let html = Html::parse_fragment("<div><span>lost</span></div>");
        let mut transformer = Transformer::new();
        transformer.add_rule(PassThroughRule::new("div", ContextKind::Header).unwrap());

        let conversion = transformer.convert(header(), *html.root_element()).unwrap();
        assert_eq!(conversion.warnings.len(), 1);
        assert_eq!(conversion.warnings[0].node_name(), "span");
        assert_eq!(conversion.warnings[0].depth(), 2);
        assert!(transformer.warnings().is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let html = Html::parse_fragment("<div><div><div><h1>deep</h1></div></div></div>");
        let mut transformer = Transformer::with_config(TransformerConfig::builder().max_depth(2).build());
        transformer.add_rule(PassThroughRule::new("div", ContextKind::Header).unwrap());
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());

        let result = transformer.transform(header(), *html.root_element());
        assert!(matches!(result, Err(TransformError::DepthExceeded { limit: 2 })));

        let mut transformer = Transformer::new();
        transformer.add_rule(PassThroughRule::new("div", ContextKind::Header).unwrap());
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
        let header = transformer.transform(header(), *html.root_element()).unwrap().into_header().unwrap();
        assert_eq!(header.title(), Some("deep"));
    }

    #[test]
    fn test_error_aborts_but_keeps_warnings() {
        let html = Html::parse_fragment("<foo>a</foo><h1> </h1><bar>b</bar>");
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());

        let result = transformer.transform(header(), *html.root_element());
        assert!(matches!(result, Err(TransformError::InvalidValue { .. })));
        assert_eq!(transformer.warnings().len(), 1);
    }

    #[test]
    fn test_transform_document_skips_doctype() {
        let html = Html::parse_document("<!DOCTYPE html><html><head></head><body><aside>x</aside></body></html>");
        let mut transformer = Transformer::new();
        transformer.add_rule(PassThroughRule::new("html", ContextKind::InstantArticle).unwrap());
        transformer.add_rule(IgnoreRule::new("head", ContextKind::InstantArticle).unwrap());
        transformer.add_rule(PassThroughRule::new("body", ContextKind::InstantArticle).unwrap());

        transformer.transform_document(InstantArticle::create().into(), &html).unwrap();
        let names: Vec<_> = transformer.warnings().iter().map(|w| w.node_name().to_string()).collect();
        assert_eq!(names, vec!["aside"]);
    }

    #[test]
    fn test_warning_display() {
        let html = Html::parse_fragment("<foo>bar</foo>");
        let mut transformer = Transformer::new();
        transformer.transform(header(), *html.root_element()).unwrap();
        let message = transformer.warnings()[0].to_string();
        assert!(message.contains("foo"));
        assert!(message.contains("Header"));
    }
}

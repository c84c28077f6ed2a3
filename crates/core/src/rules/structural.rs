//! Rules that steer the walk without building elements of their own.

use crate::dom::HtmlNode;
use crate::elements::{ContextKind, Element};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::Result;

/// Descends into the matched node with the same context.
///
/// Used for wrappers such as `<html>`, `<body>` or layout `<div>`s whose
/// children carry the content.
#[derive(Debug, Clone)]
pub struct PassThroughRule {
    base: SelectorRule,
    context: ContextKind,
}

impl PassThroughRule {
    pub const NAME: &'static str = "PassThroughRule";

    pub fn new(selector: &str, context: ContextKind) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)?, context })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Ok(Self {
            base: SelectorRule::from_config(config, getters, &[])?,
            context: config.context_or(ContextKind::InstantArticle)?,
        })
    }
}

impl Rule for PassThroughRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        self.context
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, transformer: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        transformer.transform(context, node)
    }
}

/// Consumes the matched node, leaving the context untouched and recording
/// no warning.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    base: SelectorRule,
    context: ContextKind,
}

impl IgnoreRule {
    pub const NAME: &'static str = "IgnoreRule";

    pub fn new(selector: &str, context: ContextKind) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)?, context })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Ok(Self {
            base: SelectorRule::from_config(config, getters, &[])?,
            context: config.context_or(ContextKind::InstantArticle)?,
        })
    }
}

impl Rule for IgnoreRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        self.context
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, _: &mut Transformer, context: Element, _: HtmlNode<'_>) -> Result<Element> {
        Ok(context)
    }
}

use crate::dom::{self, HtmlNode};
use crate::elements::{Caption, ContextKind, Element};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::Result;

/// Builds a [`Caption`] and attaches it to the interactive or video being built.
#[derive(Debug, Clone)]
pub struct CaptionRule {
    base: SelectorRule,
    context: ContextKind,
}

impl CaptionRule {
    pub const NAME: &'static str = "CaptionRule";

    /// Caption text; falls back to the text of the whole matched node.
    pub const PROPERTY_TITLE: &'static str = "caption.title";
    pub const PROPERTY_CREDIT: &'static str = "caption.credit";

    pub fn new(selector: &str, context: ContextKind) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)?, context })
    }

    pub fn with_base(base: SelectorRule, context: ContextKind) -> Self {
        Self { base, context }
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        let base = SelectorRule::from_config(config, getters, &[Self::PROPERTY_TITLE, Self::PROPERTY_CREDIT])?;
        Ok(Self::with_base(base, config.context_or(ContextKind::Interactive)?))
    }
}

impl Rule for CaptionRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        self.context
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, _: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        let title = match self.base.truthy_property(Self::PROPERTY_TITLE, node) {
            Some(title) => title.into_text(),
            None => dom::text_content(node),
        };
        let mut caption = Caption::create().with_title(&title)?;

        if let Some(credit) = self.base.truthy_property(Self::PROPERTY_CREDIT, node) {
            caption = caption.with_credit(&credit.into_text())?;
        }

        context.with_caption(caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Header, Interactive};
    use crate::getters::PropertyDescriptor;
    use scraper::Html;

    #[test]
    fn test_caption_title_and_credit() {
        let getters = GetterRegistry::with_builtins();
        let base = SelectorRule::new("figcaption")
            .unwrap()
            .with_property(PropertyDescriptor::new(&getters, CaptionRule::PROPERTY_TITLE, "text", "h1", None).unwrap())
            .with_property(PropertyDescriptor::new(&getters, CaptionRule::PROPERTY_CREDIT, "text", "cite", None).unwrap());
        let rule = CaptionRule::with_base(base, ContextKind::Interactive);

        let html = Html::parse_fragment("<figcaption><h1>Chart</h1><cite>Agency</cite></figcaption>");
        let node = html.root_element().first_child().unwrap();
        let mut transformer = Transformer::new();

        let interactive = rule
            .apply(&mut transformer, Interactive::create().into(), node)
            .unwrap()
            .into_interactive()
            .unwrap();
        let caption = interactive.caption().unwrap();
        assert_eq!(caption.title(), Some("Chart"));
        assert_eq!(caption.credit(), Some("Agency"));
    }

    #[test]
    fn test_context_kind_is_configurable() {
        let html = Html::parse_fragment("<figcaption>x</figcaption>");
        let node = html.root_element().first_child().unwrap();
        let rule = CaptionRule::new("figcaption", ContextKind::Video).unwrap();

        assert_eq!(rule.context_kind(), ContextKind::Video);
        assert!(!rule.matches(&Interactive::create().into(), node));
    }

    #[test]
    fn test_caption_on_header_is_mismatch() {
        let html = Html::parse_fragment("<figcaption>x</figcaption>");
        let node = html.root_element().first_child().unwrap();
        let rule = CaptionRule::new("figcaption", ContextKind::Header).unwrap();
        let mut transformer = Transformer::new();

        assert!(rule.apply(&mut transformer, Header::create().into(), node).is_err());
    }
}

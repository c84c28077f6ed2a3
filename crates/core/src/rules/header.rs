use crate::dom::{self, HtmlNode};
use crate::elements::{ContextKind, Element, Header};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::Result;

/// Builds the article header from the matched node's content.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    base: SelectorRule,
}

impl HeaderRule {
    pub const NAME: &'static str = "HeaderRule";

    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)? })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Ok(Self { base: SelectorRule::from_config(config, getters, &[])? })
    }
}

impl Rule for HeaderRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        ContextKind::InstantArticle
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, transformer: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        let article = context.into_instant_article()?;
        let header = article.header().cloned().unwrap_or_default();
        let header = transformer.transform(header.into(), node)?.into_header()?;
        Ok(article.with_header(header).into())
    }
}

/// Sets the header title from the text of the matched node.
#[derive(Debug, Clone)]
pub struct HeaderTitleRule {
    base: SelectorRule,
}

impl HeaderTitleRule {
    pub const NAME: &'static str = "HeaderTitleRule";

    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)? })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Ok(Self { base: SelectorRule::from_config(config, getters, &[])? })
    }
}

impl Rule for HeaderTitleRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        ContextKind::Header
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, _: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        let header: Header = context.into_header()?;
        Ok(header.with_title(&dom::text_content(node))?.into())
    }
}

/// Sets the header kicker from the text of the matched node.
#[derive(Debug, Clone)]
pub struct HeaderKickerRule {
    base: SelectorRule,
}

impl HeaderKickerRule {
    pub const NAME: &'static str = "HeaderKickerRule";

    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self { base: SelectorRule::new(selector)? })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Ok(Self { base: SelectorRule::from_config(config, getters, &[])? })
    }
}

impl Rule for HeaderKickerRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        ContextKind::Header
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, _: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        let header = context.into_header()?;
        Ok(header.with_kicker(&dom::text_content(node))?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::InstantArticle;
    use scraper::Html;

    fn header_transformer() -> Transformer {
        let mut transformer = Transformer::new();
        transformer.add_rule(HeaderRule::new("header").unwrap());
        transformer.add_rule(HeaderTitleRule::new("h1").unwrap());
        transformer.add_rule(HeaderKickerRule::new("h3.op-kicker").unwrap());
        transformer
    }

    #[test]
    fn test_title_and_kicker_only_match_headers() {
        let html = Html::parse_fragment("<h1>Title</h1>");
        let h1 = html.root_element().first_child().unwrap();
        let title = HeaderTitleRule::new("h1").unwrap();
        let kicker = HeaderKickerRule::new("h3").unwrap();

        assert!(title.matches(&Header::create().into(), h1));
        assert!(!kicker.matches(&Header::create().into(), h1));
        assert!(!title.matches(&InstantArticle::create().into(), h1));
    }

    #[test]
    fn test_header_rule_recurses_into_header() {
        let html = Html::parse_fragment(
            r#"<header>
                <h3 class="op-kicker">Breaking</h3>
                <h1>Big story</h1>
            </header>"#,
        );
        let mut transformer = header_transformer();

        let article = transformer
            .transform(InstantArticle::create().into(), *html.root_element())
            .unwrap()
            .into_instant_article()
            .unwrap();

        let header = article.header().unwrap();
        assert_eq!(header.title(), Some("Big story"));
        assert_eq!(header.kicker(), Some("Breaking"));
        assert!(transformer.warnings().is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let html = Html::parse_fragment("<h1>  </h1>");
        let mut transformer = header_transformer();
        let result = transformer.transform(Header::create().into(), *html.root_element());
        assert!(result.is_err());
    }
}

use crate::dom::HtmlNode;
use crate::elements::{ContextKind, Element};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::Result;

/// Reads document-level metadata onto the article.
#[derive(Debug, Clone)]
pub struct InstantArticleRule {
    base: SelectorRule,
}

impl InstantArticleRule {
    pub const NAME: &'static str = "InstantArticleRule";

    pub const PROPERTY_CANONICAL: &'static str = "article.canonical";
    pub const PROPERTY_CHARSET: &'static str = "article.charset";
    pub const PROPERTY_MARKUP_VERSION: &'static str = "article.markup.version";
    pub const PROPERTY_AUTO_AD_PLACEMENT: &'static str = "article.auto.ad";

    const PROPERTIES: [&'static str; 4] = [
        Self::PROPERTY_CANONICAL,
        Self::PROPERTY_CHARSET,
        Self::PROPERTY_MARKUP_VERSION,
        Self::PROPERTY_AUTO_AD_PLACEMENT,
    ];

    /// Wraps a selector rule; it must declare the canonical URL property.
    pub fn new(base: SelectorRule) -> Result<Self> {
        base.expect_any(Self::NAME, &[Self::PROPERTY_CANONICAL])?;
        Ok(Self { base })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Self::new(SelectorRule::from_config(config, getters, &Self::PROPERTIES)?)
    }
}

impl Rule for InstantArticleRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn context_kind(&self) -> ContextKind {
        ContextKind::InstantArticle
    }

    fn selector(&self) -> &Selector {
        self.base.selector()
    }

    fn apply(&self, _: &mut Transformer, context: Element, node: HtmlNode<'_>) -> Result<Element> {
        let mut article = context.into_instant_article()?;

        let canonical = self.base.require(Self::NAME, Self::PROPERTY_CANONICAL, node)?;
        article = article.with_canonical_url(&canonical.into_text())?;

        if let Some(charset) = self.base.truthy_property(Self::PROPERTY_CHARSET, node) {
            article = article.with_charset(&charset.into_text())?;
        }

        if let Some(version) = self.base.truthy_property(Self::PROPERTY_MARKUP_VERSION, node) {
            article = article.with_markup_version(&version.into_text())?;
        }

        if let Some(auto_ad) = self.base.property(Self::PROPERTY_AUTO_AD_PLACEMENT, node)
            && auto_ad.into_text().trim() == "false"
        {
            article = article.disable_automatic_ad_placement();
        }

        Ok(article.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;
    use crate::elements::InstantArticle;
    use crate::getters::PropertyDescriptor;
    use scraper::Html;

    const HEAD: &str = r#"<html><head>
        <meta charset="utf-8">
        <link rel="canonical" href="https://example.com/story">
        <meta property="op:markup_version" content="v1.0">
        <meta property="fb:use_automatic_ad_placement" content="false">
    </head><body></body></html>"#;

    fn rule() -> InstantArticleRule {
        let getters = GetterRegistry::with_builtins();
        let property = |name: &str, selector: &str, attribute: &str| {
            PropertyDescriptor::new(&getters, name, "attribute", selector, Some(attribute)).unwrap()
        };
        let base = SelectorRule::new("head")
            .unwrap()
            .with_property(property(InstantArticleRule::PROPERTY_CANONICAL, "link[rel=canonical]", "href"))
            .with_property(property(InstantArticleRule::PROPERTY_CHARSET, "meta[charset]", "charset"))
            .with_property(property(
                InstantArticleRule::PROPERTY_MARKUP_VERSION,
                "meta[property=\"op:markup_version\"]",
                "content",
            ))
            .with_property(property(
                InstantArticleRule::PROPERTY_AUTO_AD_PLACEMENT,
                "meta[property=\"fb:use_automatic_ad_placement\"]",
                "content",
            ));
        InstantArticleRule::new(base).unwrap()
    }

    fn head(html: &Html) -> HtmlNode<'_> {
        let selector = Selector::parse("head").unwrap();
        selector.find_first(*html.root_element()).unwrap()
    }

    #[test]
    fn test_reads_document_metadata() {
        let html = Html::parse_document(HEAD);
        let mut transformer = Transformer::new();
        let context = Element::from(InstantArticle::create());

        let article = rule().apply(&mut transformer, context, head(&html)).unwrap().into_instant_article().unwrap();

        assert_eq!(article.canonical_url(), Some("https://example.com/story"));
        assert_eq!(article.charset(), Some("utf-8"));
        assert_eq!(article.markup_version(), Some("v1.0"));
        assert!(!article.is_automatic_ad_placed());
    }

    #[test]
    fn test_missing_canonical_is_content_error() {
        let html = Html::parse_document("<html><head><meta charset=\"utf-8\"></head></html>");
        let mut transformer = Transformer::new();
        let context = Element::from(InstantArticle::create());

        let result = rule().apply(&mut transformer, context, head(&html));
        assert!(matches!(
            result,
            Err(TransformError::MissingProperty { rule: "InstantArticleRule", ref property, .. })
                if property == "article.canonical"
        ));
    }

    #[test]
    fn test_canonical_definition_is_mandatory() {
        let result = InstantArticleRule::new(SelectorRule::new("head").unwrap());
        assert!(matches!(result, Err(TransformError::Config(_))));
    }
}

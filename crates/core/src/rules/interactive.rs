use crate::dom::HtmlNode;
use crate::elements::{ContextKind, Element, Interactive, InteractiveWidth};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule, missing};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::{Result, TransformError};

/// Turns an embed (iframe markup or source URL) into an [`Interactive`]
/// appended to the article body.
#[derive(Debug, Clone)]
pub struct InteractiveRule {
    base: SelectorRule,
}

impl InteractiveRule {
    pub const NAME: &'static str = "InteractiveRule";

    pub const PROPERTY_IFRAME: &'static str = "interactive.iframe";
    pub const PROPERTY_URL: &'static str = "interactive.url";
    pub const PROPERTY_WIDTH_NO_MARGIN: &'static str = Interactive::NO_MARGIN;
    pub const PROPERTY_WIDTH_COLUMN_WIDTH: &'static str = Interactive::COLUMN_WIDTH;
    pub const PROPERTY_HEIGHT: &'static str = "interactive.height";
    pub const PROPERTY_CAPTION: &'static str = "interactive.caption";

    const PROPERTIES: [&'static str; 6] = [
        Self::PROPERTY_IFRAME,
        Self::PROPERTY_URL,
        Self::PROPERTY_WIDTH_NO_MARGIN,
        Self::PROPERTY_WIDTH_COLUMN_WIDTH,
        Self::PROPERTY_HEIGHT,
        Self::PROPERTY_CAPTION,
    ];

    /// Wraps a selector rule; it must declare the iframe or the URL property.
    pub fn new(base: SelectorRule) -> Result<Self> {
        base.expect_any(Self::NAME, &[Self::PROPERTY_IFRAME, Self::PROPERTY_URL])?;
        Ok(Self { base })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Self::new(SelectorRule::from_config(config, getters, &Self::PROPERTIES)?)
    }

    fn height(&self, node: HtmlNode<'_>) -> Result<Option<u32>> {
        let Some(value) = self.base.truthy_property(Self::PROPERTY_HEIGHT, node) else {
            return Ok(None);
        };
        let text = value.into_text();
        let height = text.trim().parse::<u32>().map_err(|e| TransformError::InvalidValue {
            field: "interactive.height",
            value: text.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(height))
    }
}

impl Rule for InteractiveRule {
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
        let mut interactive = Interactive::create();

        let iframe = self.base.truthy_property(Self::PROPERTY_IFRAME, node);
        let url = self.base.truthy_property(Self::PROPERTY_URL, node);
        if iframe.is_none() && url.is_none() {
            return Err(missing(Self::NAME, Self::PROPERTY_IFRAME, node));
        }
        if let Some(iframe) = iframe {
            interactive = interactive.with_html(&iframe.into_markup())?;
        }
        if let Some(url) = url {
            interactive = interactive.with_source(&url.into_text())?;
        }

        let width = if self.base.truthy_property(Self::PROPERTY_WIDTH_COLUMN_WIDTH, node).is_some() {
            InteractiveWidth::ColumnWidth
        } else {
            InteractiveWidth::NoMargin
        };
        interactive = interactive.with_width(width);

        if let Some(height) = self.height(node)? {
            interactive = interactive.with_height(height)?;
        }

        let mut interactive = Element::from(interactive);
        if self.base.truthy_property(Self::PROPERTY_CAPTION, node).is_some() {
            interactive = transformer.transform(interactive, node)?;
        }

        Ok(article.add_child(interactive)?.into())
    }
}

use crate::dom::HtmlNode;
use crate::elements::{ContextKind, Element, Video, VideoPresentation};
use crate::getters::GetterRegistry;
use crate::rules::{Rule, SelectorRule};
use crate::ruleset::RuleConfig;
use crate::selector::Selector;
use crate::transformer::Transformer;
use crate::Result;

/// Turns a `<video>` (or any node carrying a video URL) into a [`Video`]
/// appended to the article body.
#[derive(Debug, Clone)]
pub struct VideoRule {
    base: SelectorRule,
}

impl VideoRule {
    pub const NAME: &'static str = "VideoRule";

    pub const PROPERTY_URL: &'static str = "video.url";
    pub const PROPERTY_TYPE: &'static str = "video.type";
    pub const PROPERTY_PRESENTATION: &'static str = "video.presentation";
    pub const PROPERTY_CONTROLS: &'static str = "video.controls";
    /// Autoplay is on unless this property reads `false`.
    pub const PROPERTY_AUTOPLAY: &'static str = "video.autoplay";
    pub const PROPERTY_CAPTION: &'static str = "video.caption";

    const PROPERTIES: [&'static str; 6] = [
        Self::PROPERTY_URL,
        Self::PROPERTY_TYPE,
        Self::PROPERTY_PRESENTATION,
        Self::PROPERTY_CONTROLS,
        Self::PROPERTY_AUTOPLAY,
        Self::PROPERTY_CAPTION,
    ];

    /// Wraps a selector rule; it must declare the URL property.
    pub fn new(base: SelectorRule) -> Result<Self> {
        base.expect_any(Self::NAME, &[Self::PROPERTY_URL])?;
        Ok(Self { base })
    }

    pub fn from_config(config: &RuleConfig, getters: &GetterRegistry) -> Result<Self> {
        Self::new(SelectorRule::from_config(config, getters, &Self::PROPERTIES)?)
    }
}

impl Rule for VideoRule {
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

        let url = self.base.require(Self::NAME, Self::PROPERTY_URL, node)?;
        let mut video = Video::create().with_url(&url.into_text())?;

        if let Some(content_type) = self.base.truthy_property(Self::PROPERTY_TYPE, node) {
            video = video.with_content_type(&content_type.into_text())?;
        }
        if let Some(presentation) = self.base.truthy_property(Self::PROPERTY_PRESENTATION, node) {
            video = video.with_presentation(presentation.into_text().parse::<VideoPresentation>()?);
        }
        if self.base.truthy_property(Self::PROPERTY_CONTROLS, node).is_some() {
            video = video.enable_controls();
        }
        if let Some(autoplay) = self.base.property(Self::PROPERTY_AUTOPLAY, node)
            && autoplay.into_text().trim() == "false"
        {
            video = video.disable_autoplay();
        }

        let mut video = Element::from(video);
        if self.base.truthy_property(Self::PROPERTY_CAPTION, node).is_some() {
            video = transformer.transform(video, node)?;
        }

        Ok(article.add_child(video)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;
    use crate::elements::InstantArticle;
    use crate::getters::PropertyDescriptor;
    use crate::rules::{CaptionRule, IgnoreRule};
    use scraper::Html;

    const FIGURE: &str = r#"<figure data-presentation="fullscreen"><video controls><source src="https://example.com/v.mp4" type="video/mp4"></video><figcaption>Launch</figcaption></figure>"#;

    fn rule() -> VideoRule {
        let getters = GetterRegistry::with_builtins();
        let property = |name: &str, kind: &str, selector: &str, attribute: Option<&str>| {
            PropertyDescriptor::new(&getters, name, kind, selector, attribute).unwrap()
        };
        let base = SelectorRule::new("figure")
            .unwrap()
            .with_property(property(VideoRule::PROPERTY_URL, "attribute", "source", Some("src")))
            .with_property(property(VideoRule::PROPERTY_TYPE, "attribute", "source", Some("type")))
            .with_property(property(VideoRule::PROPERTY_PRESENTATION, "attribute", "self", Some("data-presentation")))
            .with_property(property(VideoRule::PROPERTY_CONTROLS, "exists", "video[controls]", None))
            .with_property(property(VideoRule::PROPERTY_AUTOPLAY, "attribute", "self", Some("data-autoplay")))
            .with_property(property(VideoRule::PROPERTY_CAPTION, "element", "figcaption", None));
        VideoRule::new(base).unwrap()
    }

    #[test]
    fn test_video_with_caption() {
        let html = Html::parse_fragment(FIGURE);
        let figure = html.root_element().first_child().unwrap();
        let mut transformer = Transformer::new();
        transformer.add_rule(IgnoreRule::new("video", ContextKind::Video).unwrap());
        transformer.add_rule(CaptionRule::new("figcaption", ContextKind::Video).unwrap());

        let article = rule()
            .apply(&mut transformer, InstantArticle::create().into(), figure)
            .unwrap()
            .into_instant_article()
            .unwrap();

        let video = article.children()[0].clone().into_video().unwrap();
        assert_eq!(video.url(), Some("https://example.com/v.mp4"));
        assert_eq!(video.content_type(), Some("video/mp4"));
        assert_eq!(video.presentation(), Some(VideoPresentation::Fullscreen));
        assert!(video.is_controls_shown());
        assert!(video.is_autoplay());
        assert_eq!(video.caption().and_then(|c| c.title()), Some("Launch"));
        assert!(transformer.warnings().is_empty());
    }

    #[test]
    fn test_autoplay_disabled() {
        let html = Html::parse_fragment(
            r#"<figure data-autoplay="false"><video><source src="https://example.com/v.mp4"></video></figure>"#,
        );
        let figure = html.root_element().first_child().unwrap();
        let mut transformer = Transformer::new();

        let article = rule()
            .apply(&mut transformer, InstantArticle::create().into(), figure)
            .unwrap()
            .into_instant_article()
            .unwrap();
        let video = article.children()[0].clone().into_video().unwrap();
        assert!(!video.is_autoplay());
        assert!(!video.is_controls_shown());
    }

    #[test]
    fn test_missing_url() {
        let html = Html::parse_fragment("<figure><video></video></figure>");
        let figure = html.root_element().first_child().unwrap();
        let mut transformer = Transformer::new();

        let result = rule().apply(&mut transformer, InstantArticle::create().into(), figure);
        assert!(matches!(result, Err(TransformError::MissingProperty { rule: "VideoRule", .. })));
    }

    #[test]
    fn test_bad_presentation() {
        let html = Html::parse_fragment(
            r#"<figure data-presentation="letterbox"><video><source src="https://example.com/v.mp4"></video></figure>"#,
        );
        let figure = html.root_element().first_child().unwrap();
        let mut transformer = Transformer::new();

        let result = rule().apply(&mut transformer, InstantArticle::create().into(), figure);
        assert!(matches!(result, Err(TransformError::InvalidValue { field: "video.presentation", .. })));
    }
}

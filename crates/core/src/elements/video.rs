//! Video embeds.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::elements::{Caption, non_empty};
use crate::{Result, TransformError};

/// How a video is framed in the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoPresentation {
    AspectFit,
    AspectFitOnly,
    Fullscreen,
    NonInteractive,
}

impl VideoPresentation {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoPresentation::AspectFit => "aspect-fit",
            VideoPresentation::AspectFitOnly => "aspect-fit-only",
            VideoPresentation::Fullscreen => "fullscreen",
            VideoPresentation::NonInteractive => "non-interactive",
        }
    }
}

impl fmt::Display for VideoPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoPresentation {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "aspect-fit" => Ok(Self::AspectFit),
            "aspect-fit-only" => Ok(Self::AspectFitOnly),
            "fullscreen" => Ok(Self::Fullscreen),
            "non-interactive" => Ok(Self::NonInteractive),
            _ => Err(TransformError::InvalidValue {
                field: "video.presentation",
                value: s.to_string(),
                reason: "expected aspect-fit, aspect-fit-only, fullscreen or non-interactive".to_string(),
            }),
        }
    }
}

/// A hosted video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presentation: Option<VideoPresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<Caption>,
    autoplay: bool,
    controls: bool,
}

impl Default for Video {
    fn default() -> Self {
        Self { url: None, content_type: None, presentation: None, caption: None, autoplay: true, controls: false }
    }
}

impl Video {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: &str) -> Result<Self> {
        self.url = Some(non_empty("video.url", url)?);
        Ok(self)
    }

    /// Sets the MIME type, e.g. `video/mp4`.
    pub fn with_content_type(mut self, content_type: &str) -> Result<Self> {
        let content_type = non_empty("video.type", content_type)?;
        if !content_type.contains('/') {
            return Err(TransformError::InvalidValue {
                field: "video.type",
                value: content_type,
                reason: "expected a MIME type".to_string(),
            });
        }
        self.content_type = Some(content_type);
        Ok(self)
    }

    pub fn with_presentation(mut self, presentation: VideoPresentation) -> Self {
        self.presentation = Some(presentation);
        self
    }

    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn disable_autoplay(mut self) -> Self {
        self.autoplay = false;
        self
    }

    pub fn enable_controls(mut self) -> Self {
        self.controls = true;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn presentation(&self) -> Option<VideoPresentation> {
        self.presentation
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_controls_shown(&self) -> bool {
        self.controls
    }
}

//! Output document model.
//!
//! The transformer builds one of a closed set of article elements. Each
//! variant of [`Element`] doubles as a transform *context*: rules declare the
//! [`ContextKind`] they apply to, and the transformer compares it with the kind
//! of the element currently being built.
//!
//! Setters follow a consuming builder style (`with_x(self, ..) -> Result<Self>`)
//! and reject bad arguments with [`TransformError::InvalidValue`].

pub mod article;
pub mod caption;
pub mod header;
pub mod interactive;
pub mod video;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{Result, TransformError};

pub use article::InstantArticle;
pub use caption::Caption;
pub use header::Header;
pub use interactive::{Interactive, InteractiveWidth};
pub use video::{Video, VideoPresentation};

/// Identity of an [`Element`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContextKind {
    InstantArticle,
    Header,
    Interactive,
    Video,
    Caption,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::InstantArticle => "InstantArticle",
            ContextKind::Header => "Header",
            ContextKind::Interactive => "Interactive",
            ContextKind::Video => "Video",
            ContextKind::Caption => "Caption",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "InstantArticle" => Ok(Self::InstantArticle),
            "Header" => Ok(Self::Header),
            "Interactive" => Ok(Self::Interactive),
            "Video" => Ok(Self::Video),
            "Caption" => Ok(Self::Caption),
            _ => Err(TransformError::Config(format!(
                "Unknown context: {}. Valid options: InstantArticle, Header, Interactive, Video, Caption",
                s
            ))),
        }
    }
}

/// An article element under construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Element {
    InstantArticle(InstantArticle),
    Header(Header),
    Interactive(Interactive),
    Video(Video),
    Caption(Caption),
}

impl Element {
    pub fn kind(&self) -> ContextKind {
        match self {
            Element::InstantArticle(_) => ContextKind::InstantArticle,
            Element::Header(_) => ContextKind::Header,
            Element::Interactive(_) => ContextKind::Interactive,
            Element::Video(_) => ContextKind::Video,
            Element::Caption(_) => ContextKind::Caption,
        }
    }

    pub fn into_instant_article(self) -> Result<InstantArticle> {
        match self {
            Element::InstantArticle(article) => Ok(article),
            other => Err(mismatch(ContextKind::InstantArticle, &other)),
        }
    }

    pub fn into_header(self) -> Result<Header> {
        match self {
            Element::Header(header) => Ok(header),
            other => Err(mismatch(ContextKind::Header, &other)),
        }
    }

    pub fn into_interactive(self) -> Result<Interactive> {
        match self {
            Element::Interactive(interactive) => Ok(interactive),
            other => Err(mismatch(ContextKind::Interactive, &other)),
        }
    }

    pub fn into_video(self) -> Result<Video> {
        match self {
            Element::Video(video) => Ok(video),
            other => Err(mismatch(ContextKind::Video, &other)),
        }
    }

    /// Attaches a caption to elements that carry one.
    ///
    /// # Errors
    ///
    /// [`TransformError::ContextMismatch`] for elements without a caption slot.
    pub fn with_caption(self, caption: Caption) -> Result<Element> {
        match self {
            Element::Interactive(interactive) => Ok(Element::Interactive(interactive.with_caption(caption))),
            Element::Video(video) => Ok(Element::Video(video.with_caption(caption))),
            other => Err(mismatch(ContextKind::Interactive, &other)),
        }
    }
}

fn mismatch(expected: ContextKind, found: &Element) -> TransformError {
    TransformError::ContextMismatch { expected, found: found.kind() }
}

impl From<InstantArticle> for Element {
    fn from(article: InstantArticle) -> Self {
        Element::InstantArticle(article)
    }
}

impl From<Header> for Element {
    fn from(header: Header) -> Self {
        Element::Header(header)
    }
}

impl From<Interactive> for Element {
    fn from(interactive: Interactive) -> Self {
        Element::Interactive(interactive)
    }
}

impl From<Video> for Element {
    fn from(video: Video) -> Self {
        Element::Video(video)
    }
}

impl From<Caption> for Element {
    fn from(caption: Caption) -> Self {
        Element::Caption(caption)
    }
}

/// Rejects empty or whitespace-only strings for a required text field.
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransformError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

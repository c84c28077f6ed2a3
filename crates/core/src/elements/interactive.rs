//! Embedded interactive content (iframes, inline HTML widgets).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::elements::{Caption, non_empty};
use crate::{Result, TransformError};

/// Horizontal layout of an interactive embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractiveWidth {
    /// Full bleed, no side margin.
    NoMargin,
    /// Same width as the text column.
    ColumnWidth,
}

impl InteractiveWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractiveWidth::NoMargin => Interactive::NO_MARGIN,
            InteractiveWidth::ColumnWidth => Interactive::COLUMN_WIDTH,
        }
    }
}

impl fmt::Display for InteractiveWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractiveWidth {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Interactive::NO_MARGIN => Ok(Self::NoMargin),
            Interactive::COLUMN_WIDTH => Ok(Self::ColumnWidth),
            _ => Err(TransformError::InvalidValue {
                field: "interactive.width",
                value: s.to_string(),
                reason: format!("expected {} or {}", Interactive::NO_MARGIN, Interactive::COLUMN_WIDTH),
            }),
        }
    }
}

/// An interactive embed: inline markup, a source URL, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Interactive {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<InteractiveWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<Caption>,
}

impl Interactive {
    pub const NO_MARGIN: &'static str = "no-margin";
    pub const COLUMN_WIDTH: &'static str = "column-width";

    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: &str) -> Result<Self> {
        self.source = Some(non_empty("interactive.url", source)?);
        Ok(self)
    }

    pub fn with_html(mut self, html: &str) -> Result<Self> {
        self.html = Some(non_empty("interactive.iframe", html)?);
        Ok(self)
    }

    pub fn with_width(mut self, width: InteractiveWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the height in pixels.
    ///
    /// # Errors
    ///
    /// A zero height is rejected.
    pub fn with_height(mut self, height: u32) -> Result<Self> {
        if height == 0 {
            return Err(TransformError::InvalidValue {
                field: "interactive.height",
                value: height.to_string(),
                reason: "must be a positive number of pixels".to_string(),
            });
        }
        self.height = Some(height);
        Ok(self)
    }

    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn width(&self) -> Option<InteractiveWidth> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }
}

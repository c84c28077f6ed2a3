//! The article document root.

use serde::Serialize;
use url::Url;

use crate::elements::{ContextKind, Element, Header, non_empty};
use crate::{Result, TransformError};

/// Root of a converted document: metadata, header and body elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markup_version: Option<String>,
    auto_ad_placement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<Header>,
    children: Vec<Element>,
}

impl Default for InstantArticle {
    fn default() -> Self {
        Self {
            canonical_url: None,
            charset: None,
            markup_version: None,
            auto_ad_placement: true,
            header: None,
            children: Vec::new(),
        }
    }
}

impl InstantArticle {
    pub fn create() -> Self {
        Self::default()
    }

    /// Sets the canonical URL.
    ///
    /// # Errors
    ///
    /// The URL must be absolute.
    pub fn with_canonical_url(mut self, url: &str) -> Result<Self> {
        let url = url.trim();
        Url::parse(url).map_err(|e| TransformError::InvalidValue {
            field: "article.canonical",
            value: url.to_string(),
            reason: e.to_string(),
        })?;
        self.canonical_url = Some(url.to_string());
        Ok(self)
    }

    pub fn with_charset(mut self, charset: &str) -> Result<Self> {
        self.charset = Some(non_empty("article.charset", charset)?);
        Ok(self)
    }

    pub fn with_markup_version(mut self, version: &str) -> Result<Self> {
        self.markup_version = Some(non_empty("article.markup.version", version)?);
        Ok(self)
    }

    pub fn enable_automatic_ad_placement(mut self) -> Self {
        self.auto_ad_placement = true;
        self
    }

    pub fn disable_automatic_ad_placement(mut self) -> Self {
        self.auto_ad_placement = false;
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// Appends a body element.
    ///
    /// # Errors
    ///
    /// Only interactive and video elements belong in the article body.
    pub fn add_child(mut self, child: Element) -> Result<Self> {
        match child.kind() {
            ContextKind::Interactive | ContextKind::Video => {
                self.children.push(child);
                Ok(self)
            }
            found => Err(TransformError::InvalidValue {
                field: "article.children",
                value: found.to_string(),
                reason: "not a body element".to_string(),
            }),
        }
    }

    pub fn canonical_url(&self) -> Option<&str> {
        self.canonical_url.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn markup_version(&self) -> Option<&str> {
        self.markup_version.as_deref()
    }

    pub fn is_automatic_ad_placed(&self) -> bool {
        self.auto_ad_placement
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

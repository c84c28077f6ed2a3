use serde::Serialize;

use crate::Result;
use crate::elements::non_empty;

/// Article header: title and kicker.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kicker: Option<String>,
}

impl Header {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Result<Self> {
        self.title = Some(non_empty("header.title", title)?);
        Ok(self)
    }

    pub fn with_kicker(mut self, kicker: &str) -> Result<Self> {
        self.kicker = Some(non_empty("header.kicker", kicker)?);
        Ok(self)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn kicker(&self) -> Option<&str> {
        self.kicker.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.kicker.is_none()
    }
}

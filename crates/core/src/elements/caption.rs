use serde::Serialize;

use crate::Result;
use crate::elements::non_empty;

/// Caption attached to a media or interactive element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Caption {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit: Option<String>,
}

impl Caption {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Result<Self> {
        self.title = Some(non_empty("caption.title", title)?);
        Ok(self)
    }

    pub fn with_credit(mut self, credit: &str) -> Result<Self> {
        self.credit = Some(non_empty("caption.credit", credit)?);
        Ok(self)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn credit(&self) -> Option<&str> {
        self.credit.as_deref()
    }
}

// src/models/flash.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }
}

/// A one-time status message shown on the next rendered page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> String {
        format!("flash flash-{}", self.level.as_str())
    }
}

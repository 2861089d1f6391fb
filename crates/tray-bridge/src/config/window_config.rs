use crate::config::{default_window_height, default_window_title, default_window_width};

use serde::{Deserialize, Serialize};

/// Top-level host window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title.
    #[serde(default = "default_window_title")]
    pub title: String,
    /// Initial client width in pixels.
    #[serde(default = "default_window_width")]
    pub width: u32,
    /// Initial client height in pixels.
    #[serde(default = "default_window_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

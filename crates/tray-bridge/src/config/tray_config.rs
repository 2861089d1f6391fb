use crate::config::{default_channel_capacity, default_tooltip};

use serde::{Deserialize, Serialize};

/// Notification-area settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Tooltip shown before the UI runtime supplies one.
    #[serde(default = "default_tooltip")]
    pub default_tooltip: String,
    /// Bounded capacity of the bridge call and event channels.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            default_tooltip: default_tooltip(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod tray_config;
mod window_config;

pub use {
    config::HostConfig, logging_config::LoggingConfig, tray_config::TrayConfig,
    window_config::WindowConfig,
};

pub(crate) const DEFAULT_WINDOW_TITLE: &str = "Tray Bridge";
pub(crate) const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub(crate) const DEFAULT_WINDOW_HEIGHT: u32 = 720;
pub(crate) const DEFAULT_TOOLTIP: &str = "Tray Bridge";
pub(crate) const DEFAULT_CHANNEL_CAPACITY: usize = 32;
pub(crate) const DEFAULT_LOG_FILTER: &str = "tray_bridge=debug,tray_bridge_core=debug";

pub(crate) fn default_window_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

pub(crate) fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}

pub(crate) fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

pub(crate) fn default_tooltip() -> String {
    DEFAULT_TOOLTIP.to_string()
}

pub(crate) fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

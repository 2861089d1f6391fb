//! Native desktop host for an embedded UI runtime: a top-level window,
//! a notification-area icon with a dynamic context menu, and the async
//! call bridge the runtime drives them through.
//!
//! Platform integration (the window and the Win32 shell backend) is
//! compiled on Windows only; configuration, error types, and the
//! tracing bootstrap are portable, as is everything in
//! `tray-bridge-core`.

mod config;
mod error;
#[cfg(target_os = "windows")]
mod host_window;
#[cfg(target_os = "windows")]
mod shell_win32;
mod telemetry;


pub use {
    config::{HostConfig, LoggingConfig, TrayConfig, WindowConfig},
    error::{AppError, Result as AppResult},
    telemetry::init_tracing,
};

#[cfg(target_os = "windows")]
pub use {
    host_window::{BRIDGE_WAKE_MESSAGE, BridgeWaker, FIRST_FRAME_MESSAGE, HostWindow},
    shell_win32::Win32Shell,
};

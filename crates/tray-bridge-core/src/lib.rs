//! Tray-Bridge Core Library
//!
//! Platform-neutral state machine for a native system tray host: the
//! call bridge protocol, tray icon state, popup menu sessions, and the
//! window message router. The OS enters only through the
//! [`ShellBackend`] and [`UiRuntime`] seams, so everything here is
//! testable with in-memory fakes.
//!
//! # Example
//!
//! ```
//! use tray_bridge_core::{
//!     CallEnvelope, CallResult, METHOD_INITIALIZE_TRAY, PopupEntry, Result,
//!     SYSTEM_TRAY_ENDPOINT, ShellBackend, TrayHost, bridge_channel,
//! };
//!
//! use serde_json::json;
//!
//! struct NullShell;
//!
//! impl ShellBackend for NullShell {
//!     fn add_icon(&mut self, _tooltip: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn modify_icon(&mut self, _tooltip: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn remove_icon(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn show_popup_menu(&mut self, _entries: &[PopupEntry]) -> Result<Option<u32>> {
//!         Ok(None)
//!     }
//!     fn do_not_disturb_active(&mut self) -> Result<bool> {
//!         Ok(false)
//!     }
//! }
//!
//! let (_messenger, bridge) = bridge_channel(32);
//! let mut host = TrayHost::new(NullShell, bridge.event_sender());
//!
//! let call = CallEnvelope::new(
//!     SYSTEM_TRAY_ENDPOINT,
//!     METHOD_INITIALIZE_TRAY,
//!     json!({ "tooltip": "My App" }),
//! );
//! assert_eq!(host.handle_call(&call), CallResult::ok());
//! assert!(host.state().registered());
//! ```

mod bridge;
mod error;
mod host;
mod menu;
mod popup;
mod router;
mod shell;
#[cfg(test)]
mod tests;
mod tray_state;

pub use {
    bridge::{
        BridgeHost, CallArgs, CallEnvelope, CallResult, DESKTOP_NOTIFICATIONS_ENDPOINT,
        EVENT_TRAY_MENU_ITEM_CLICK, IncomingCall, METHOD_INITIALIZE_TRAY,
        METHOD_IS_DO_NOT_DISTURB_ENABLED, METHOD_UPDATE_TRAY, Messenger, OutboundEvent,
        SYSTEM_TRAY_ENDPOINT, bridge_channel,
    },
    error::{BridgeError, Result},
    host::TrayHost,
    menu::{COMMAND_ID_BASE, CommandMap, MenuItemDescriptor, MenuSnapshot, parse_menu_items},
    popup::{PopupOutcome, PopupSession},
    router::{
        MSG_FONTCHANGE, MSG_LBUTTONUP, MSG_RBUTTONUP, Routed, TRAY_CALLBACK_MESSAGE, UiRuntime,
        WindowMessage, route_message,
    },
    shell::{PopupEntry, ShellBackend},
    tray_state::{TOOLTIP_MAX_CHARS, TrayState},
};

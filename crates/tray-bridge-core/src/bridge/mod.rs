//! Typed asynchronous call bridge between the UI layer and the native host.
//!
//! Two inbound endpoints and one outbound event, modeled as explicit
//! protocol types over a tokio channel pair. The payload is a
//! [`serde_json::Value`] so callers can pass loosely shaped argument maps;
//! [`CallArgs`] provides typed extraction that fails with a
//! [`BridgeError`](crate::BridgeError) instead of panicking on mismatch.

mod args;
mod envelope;
mod messenger;

pub(crate) use args::type_name as args_type_name;

pub use {
    args::CallArgs,
    envelope::{CallEnvelope, CallResult},
    messenger::{BridgeHost, IncomingCall, Messenger, OutboundEvent, bridge_channel},
};

/// Endpoint carrying tray control calls and the menu click event.
pub const SYSTEM_TRAY_ENDPOINT: &str = "host/system_tray";

/// Endpoint carrying the stateless desktop notification query.
pub const DESKTOP_NOTIFICATIONS_ENDPOINT: &str = "host/desktop_notifications";

/// Creates the tray icon and registers it with the OS shell.
pub const METHOD_INITIALIZE_TRAY: &str = "initializeTray";

/// Replaces tooltip and/or menu and re-syncs the shell icon.
pub const METHOD_UPDATE_TRAY: &str = "updateTray";

/// Queries the OS do-not-disturb state.
pub const METHOD_IS_DO_NOT_DISTURB_ENABLED: &str = "isDoNotDisturbEnabled";

/// Outbound event name for a tray menu selection.
pub const EVENT_TRAY_MENU_ITEM_CLICK: &str = "onTrayMenuItemClick";

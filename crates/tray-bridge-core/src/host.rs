//! The tray host facade: call dispatch, popup sessions, teardown.

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::{
    BridgeError, CallArgs, CallEnvelope, CallResult, DESKTOP_NOTIFICATIONS_ENDPOINT,
    METHOD_INITIALIZE_TRAY, METHOD_IS_DO_NOT_DISTURB_ENABLED, METHOD_UPDATE_TRAY,
    OutboundEvent, Result, SYSTEM_TRAY_ENDPOINT,
    menu::parse_menu_items,
    popup::{PopupOutcome, PopupSession},
    shell::ShellBackend,
    tray_state::TrayState,
};

/// The tray/menu state machine behind the call bridge.
///
/// Owns the shell backend, the tray state, and the outbound event
/// sender, all injected at construction, so tests build isolated
/// instances around a fake shell. Everything here runs on the UI
/// message thread; nothing blocks except an open popup session.
pub struct TrayHost<S: ShellBackend> {
    shell: S,
    state: TrayState,
    event_tx: mpsc::Sender<OutboundEvent>,
}

impl<S: ShellBackend> TrayHost<S> {
    /// Builds a host around a shell backend and an event channel.
    pub fn new(shell: S, event_tx: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            shell,
            state: TrayState::new(),
            event_tx,
        }
    }

    /// Read-only view of the tray state.
    pub fn state(&self) -> &TrayState {
        &self.state
    }

    /// Read-only view of the shell backend.
    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Dispatches one inbound call to its handler.
    ///
    /// Unknown methods and unknown endpoints get
    /// [`CallResult::NotImplemented`], never an error.
    #[instrument(skip(self, call), fields(endpoint = %call.endpoint, method = %call.method))]
    pub fn handle_call(&mut self, call: &CallEnvelope) -> CallResult {
        match (call.endpoint.as_str(), call.method.as_str()) {
            (SYSTEM_TRAY_ENDPOINT, METHOD_INITIALIZE_TRAY) => self.initialize_tray(&call.args),
            (SYSTEM_TRAY_ENDPOINT, METHOD_UPDATE_TRAY) => self.update_tray(&call.args),
            (DESKTOP_NOTIFICATIONS_ENDPOINT, METHOD_IS_DO_NOT_DISTURB_ENABLED) => {
                self.query_do_not_disturb()
            }
            _ => {
                debug!("Method not implemented");
                CallResult::NotImplemented
            }
        }
    }

    /// Runs one popup session against the current menu and emits the
    /// click event on selection.
    ///
    /// Blocks until the user selects or dismisses. Callers invoke this
    /// from the tray callback path of the window message router.
    pub fn open_menu(&mut self) -> Result<PopupOutcome> {
        let session = PopupSession::build(self.state.menu());
        let outcome = session.display(&mut self.shell)?;

        if let PopupOutcome::Selected(action_id) = &outcome {
            self.emit_menu_click(action_id.clone());
        }

        Ok(outcome)
    }

    /// Releases the shell icon registration. Called on window teardown;
    /// the removal reaches the OS at most once however often teardown
    /// paths run.
    pub fn shutdown(&mut self) {
        if let Err(error) = self.state.remove_from_shell(&mut self.shell) {
            warn!(error = %error, "Failed to remove tray icon during teardown");
        }
    }

    fn initialize_tray(&mut self, args: &Value) -> CallResult {
        // Arguments are optional here; a map may carry a tooltip.
        if args.is_object() {
            let args = match CallArgs::from_value(args) {
                Ok(parsed) => parsed,
                Err(error) => return CallResult::from(&error),
            };
            match args.opt_str("tooltip") {
                Ok(Some(tooltip)) => self.state.set_tooltip(tooltip),
                Ok(None) => {}
                Err(error) => return CallResult::from(&error),
            }
        }

        self.sync_shell();
        info!(tooltip = %self.state.tooltip(), "Tray icon initialized");
        CallResult::ok()
    }

    fn update_tray(&mut self, args: &Value) -> CallResult {
        let args = match CallArgs::from_value(args) {
            Ok(parsed) => parsed,
            Err(error) => return CallResult::from(&error),
        };

        // Validate everything before touching state, so a malformed
        // payload leaves tooltip and menu exactly as they were.
        let tooltip = match args.opt_str("tooltip") {
            Ok(value) => value,
            Err(error) => return CallResult::from(&error),
        };

        let menu = match args.opt_list("menuItems") {
            Ok(Some(items)) => match parse_menu_items(items) {
                Ok(snapshot) => Some(snapshot),
                Err(error) => return CallResult::from(&error),
            },
            Ok(None) => None,
            Err(error) => return CallResult::from(&error),
        };

        if let Some(tooltip) = tooltip {
            self.state.set_tooltip(tooltip);
        }
        if let Some(snapshot) = menu {
            self.state.replace_menu(snapshot);
        }

        // An empty update is a no-op on state but still re-syncs.
        self.sync_shell();
        CallResult::ok()
    }

    fn query_do_not_disturb(&mut self) -> CallResult {
        let active = match self.shell.do_not_disturb_active() {
            Ok(active) => active,
            Err(error) => {
                // A failed query reports "not disturbed", never an error.
                debug!(error = %error, "Notification state query failed");
                false
            }
        };

        CallResult::Success(Value::Bool(active))
    }

    fn sync_shell(&mut self) {
        // Shell failures are recoverable: log and keep the call successful.
        if let Err(error) = self.state.push_to_shell(&mut self.shell) {
            warn!(error = %error, "Tray icon shell sync failed");
        }
    }

    fn emit_menu_click(&self, action_id: String) {
        let event = OutboundEvent::TrayMenuItemClick { action_id };
        if let Err(error) = self.event_tx.try_send(event) {
            let error = BridgeError::EventDispatchFailed {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
            warn!(error = %error, "Dropped tray menu click event");
        }
    }
}

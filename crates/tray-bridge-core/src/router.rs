//! Stateless routing of raw window messages.

use tracing::trace;

/// The private callback message the tray icon registration asks the
/// shell to deliver (`WM_USER + 1`).
pub const TRAY_CALLBACK_MESSAGE: u32 = 0x0400 + 1;

/// `WM_FONTCHANGE`
pub const MSG_FONTCHANGE: u32 = 0x001D;

/// `WM_LBUTTONUP`
pub const MSG_LBUTTONUP: u32 = 0x0202;

/// `WM_RBUTTONUP`
pub const MSG_RBUTTONUP: u32 = 0x0205;

/// One raw OS window message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMessage {
    /// Message code.
    pub message: u32,
    /// First message parameter.
    pub wparam: usize,
    /// Second message parameter. For tray callback messages this
    /// carries the mouse sub-event.
    pub lparam: isize,
}

/// The embedded UI runtime, as seen by the router.
pub trait UiRuntime {
    /// Offers a message to the runtime. `Some(value)` means the runtime
    /// claimed it and `value` is the authoritative result.
    fn handle_window_message(&mut self, message: &WindowMessage) -> Option<isize>;

    /// Asks the runtime to reload system fonts.
    fn reload_system_fonts(&mut self);
}

/// What a message routed to. Exactly one outcome per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// The UI runtime claimed the message; no further routing happened.
    Claimed(isize),
    /// A font-change notification; the runtime was told to reload fonts.
    FontsReloaded,
    /// A tray icon button-up; the caller should open the tray menu.
    TrayInteraction,
    /// None of the above; fall through to default window handling.
    Unhandled,
}

/// Routes one message: UI runtime first, then font-change, then tray
/// callback, otherwise unhandled.
pub fn route_message<U: UiRuntime>(ui: &mut U, message: &WindowMessage) -> Routed {
    if let Some(result) = ui.handle_window_message(message) {
        return Routed::Claimed(result);
    }

    match message.message {
        MSG_FONTCHANGE => {
            ui.reload_system_fonts();
            Routed::FontsReloaded
        }
        TRAY_CALLBACK_MESSAGE => {
            // The sub-event rides in lparam; only button-up opens the menu.
            let sub_event = message.lparam as u32;
            if sub_event == MSG_RBUTTONUP || sub_event == MSG_LBUTTONUP {
                Routed::TrayInteraction
            } else {
                trace!(sub_event, "Ignored tray callback sub-event");
                Routed::Unhandled
            }
        }
        _ => Routed::Unhandled,
    }
}

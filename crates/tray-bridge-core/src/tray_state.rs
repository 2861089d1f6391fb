//! Tray icon state: tooltip, registration flag, and the current menu.

use tracing::debug;

use crate::{
    Result,
    menu::MenuSnapshot,
    shell::ShellBackend,
};

/// Longest tooltip kept, in characters.
///
/// The Win32 `NOTIFYICONDATA` tip buffer holds 128 UTF-16 units
/// including the terminator; longer tooltips are silently truncated,
/// never rejected.
pub const TOOLTIP_MAX_CHARS: usize = 127;

/// Single-instance state behind the tray icon.
///
/// Mutated only by the call bridge handlers; the popup state machine
/// reads it through a cloned [`MenuSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct TrayState {
    tooltip: String,
    registered: bool,
    menu: MenuSnapshot,
}

impl TrayState {
    /// Fresh state: empty tooltip, empty menu, not registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tooltip, truncating to [`TOOLTIP_MAX_CHARS`].
    pub fn set_tooltip(&mut self, tooltip: &str) {
        self.tooltip = tooltip.chars().take(TOOLTIP_MAX_CHARS).collect();
    }

    /// Current tooltip text.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Whether the icon is currently registered with the shell.
    pub fn registered(&self) -> bool {
        self.registered
    }

    /// Replaces the menu wholesale. No merging, no diffing.
    pub fn replace_menu(&mut self, snapshot: MenuSnapshot) {
        debug!(items = snapshot.len(), "Menu snapshot replaced");
        self.menu = snapshot;
    }

    /// A point-in-time handle to the current menu (cheap Arc clone).
    pub fn menu(&self) -> MenuSnapshot {
        self.menu.clone()
    }

    /// Syncs this state to the shell: ADD on the first sync, MODIFY
    /// thereafter. The registered flag only flips once an ADD succeeds,
    /// so a failed registration is retried on the next sync.
    pub fn push_to_shell<S: ShellBackend>(&mut self, shell: &mut S) -> Result<()> {
        if self.registered {
            shell.modify_icon(&self.tooltip)
        } else {
            shell.add_icon(&self.tooltip)?;
            self.registered = true;
            Ok(())
        }
    }

    /// Releases the shell registration. Safe to call on any teardown
    /// path; the flag guarantees the OS-side removal happens at most once.
    pub fn remove_from_shell<S: ShellBackend>(&mut self, shell: &mut S) -> Result<()> {
        if !self.registered {
            return Ok(());
        }
        shell.remove_icon()?;
        self.registered = false;
        Ok(())
    }
}

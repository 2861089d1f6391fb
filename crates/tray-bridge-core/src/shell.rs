//! The seam between the tray state machine and the OS desktop shell.

use crate::Result;

/// A menu entry in the form the OS popup API consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEntry {
    /// A visual divider.
    Separator,
    /// A labeled entry tagged with its session command id.
    Item {
        /// Command id the OS reports back on selection.
        command: u32,
        /// Display text.
        label: String,
        /// Disabled entries render non-interactive but keep their position.
        enabled: bool,
    },
}

/// OS shell operations the tray host depends on.
///
/// The production implementation wraps `Shell_NotifyIcon` and
/// `TrackPopupMenu`; tests substitute an in-memory fake. Handing the
/// backend to [`TrayHost`](crate::TrayHost) at construction is what
/// makes isolated instances possible.
pub trait ShellBackend {
    /// Registers the tray icon with the shell (first sync only).
    fn add_icon(&mut self, tooltip: &str) -> Result<()>;

    /// Updates the already-registered tray icon.
    fn modify_icon(&mut self, tooltip: &str) -> Result<()>;

    /// Removes the tray icon from the shell.
    fn remove_icon(&mut self) -> Result<()>;

    /// Shows the popup menu modally at the cursor and blocks until the
    /// user selects an entry or dismisses the menu.
    ///
    /// Returns the selected command id, or `None` on dismissal. The
    /// transient native menu must be released before returning, on both
    /// paths. An empty entry list still shows a popup; what the OS
    /// renders for it is OS-defined.
    fn show_popup_menu(&mut self, entries: &[PopupEntry]) -> Result<Option<u32>>;

    /// Whether the OS reports a do-not-disturb-like state (busy,
    /// full-screen exclusive, or presentation mode).
    fn do_not_disturb_active(&mut self) -> Result<bool>;
}

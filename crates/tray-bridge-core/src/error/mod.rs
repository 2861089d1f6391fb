use error_location::ErrorLocation;
use thiserror::Error;

/// Tray host errors with source location tracking.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Call arguments did not have the required shape.
    #[error("Invalid arguments: {reason} {location}")]
    InvalidArguments {
        /// Description of the shape violation.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A menu item entry in an update payload was malformed.
    ///
    /// Surfaced instead of aborting on a type mismatch; the whole
    /// update is rejected atomically, so no partial menu is applied.
    #[error("Invalid menu item at index {index}: {reason} {location}")]
    InvalidMenuItem {
        /// Position of the offending entry in the `menuItems` list.
        index: usize,
        /// Description of the malformation.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The OS shell rejected an icon add/modify/remove operation.
    #[error("Shell sync failed: {reason} {location}")]
    ShellSyncFailed {
        /// Description of the shell failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Displaying the popup menu failed at the OS level.
    #[error("Popup display failed: {reason} {location}")]
    PopupFailed {
        /// Description of the popup failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An outbound event could not be handed to the bridge channel.
    #[error("Event dispatch failed: {message} {location}")]
    EventDispatchFailed {
        /// Human-readable error message.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host side of the bridge went away before replying.
    #[error("Bridge closed: {message} {location}")]
    BridgeClosed {
        /// Human-readable error message.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl BridgeError {
    /// Wire error code reported to the UI layer in a [`CallResult::Error`].
    ///
    /// [`CallResult::Error`]: crate::CallResult::Error
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            BridgeError::InvalidMenuItem { .. } => "INVALID_MENU_ITEM",
            BridgeError::ShellSyncFailed { .. } => "SHELL_SYNC_FAILED",
            BridgeError::PopupFailed { .. } => "POPUP_FAILED",
            BridgeError::EventDispatchFailed { .. } => "EVENT_DISPATCH_FAILED",
            BridgeError::BridgeClosed { .. } => "BRIDGE_CLOSED",
        }
    }
}

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

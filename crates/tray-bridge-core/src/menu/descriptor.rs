/// A single tray context menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemDescriptor {
    /// A visual divider. Never clickable, never carries a command id.
    Separator,
    /// A clickable entry identified by a caller-defined action id.
    Action {
        /// Display text.
        label: String,
        /// Whether the entry is interactive. Disabled entries still
        /// occupy their position so command-id mapping stays stable.
        enabled: bool,
        /// Opaque identifier reported back on selection. Uniqueness is
        /// the caller's responsibility; the host does not deduplicate.
        action_id: String,
    },
}

impl MenuItemDescriptor {
    /// Convenience constructor for an [`MenuItemDescriptor::Action`].
    pub fn action(
        label: impl Into<String>,
        enabled: bool,
        action_id: impl Into<String>,
    ) -> Self {
        MenuItemDescriptor::Action {
            label: label.into(),
            enabled,
            action_id: action_id.into(),
        }
    }
}

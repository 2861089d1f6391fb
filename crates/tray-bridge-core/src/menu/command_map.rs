use crate::menu::{MenuItemDescriptor, MenuSnapshot};

/// First command id handed to the OS menu; entry `i` gets `BASE + i`.
pub const COMMAND_ID_BASE: u32 = 1000;

/// Ordered association from OS command ids to action ids.
///
/// Built fresh for every popup session from that session's snapshot, so
/// no index arithmetic leaks past the session boundary: a command id
/// returned by the OS is only ever resolved through this table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMap {
    entries: Vec<(u32, String)>,
}

impl CommandMap {
    /// Builds the table for a snapshot.
    ///
    /// Separators get no command id. Disabled actions are included so
    /// positions (and therefore ids) stay stable across the whole menu.
    pub fn from_snapshot(snapshot: &MenuSnapshot) -> Self {
        let entries = snapshot
            .items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                MenuItemDescriptor::Separator => None,
                MenuItemDescriptor::Action { action_id, .. } => {
                    Some((COMMAND_ID_BASE + index as u32, action_id.clone()))
                }
            })
            .collect();

        Self { entries }
    }

    /// Resolves a command id to its action id, `None` for unknown ids.
    pub fn action_for(&self, command: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == command)
            .map(|(_, action_id)| action_id.as_str())
    }

    /// Number of clickable entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no clickable entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

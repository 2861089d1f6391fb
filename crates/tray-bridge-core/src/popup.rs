//! Popup session state machine: `Idle → Building → Displayed →
//! (Selected | Dismissed) → Idle`.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    Result,
    menu::{COMMAND_ID_BASE, CommandMap, MenuItemDescriptor, MenuSnapshot},
    shell::{PopupEntry, ShellBackend},
};

/// How a popup session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    /// The user selected an action entry; carries its action id.
    Selected(String),
    /// The user dismissed the menu (click-away, Escape).
    Dismissed,
}

/// One open-to-close lifecycle of the tray context menu.
///
/// Built from a cloned snapshot, so a tray update arriving while the
/// menu is open (possible through the OS's re-entrant modal message
/// pumping) mutates the tray state but never what this session shows
/// or resolves against.
#[derive(Debug)]
pub struct PopupSession {
    id: Uuid,
    snapshot: MenuSnapshot,
    commands: CommandMap,
    entries: Vec<PopupEntry>,
}

impl PopupSession {
    /// `Idle → Building`: captures the snapshot and constructs the
    /// shell entry list plus the command table for this session.
    pub fn build(snapshot: MenuSnapshot) -> Self {
        let commands = CommandMap::from_snapshot(&snapshot);

        let entries = snapshot
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                MenuItemDescriptor::Separator => PopupEntry::Separator,
                MenuItemDescriptor::Action { label, enabled, .. } => PopupEntry::Item {
                    command: COMMAND_ID_BASE + index as u32,
                    label: label.clone(),
                    enabled: *enabled,
                },
            })
            .collect();

        let id = Uuid::new_v4();
        debug!(session_id = %id, items = snapshot.len(), "Popup session built");

        Self {
            id,
            snapshot,
            commands,
            entries,
        }
    }

    /// The shell-facing entries, in display order.
    pub fn entries(&self) -> &[PopupEntry] {
        &self.entries
    }

    /// The snapshot this session was built from.
    pub fn snapshot(&self) -> &MenuSnapshot {
        &self.snapshot
    }

    /// `Building → Displayed → (Selected | Dismissed)`.
    ///
    /// Blocks the calling thread until the user selects or dismisses;
    /// this is the single blocking point of the component. An empty
    /// menu is still shown (OS-defined rendering).
    #[instrument(skip(self, shell), fields(session_id = %self.id))]
    pub fn display<S: ShellBackend>(self, shell: &mut S) -> Result<PopupOutcome> {
        let chosen = shell.show_popup_menu(&self.entries)?;

        match chosen.and_then(|command| self.commands.action_for(command)) {
            Some(action_id) => {
                info!(action_id = %action_id, "Tray menu entry selected");
                Ok(PopupOutcome::Selected(action_id.to_string()))
            }
            None => {
                debug!("Tray menu dismissed");
                Ok(PopupOutcome::Dismissed)
            }
        }
    }
}

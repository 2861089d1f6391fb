use crate::{
    COMMAND_ID_BASE, MenuItemDescriptor, MenuSnapshot, PopupEntry, PopupOutcome, PopupSession,
    TrayState, tests::fakes::FakeShell,
};

fn three_entry_snapshot() -> MenuSnapshot {
    MenuSnapshot::from_items(vec![
        MenuItemDescriptor::action("A", true, "a1"),
        MenuItemDescriptor::Separator,
        MenuItemDescriptor::action("B", false, "b1"),
    ])
}

/// WHAT: Building a session lays out entries positionally
/// WHY: The shell renders exactly what the snapshot describes
#[test]
fn given_snapshot_when_building_session_then_entries_mirror_items() {
    // Given/When: A session over action, separator, disabled action
    let session = PopupSession::build(three_entry_snapshot());

    // Then: Entries keep order, ids, and the enabled flag
    assert_eq!(
        session.entries(),
        &[
            PopupEntry::Item {
                command: COMMAND_ID_BASE,
                label: "A".to_string(),
                enabled: true,
            },
            PopupEntry::Separator,
            PopupEntry::Item {
                command: COMMAND_ID_BASE + 2,
                label: "B".to_string(),
                enabled: false,
            },
        ]
    );
}

/// WHAT: Selecting the first entry resolves to its action id
/// WHY: The command-to-action mapping is the point of the session
#[test]
fn given_session_when_first_entry_selected_then_outcome_carries_action_id() {
    // Given: A shell scripted to pick the first command
    let mut shell = FakeShell {
        next_selection: Some(COMMAND_ID_BASE),
        ..FakeShell::default()
    };

    // When: Displaying the session
    let outcome = PopupSession::build(three_entry_snapshot()).display(&mut shell);

    // Then: Selected("a1")
    assert!(matches!(
        outcome,
        Ok(PopupOutcome::Selected(ref id)) if id == "a1"
    ));
}

/// WHAT: Dismissal produces no action
/// WHY: Click-away and Escape must not emit an event
#[test]
fn given_session_when_dismissed_then_outcome_is_dismissed() {
    // Given: A shell reporting no selection
    let mut shell = FakeShell::default();

    // When: Displaying the session
    let outcome = PopupSession::build(three_entry_snapshot()).display(&mut shell);

    // Then: Dismissed
    assert!(matches!(outcome, Ok(PopupOutcome::Dismissed)));
}

/// WHAT: A command id with no table entry is treated as dismissal
/// WHY: A separator position or stale id must never resolve
#[test]
fn given_session_when_os_reports_separator_position_then_dismissed() {
    // Given: A shell reporting the separator's positional id
    let mut shell = FakeShell {
        next_selection: Some(COMMAND_ID_BASE + 1),
        ..FakeShell::default()
    };

    // When: Displaying the session
    let outcome = PopupSession::build(three_entry_snapshot()).display(&mut shell);

    // Then: Dismissed, no action resolved
    assert!(matches!(outcome, Ok(PopupOutcome::Dismissed)));
}

/// WHAT: An empty snapshot still shows a popup
/// WHY: The OS decides what an empty menu renders as; we still show it
#[test]
fn given_empty_snapshot_when_displaying_then_empty_popup_shown() {
    // Given: An empty menu
    let mut shell = FakeShell::default();

    // When: Displaying a session over it
    let outcome = PopupSession::build(MenuSnapshot::empty()).display(&mut shell);

    // Then: The shell was asked to show an empty popup
    assert!(matches!(outcome, Ok(PopupOutcome::Dismissed)));
    assert_eq!(shell.shown, vec![Vec::new()]);
}

/// WHAT: An update during an open session does not change what it shows
/// WHY: The session snapshots at Building entry to close the re-entrancy race
#[test]
fn given_open_session_when_state_updated_then_session_reads_old_snapshot() {
    // Given: A session built from the current tray state
    let mut state = TrayState::new();
    state.replace_menu(MenuSnapshot::from_items(vec![MenuItemDescriptor::action(
        "Old", true, "old",
    )]));
    let session = PopupSession::build(state.menu());

    // When: A re-entrant update replaces the menu
    state.replace_menu(MenuSnapshot::from_items(vec![MenuItemDescriptor::action(
        "New", true, "new",
    )]));

    // Then: The session still resolves against the old snapshot
    let mut shell = FakeShell {
        next_selection: Some(COMMAND_ID_BASE),
        ..FakeShell::default()
    };
    let outcome = session.display(&mut shell);
    assert!(matches!(
        outcome,
        Ok(PopupOutcome::Selected(ref id)) if id == "old"
    ));

    // And: The next session sees the new menu
    let next = PopupSession::build(state.menu());
    assert!(matches!(
        next.snapshot().items(),
        [MenuItemDescriptor::Action { action_id, .. }] if action_id == "new"
    ));
}

/// WHAT: A popup display failure propagates
/// WHY: The caller decides how to log an OS-level popup failure
#[test]
fn given_failing_shell_when_displaying_then_error_propagates() {
    // Given: A shell whose popup call fails
    let mut shell = FakeShell {
        fail_popup: true,
        ..FakeShell::default()
    };

    // When: Displaying
    let outcome = PopupSession::build(three_entry_snapshot()).display(&mut shell);

    // Then: The error surfaces
    assert!(outcome.is_err());
}

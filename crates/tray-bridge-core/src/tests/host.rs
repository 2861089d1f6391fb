use crate::{
    CallEnvelope, CallResult, COMMAND_ID_BASE, DESKTOP_NOTIFICATIONS_ENDPOINT,
    METHOD_INITIALIZE_TRAY, METHOD_IS_DO_NOT_DISTURB_ENABLED, METHOD_UPDATE_TRAY,
    MenuItemDescriptor, Messenger, OutboundEvent, PopupOutcome, SYSTEM_TRAY_ENDPOINT,
    TOOLTIP_MAX_CHARS, TrayHost, bridge_channel, tests::fakes::FakeShell,
};

use serde_json::{Value, json};

fn test_host(shell: FakeShell) -> (TrayHost<FakeShell>, Messenger) {
    let (messenger, bridge) = bridge_channel(8);
    (TrayHost::new(shell, bridge.event_sender()), messenger)
}

fn tray_call(method: &str, args: Value) -> CallEnvelope {
    CallEnvelope::new(SYSTEM_TRAY_ENDPOINT, method, args)
}

fn error_code(result: &CallResult) -> Option<&str> {
    match result {
        CallResult::Error { code, .. } => Some(code),
        _ => None,
    }
}

/// WHAT: Initialize applies the tooltip and registers the icon
/// WHY: `initializeTray({tooltip})` is the first thing every embedder calls
#[test]
fn given_tooltip_when_initializing_then_state_reflects_it() {
    // Given: A fresh host
    let (mut host, _messenger) = test_host(FakeShell::default());

    // When: Initializing with a tooltip
    let result = host.handle_call(&tray_call(
        METHOD_INITIALIZE_TRAY,
        json!({ "tooltip": "Locker" }),
    ));

    // Then: Success, tooltip stored, icon registered via ADD
    assert_eq!(result, CallResult::ok());
    assert_eq!(host.state().tooltip(), "Locker");
    assert!(host.state().registered());
}

/// WHAT: Initialize without arguments still registers
/// WHY: The tooltip is optional
#[test]
fn given_no_args_when_initializing_then_registered_with_empty_tooltip() {
    // Given/When: Initializing with a null payload
    let (mut host, _messenger) = test_host(FakeShell::default());
    let result = host.handle_call(&tray_call(METHOD_INITIALIZE_TRAY, Value::Null));

    // Then: Success and registered
    assert_eq!(result, CallResult::ok());
    assert!(host.state().registered());
    assert_eq!(host.state().tooltip(), "");
}

/// WHAT: The menu after a sequence of updates equals the last payload
/// WHY: Replacement semantics, not merge
#[test]
fn given_two_menu_updates_when_applied_then_snapshot_equals_last() {
    // Given: An initialized host
    let (mut host, _messenger) = test_host(FakeShell::default());
    let _ = host.handle_call(&tray_call(METHOD_INITIALIZE_TRAY, Value::Null));

    // When: Two updates with different menus
    let _ = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [
            { "label": "A", "enabled": true, "id": "a1" },
            { "label": "B", "enabled": true, "id": "b1" },
        ]}),
    ));
    let result = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [{ "label": "C", "enabled": true, "id": "c1" }] }),
    ));

    // Then: Only the last list survives
    assert_eq!(result, CallResult::ok());
    assert_eq!(
        host.state().menu().items(),
        &[MenuItemDescriptor::action("C", true, "c1")]
    );
}

/// WHAT: An empty update is a state no-op but still re-syncs the shell
/// WHY: `updateTray({})` must succeed and push the current state again
#[test]
fn given_empty_map_when_updating_then_noop_but_shell_synced() {
    // Given: An initialized host with existing tooltip and menu
    let (mut host, _messenger) = test_host(FakeShell::default());
    let _ = host.handle_call(&tray_call(
        METHOD_INITIALIZE_TRAY,
        json!({ "tooltip": "tip" }),
    ));
    let _ = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [{ "label": "A", "enabled": true, "id": "a1" }] }),
    ));

    // When: Updating with an empty map
    let result = host.handle_call(&tray_call(METHOD_UPDATE_TRAY, json!({})));

    // Then: Success, state unchanged, one more MODIFY reached the shell
    assert_eq!(result, CallResult::ok());
    assert_eq!(host.state().tooltip(), "tip");
    assert_eq!(host.state().menu().len(), 1);
    assert_eq!(host.shell().added.len(), 1);
    assert_eq!(host.shell().modified.len(), 2);
}

/// WHAT: Non-map arguments to update fail with INVALID_ARGUMENTS
/// WHY: A bad argument envelope is a caller bug worth a typed error
#[test]
fn given_string_args_when_updating_then_invalid_arguments() {
    // Given/When: Updating with a bare string
    let (mut host, _messenger) = test_host(FakeShell::default());
    let result = host.handle_call(&tray_call(METHOD_UPDATE_TRAY, json!("not a map")));

    // Then: INVALID_ARGUMENTS
    assert_eq!(error_code(&result), Some("INVALID_ARGUMENTS"));
}

/// WHAT: A mistyped `menuItems` value fails with INVALID_ARGUMENTS
/// WHY: The list shape is part of the argument envelope
#[test]
fn given_non_list_menu_items_when_updating_then_invalid_arguments() {
    let (mut host, _messenger) = test_host(FakeShell::default());
    let result = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": "oops" }),
    ));

    assert_eq!(error_code(&result), Some("INVALID_ARGUMENTS"));
}

/// WHAT: A malformed entry aborts the whole update atomically
/// WHY: No partial application; tooltip and menu stay as they were
#[test]
fn given_malformed_item_when_updating_then_nothing_applied() {
    // Given: A host with known tooltip and menu
    let (mut host, _messenger) = test_host(FakeShell::default());
    let _ = host.handle_call(&tray_call(
        METHOD_INITIALIZE_TRAY,
        json!({ "tooltip": "before" }),
    ));
    let _ = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [{ "label": "A", "enabled": true, "id": "a1" }] }),
    ));

    // When: An update carrying a new tooltip and one bad entry
    let result = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({
            "tooltip": "after",
            "menuItems": [
                { "label": "B", "enabled": true, "id": "b1" },
                { "label": "C", "enabled": "broken", "id": "c1" },
            ],
        }),
    ));

    // Then: INVALID_MENU_ITEM and neither field changed
    assert_eq!(error_code(&result), Some("INVALID_MENU_ITEM"));
    assert_eq!(host.state().tooltip(), "before");
    assert_eq!(
        host.state().menu().items(),
        &[MenuItemDescriptor::action("A", true, "a1")]
    );
}

/// WHAT: Overlong tooltips are truncated, not rejected
/// WHY: Silent truncation to the platform buffer is the contract
#[test]
fn given_overlong_tooltip_when_updating_then_truncated_success() {
    let (mut host, _messenger) = test_host(FakeShell::default());

    let result = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "tooltip": "y".repeat(500) }),
    ));

    assert_eq!(result, CallResult::ok());
    assert_eq!(host.state().tooltip().chars().count(), TOOLTIP_MAX_CHARS);
}

/// WHAT: Unknown methods return NotImplemented
/// WHY: Unknown names are not errors on either endpoint
#[test]
fn given_unknown_method_when_calling_then_not_implemented() {
    let (mut host, _messenger) = test_host(FakeShell::default());

    let on_tray = host.handle_call(&tray_call("resizeTray", Value::Null));
    let on_notifications = host.handle_call(&CallEnvelope::new(
        DESKTOP_NOTIFICATIONS_ENDPOINT,
        "snoozeAll",
        Value::Null,
    ));
    let on_unknown_endpoint =
        host.handle_call(&CallEnvelope::new("host/other", METHOD_UPDATE_TRAY, Value::Null));

    assert_eq!(on_tray, CallResult::NotImplemented);
    assert_eq!(on_notifications, CallResult::NotImplemented);
    assert_eq!(on_unknown_endpoint, CallResult::NotImplemented);
}

/// WHAT: The DND query reports the scripted OS state
/// WHY: Busy/full-screen/presentation map to true
#[test]
fn given_dnd_active_when_querying_then_true() {
    let (mut host, _messenger) = test_host(FakeShell {
        dnd: Some(true),
        ..FakeShell::default()
    });

    let result = host.handle_call(&CallEnvelope::new(
        DESKTOP_NOTIFICATIONS_ENDPOINT,
        METHOD_IS_DO_NOT_DISTURB_ENABLED,
        Value::Null,
    ));

    assert_eq!(result, CallResult::Success(Value::Bool(true)));
}

/// WHAT: A failed DND query reports false, never an error
/// WHY: Callers treat the answer as advisory; a query failure is not actionable
#[test]
fn given_failing_dnd_query_when_querying_then_false_success() {
    // Given: A shell whose query fails (dnd: None)
    let (mut host, _messenger) = test_host(FakeShell::default());

    // When: Querying
    let result = host.handle_call(&CallEnvelope::new(
        DESKTOP_NOTIFICATIONS_ENDPOINT,
        METHOD_IS_DO_NOT_DISTURB_ENABLED,
        Value::Null,
    ));

    // Then: Success(false)
    assert_eq!(result, CallResult::Success(Value::Bool(false)));
}

/// WHAT: A shell sync failure does not fail the bridge call
/// WHY: Shell failures are logged and retried on the next sync
#[test]
fn given_failing_shell_when_initializing_then_call_still_succeeds() {
    // Given: A shell that rejects adds
    let (mut host, _messenger) = test_host(FakeShell {
        fail_add: true,
        ..FakeShell::default()
    });

    // When: Initializing
    let result = host.handle_call(&tray_call(METHOD_INITIALIZE_TRAY, Value::Null));

    // Then: Success reported, registration pending retry
    assert_eq!(result, CallResult::ok());
    assert!(!host.state().registered());
}

/// WHAT: Selecting an entry emits the click event with its action id
/// WHY: The outbound half of the bridge contract
#[test]
fn given_selection_when_opening_menu_then_click_event_emitted() {
    // Given: A host with a menu and a shell scripted to pick the first entry
    let (mut host, mut messenger) = test_host(FakeShell {
        next_selection: Some(COMMAND_ID_BASE),
        ..FakeShell::default()
    });
    let _ = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [
            { "label": "A", "enabled": true, "id": "a1" },
            { "type": "separator" },
            { "label": "B", "enabled": false, "id": "b1" },
        ]}),
    ));

    // When: Opening the menu
    let outcome = host.open_menu();

    // Then: Selected("a1") and the event reached the messenger
    assert!(matches!(
        outcome,
        Ok(PopupOutcome::Selected(ref id)) if id == "a1"
    ));
    assert_eq!(
        messenger.try_next_event(),
        Some(OutboundEvent::TrayMenuItemClick {
            action_id: "a1".to_string()
        })
    );
}

/// WHAT: Dismissal emits no event
/// WHY: Only selections cross the bridge
#[test]
fn given_dismissal_when_opening_menu_then_no_event() {
    // Given: A host whose shell reports dismissal
    let (mut host, mut messenger) = test_host(FakeShell::default());
    let _ = host.handle_call(&tray_call(
        METHOD_UPDATE_TRAY,
        json!({ "menuItems": [{ "label": "A", "enabled": true, "id": "a1" }] }),
    ));

    // When: Opening the menu
    let outcome = host.open_menu();

    // Then: Dismissed, no event queued
    assert!(matches!(outcome, Ok(PopupOutcome::Dismissed)));
    assert_eq!(messenger.try_next_event(), None);
}

/// WHAT: Shutdown removes the icon exactly once
/// WHY: Teardown can be triggered from several paths
#[test]
fn given_initialized_host_when_shutting_down_twice_then_single_removal() {
    // Given: An initialized host
    let (mut host, _messenger) = test_host(FakeShell::default());
    let _ = host.handle_call(&tray_call(METHOD_INITIALIZE_TRAY, Value::Null));

    // When: Shutting down twice
    host.shutdown();
    host.shutdown();

    // Then: The shell saw exactly one removal
    assert!(!host.state().registered());
    assert_eq!(host.shell().removed, 1);
}

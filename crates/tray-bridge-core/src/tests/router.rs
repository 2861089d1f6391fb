use crate::{
    MSG_FONTCHANGE, MSG_LBUTTONUP, MSG_RBUTTONUP, Routed, TRAY_CALLBACK_MESSAGE, WindowMessage,
    route_message, tests::fakes::FakeUiRuntime,
};

fn msg(message: u32, lparam: isize) -> WindowMessage {
    WindowMessage {
        message,
        wparam: 0,
        lparam,
    }
}

/// WHAT: A message claimed by the UI runtime routes nowhere else
/// WHY: The runtime's result is authoritative
#[test]
fn given_claiming_runtime_when_routing_then_claimed_and_nothing_else_runs() {
    // Given: A runtime that claims everything
    let mut ui = FakeUiRuntime {
        claim: Some(7),
        ..FakeUiRuntime::default()
    };

    // When: Routing a font-change message it would otherwise act on
    let routed = route_message(&mut ui, &msg(MSG_FONTCHANGE, 0));

    // Then: Claimed with the runtime's value, no font reload
    assert_eq!(routed, Routed::Claimed(7));
    assert_eq!(ui.font_reloads, 0);
}

/// WHAT: The runtime is offered every message first
/// WHY: First-offer precedence even over tray callbacks
#[test]
fn given_claiming_runtime_when_routing_tray_callback_then_claimed() {
    // Given: A claiming runtime and a tray button-up
    let mut ui = FakeUiRuntime {
        claim: Some(0),
        ..FakeUiRuntime::default()
    };

    // When: Routing
    let routed = route_message(&mut ui, &msg(TRAY_CALLBACK_MESSAGE, MSG_RBUTTONUP as isize));

    // Then: Claimed, not TrayInteraction
    assert_eq!(routed, Routed::Claimed(0));
}

/// WHAT: A font-change notification triggers exactly one reload
/// WHY: The runtime owns font state; the router only signals it
#[test]
fn given_font_change_when_routing_then_fonts_reloaded_once() {
    // Given: A non-claiming runtime
    let mut ui = FakeUiRuntime::default();

    // When: Routing a font-change message
    let routed = route_message(&mut ui, &msg(MSG_FONTCHANGE, 0));

    // Then: FontsReloaded, one reload call
    assert_eq!(routed, Routed::FontsReloaded);
    assert_eq!(ui.font_reloads, 1);
    assert_eq!(ui.offered.len(), 1);
}

/// WHAT: Tray button-up messages request the menu
/// WHY: Right- and left-button-up both open the context menu
#[test]
fn given_tray_button_up_when_routing_then_tray_interaction() {
    let mut ui = FakeUiRuntime::default();

    for button in [MSG_RBUTTONUP, MSG_LBUTTONUP] {
        // When: Routing a tray callback with a button-up sub-event
        let routed = route_message(&mut ui, &msg(TRAY_CALLBACK_MESSAGE, button as isize));

        // Then: TrayInteraction
        assert_eq!(routed, Routed::TrayInteraction);
    }
}

/// WHAT: Other tray sub-events fall through
/// WHY: Hover and move notifications must not open the menu
#[test]
fn given_tray_mouse_move_when_routing_then_unhandled() {
    // Given: WM_MOUSEMOVE riding the tray callback
    let mut ui = FakeUiRuntime::default();

    // When: Routing
    let routed = route_message(&mut ui, &msg(TRAY_CALLBACK_MESSAGE, 0x0200));

    // Then: Unhandled
    assert_eq!(routed, Routed::Unhandled);
}

/// WHAT: Unrelated messages fall through to default handling
/// WHY: The router must not swallow messages it does not recognize
#[test]
fn given_unrelated_message_when_routing_then_unhandled() {
    // Given: An arbitrary window message
    let mut ui = FakeUiRuntime::default();

    // When: Routing
    let routed = route_message(&mut ui, &msg(0x0005, 0));

    // Then: Unhandled, but the runtime was still offered it
    assert_eq!(routed, Routed::Unhandled);
    assert_eq!(ui.offered.len(), 1);
}

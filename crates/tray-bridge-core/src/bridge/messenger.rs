use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::{
    BridgeError, Result,
    bridge::envelope::{CallEnvelope, CallResult},
};

/// Events emitted by the native host toward the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// The user selected an action entry in the tray context menu.
    ///
    /// Delivered as [`EVENT_TRAY_MENU_ITEM_CLICK`](crate::EVENT_TRAY_MENU_ITEM_CLICK)
    /// on the tray endpoint; the payload is the caller-defined action id.
    TrayMenuItemClick {
        /// Opaque action identifier from the selected menu entry.
        action_id: String,
    },
}

/// An inbound call paired with its reply slot.
#[derive(Debug)]
pub struct IncomingCall {
    pub(crate) envelope: CallEnvelope,
    pub(crate) reply: oneshot::Sender<CallResult>,
}

impl IncomingCall {
    /// The call being made.
    pub fn envelope(&self) -> &CallEnvelope {
        &self.envelope
    }

    /// Sends the result back to the waiting caller.
    ///
    /// A caller that stopped awaiting simply never observes the result;
    /// that is not a host-side failure.
    pub fn respond(self, result: CallResult) {
        if self.reply.send(result).is_err() {
            debug!(
                endpoint = %self.envelope.endpoint,
                method = %self.envelope.method,
                "Caller went away before the reply was delivered"
            );
        }
    }
}

/// UI-layer side of the bridge: invoke methods, receive events.
#[derive(Debug)]
pub struct Messenger {
    call_tx: mpsc::Sender<IncomingCall>,
    event_rx: mpsc::Receiver<OutboundEvent>,
}

impl Messenger {
    /// Invokes a method on the host and awaits its result.
    pub async fn invoke(&self, envelope: CallEnvelope) -> Result<CallResult> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.call_tx
            .send(IncomingCall {
                envelope,
                reply: reply_tx,
            })
            .await
            .map_err(|_| BridgeError::BridgeClosed {
                message: "host side of the bridge is gone".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        reply_rx.await.map_err(|_| BridgeError::BridgeClosed {
            message: "host dropped the call without replying".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Awaits the next outbound event, `None` once the host is gone.
    pub async fn next_event(&mut self) -> Option<OutboundEvent> {
        self.event_rx.recv().await
    }

    /// Non-blocking event poll.
    pub fn try_next_event(&mut self) -> Option<OutboundEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Host side of the bridge: receive calls, emit events.
#[derive(Debug)]
pub struct BridgeHost {
    call_rx: mpsc::Receiver<IncomingCall>,
    event_tx: mpsc::Sender<OutboundEvent>,
}

impl BridgeHost {
    /// Awaits the next inbound call, `None` once every messenger is gone.
    pub async fn next_call(&mut self) -> Option<IncomingCall> {
        self.call_rx.recv().await
    }

    /// Non-blocking call poll, for integration into a window message loop.
    pub fn try_next_call(&mut self) -> Option<IncomingCall> {
        self.call_rx.try_recv().ok()
    }

    /// A sender handle for outbound events.
    pub fn event_sender(&self) -> mpsc::Sender<OutboundEvent> {
        self.event_tx.clone()
    }
}

/// Creates a connected messenger/host pair with the given channel capacity.
pub fn bridge_channel(capacity: usize) -> (Messenger, BridgeHost) {
    let (call_tx, call_rx) = mpsc::channel(capacity);
    let (event_tx, event_rx) = mpsc::channel(capacity);

    (
        Messenger { call_tx, event_rx },
        BridgeHost { call_rx, event_tx },
    )
}

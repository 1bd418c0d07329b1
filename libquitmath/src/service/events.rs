//! Action channel between collaborators and the store
//!
//! Collaborators never hold the store. They send actions here and the
//! owner of the store drains the channel, dispatching in send order.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::store::{Action, Store};

pub type ActionReceiver = Receiver<Action>;

#[derive(Debug, Clone)]
pub struct ActionSender {
    inner: Sender<Action>,
}

impl ActionSender {
    /// Queue `action` for dispatch; returns false if the store owner is gone
    pub fn send(&self, action: Action) -> bool {
        let type_name = action.type_name();
        match self.inner.send(action) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(action = type_name, "store receiver dropped, action discarded");
                false
            }
        }
    }
}

pub fn channel() -> (ActionSender, ActionReceiver) {
    let (tx, rx) = unbounded();
    (ActionSender { inner: tx }, rx)
}

/// Dispatch every queued action, returning how many were applied
pub fn dispatch_pending(store: &mut Store, rx: &ActionReceiver) -> usize {
    let mut applied = 0;
    loop {
        match rx.try_recv() {
            Ok(action) => {
                store.dispatch(action);
                applied += 1;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    applied
}

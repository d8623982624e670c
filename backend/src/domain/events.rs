//! Change notification for store mutations.
//!
//! The aggregation functions stay pure and synchronous; this is only
//! the glue that lets a presentation layer re-run its queries when the
//! store changes. Subscribers get a plain mpsc receiver; a subscriber
//! that goes away is dropped from the list on the next notify.

use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// A store mutation that invalidates derived views.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseEvent {
    Added { id: String },
    Deleted { id: String },
}

/// Fan-out channel for [`ExpenseEvent`]s.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    senders: Arc<Mutex<Vec<Sender<ExpenseEvent>>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Events sent after this call will be
    /// delivered to the returned receiver.
    pub fn subscribe(&self) -> Receiver<ExpenseEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders
            .lock()
            .expect("notifier lock poisoned")
            .push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, pruning any whose
    /// receiver has been dropped.
    pub fn notify(&self, event: ExpenseEvent) {
        let mut senders = self.senders.lock().expect("notifier lock poisoned");
        senders.retain(|tx| tx.send(event.clone()).is_ok());
        debug!("notified {} subscriber(s) of {:?}", senders.len(), event);
    }
}

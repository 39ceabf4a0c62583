//! Data notification channel
//!
//! Transports hand server data to their owner through a [`DataEmitter`].
//! Every [`DataReceiver`] obtained from [`DataEmitter::subscribe`] gets its
//! own copy of each payload emitted after it subscribed. Dropping a receiver
//! unregisters it.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use dashmap::DashMap;
use futures::Stream;
use log::{debug, trace};
use serde_json::Value;
use tokio::sync::mpsc;

type Listeners = DashMap<u64, mpsc::UnboundedSender<Value>>;

/// Producer side of the data notification channel
#[derive(Clone, Default)]
pub struct DataEmitter {
    listeners: Arc<Listeners>,
    next_id: Arc<AtomicU64>,
}

impl DataEmitter {
    /// Create an emitter with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn subscribe(&self) -> DataReceiver {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners.insert(id, sender);

        DataReceiver {
            id,
            receiver,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver data to every listener right away.
    ///
    /// Returns the number of listeners the data was delivered to.
    pub fn emit(&self, data: Value) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        for listener in self.listeners.iter() {
            if listener.value().send(data.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*listener.key());
            }
        }

        for id in closed {
            self.listeners.remove(&id);
        }

        delivered
    }

    /// Deliver data to the listeners from a separate task.
    ///
    /// On a current-thread runtime the task cannot run before the caller
    /// yields, so a listener registered right after this call still receives
    /// the data. On a multi-threaded runtime the task may run on another
    /// worker at once; only listeners registered before this call are
    /// guaranteed to receive it. Must be called from within a Tokio runtime.
    pub fn emit_deferred(&self, data: Value) {
        let emitter = self.clone();
        tokio::spawn(async move {
            let delivered = emitter.emit(data);
            trace!("Delivered data to {} listener(s)", delivered);
        });
    }
}

/// Consumer side of the data notification channel
pub struct DataReceiver {
    id: u64,
    receiver: mpsc::UnboundedReceiver<Value>,
    listeners: Weak<Listeners>,
}

impl DataReceiver {
    /// Wait for the next payload.
    ///
    /// Returns `None` once the emitter and every pending emission are gone.
    pub async fn recv(&mut self) -> Option<Value> {
        self.receiver.recv().await
    }

    /// Take the next payload if one is already available
    pub fn try_recv(&mut self) -> Option<Value> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for DataReceiver {
    type Item = Value;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Value>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for DataReceiver {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(&self.id);
            debug!("Data listener {} unsubscribed", self.id);
        }
    }
}

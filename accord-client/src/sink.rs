//! Event emission.

use crate::event::ClientEvent;
use accord_model::Diagnostics;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

/// Receives normalized events. Emission is fire-and-forget.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

impl EventSink for UnboundedSender<ClientEvent> {
    fn emit(&self, event: ClientEvent) {
        if let Err(err) = self.send(event) {
            trace!(event = err.0.name(), "event receiver dropped");
        }
    }
}

/// Keeps every emitted event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ClientEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> Vec<ClientEvent> {
        self.lock().clone()
    }

    /// Names of the events emitted so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(ClientEvent::name).collect()
    }

    /// Drains the recorded events.
    pub fn take(&self) -> Vec<ClientEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ClientEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ClientEvent) {
        self.lock().push(event);
    }
}

/// Forwards decode diagnostics to a sink as [`ClientEvent::Debug`].
///
/// Always attached while dispatching, so unknown component kinds are ignored
/// rather than rejected even when forwarding is switched off.
pub(crate) struct SinkDiagnostics<'a> {
    sink: &'a dyn EventSink,
    forward: bool,
}

impl<'a> SinkDiagnostics<'a> {
    pub(crate) fn new(sink: &'a dyn EventSink, forward: bool) -> Self {
        Self { sink, forward }
    }
}

impl Diagnostics for SinkDiagnostics<'_> {
    fn debug(&self, message: &str) {
        debug!(%message, "diagnostic");
        if self.forward {
            self.sink.emit(ClientEvent::Debug(message.to_string()));
        }
    }
}

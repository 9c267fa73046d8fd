//! Progress markers emitted while a module is brought up.

use parking_lot::Mutex;
use std::sync::Arc;

/// Observable progress marker.
///
/// Exactly these two are emitted, always in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMarker {
    /// Emitted synchronously before the readiness wait begins.
    Requested,
    /// Emitted after the module reported ready, before its entry point runs.
    Ready,
}

/// Receiver for progress markers.
pub trait ProgressObserver: Send + Sync {
    fn marker(&self, marker: ProgressMarker, module: &str);
}

/// Default observer: writes markers to the diagnostic log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn marker(&self, marker: ProgressMarker, module: &str) {
        match marker {
            ProgressMarker::Requested => tracing::info!(module = %module, "Module requested"),
            ProgressMarker::Ready => tracing::info!(module = %module, "Module initialized"),
        }
    }
}

/// Observer that keeps every marker it sees, then forwards it to the log.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MarkerLog {
    markers: Arc<Mutex<Vec<ProgressMarker>>>,
}

impl MarkerLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of markers recorded so far, oldest first.
    pub fn markers(&self) -> Vec<ProgressMarker> {
        self.markers.lock().clone()
    }

    pub fn last(&self) -> Option<ProgressMarker> {
        self.markers.lock().last().copied()
    }
}

impl ProgressObserver for MarkerLog {
    fn marker(&self, marker: ProgressMarker, module: &str) {
        self.markers.lock().push(marker);
        TracingObserver.marker(marker, module);
    }
}

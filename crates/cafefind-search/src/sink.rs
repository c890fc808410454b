//! Destinations for user-facing status events.

use std::sync::Mutex;

use cafefind_core::{Severity, StatusEvent};

/// Receives status events as a search progresses.
pub trait StatusSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

/// Writes each event to the tracing log at a level matching its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&self, event: StatusEvent) {
        match event.severity {
            Severity::Loading | Severity::Success => tracing::info!(status = %event.message),
            Severity::Warning => tracing::warn!(status = %event.message),
            Severity::Error => tracing::error!(status = %event.message),
        }
    }
}

/// Collects events in order, for callers that report them after the search.
impl StatusSink for Mutex<Vec<StatusEvent>> {
    fn emit(&self, event: StatusEvent) {
        match self.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutex_sink_keeps_emission_order() {
        let sink = Mutex::new(Vec::new());
        sink.emit(StatusEvent::loading("one"));
        sink.emit(StatusEvent::success("two"));

        let events = sink.into_inner().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "one");
        assert_eq!(events[1].severity, Severity::Success);
    }
}

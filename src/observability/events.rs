//! Change events
//!
//! Mutating endpoints announce what they did through a
//! [`ChangeNotifier`], an injectable callback invoked synchronously
//! after the write completes. The notification carries no state and is
//! used only for auditing; correctness never depends on it.

use std::fmt;
use std::sync::Arc;

use super::logger::Logger;

/// A mutation observed on the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// One record was appended through the add endpoint
    Added,
    /// The whole file was replaced through the upload endpoint
    Imported,
}

impl ChangeEvent {
    /// The action label carried to observers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeEvent::Added => "added",
            ChangeEvent::Imported => "imported",
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injectable observer for change events.
///
/// The default notifier logs the action label; tests inject their own
/// closure to assert on the notifications.
#[derive(Clone)]
pub struct ChangeNotifier {
    callback: Arc<dyn Fn(ChangeEvent) + Send + Sync>,
}

impl ChangeNotifier {
    /// Wrap an arbitrary callback.
    pub fn new(callback: impl Fn(ChangeEvent) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// A notifier that writes the action to the structured log.
    pub fn logging() -> Self {
        Self::new(|event| {
            Logger::info("RECORDS_CHANGED", &[("action", event.as_str())]);
        })
    }

    /// Deliver an event to the observer, synchronously.
    pub fn notify(&self, event: ChangeEvent) {
        (self.callback)(event);
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeNotifier")
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::logging()
    }
}

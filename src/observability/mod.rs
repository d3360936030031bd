//! # Observability
//!
//! Structured logging and change-event notification. Neither carries
//! persisted state; losing a notification never affects stored data.

pub mod events;
pub mod logger;

pub use events::{ChangeEvent, ChangeNotifier};
pub use logger::{Logger, Severity};

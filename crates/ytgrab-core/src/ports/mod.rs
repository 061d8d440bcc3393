//! Port definitions: the seams adapters plug into.
//!
//! Ports are object-safe traits passed around as `Arc<dyn …>` so the
//! core and runtime never depend on a concrete transport.

mod console_sink;
mod event_emitter;

pub use console_sink::ConsoleSinkPort;
pub use event_emitter::{EventEmitter, NoopEmitter};

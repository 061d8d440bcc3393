//! Event emitter trait for adapter-facing lifecycle events.
//!
//! Implementations handle transport details (channels, desktop-shell
//! events, plain logging). Keeping the trait here prevents channel types
//! from leaking into the public API surface.

use crate::events::DownloadEvent;

/// Trait for emitting download lifecycle events.
///
/// # Implementations
///
/// - [`NoopEmitter`] for tests and CLI contexts that don't need events
/// - Adapter-specific implementations on the embedding side
pub trait EventEmitter: Send + Sync {
    /// Emit one lifecycle event. Must not block.
    fn emit(&self, event: DownloadEvent);
}

/// A no-op event emitter for tests and CLI contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: DownloadEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RunOutcome;

    #[test]
    fn test_noop_emitter_discards_events() {
        let emitter = NoopEmitter::new();
        emitter.emit(DownloadEvent::finished(RunOutcome::Succeeded));
    }
}

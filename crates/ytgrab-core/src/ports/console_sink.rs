//! Port for forwarding external-process output lines.

/// Sink for lines read from a supervised child process.
///
/// The supervisor calls `append` from its worker for every line the
/// moment it arrives, with trailing newline characters already stripped.
/// Implementations must be cheap and must not block; anything expensive
/// belongs behind a channel.
pub trait ConsoleSinkPort: Send + Sync {
    /// Forward one output line.
    fn append(&self, line: String);
}

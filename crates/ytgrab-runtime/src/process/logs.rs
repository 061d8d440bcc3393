//! Console streaming utilities.
//!
//! This module provides the in-memory console the supervisor writes into
//! and UI shells read from: a bounded ring buffer for re-reads plus a
//! broadcast channel for live tailing.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, LazyLock, RwLock};
use tokio::sync::broadcast;
use ytgrab_core::ports::ConsoleSinkPort;

/// Maximum number of lines kept in the ring buffer
const MAX_CONSOLE_LINES: usize = 5000;

/// Global console instance
static CONSOLE: LazyLock<Arc<ConsoleLog>> = LazyLock::new(|| Arc::new(ConsoleLog::new()));

/// Get the process-wide console
pub fn console() -> Arc<ConsoleLog> {
    CONSOLE.clone()
}

/// A single console line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleEntry {
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
    /// The line content, newline already stripped
    pub line: String,
}

impl ConsoleEntry {
    /// Create a new entry with the current timestamp
    pub fn new(line: String) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        Self { timestamp, line }
    }
}

/// Ring buffer of recent console lines plus a live broadcast feed.
///
/// Slow subscribers may observe `Lagged` on the broadcast side; the ring
/// buffer remains the source of truth for re-reads.
pub struct ConsoleLog {
    lines: RwLock<VecDeque<ConsoleEntry>>,
    broadcast_tx: broadcast::Sender<ConsoleEntry>,
}

impl ConsoleLog {
    /// Create a new empty console
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(1000);
        Self {
            lines: RwLock::new(VecDeque::with_capacity(MAX_CONSOLE_LINES)),
            broadcast_tx,
        }
    }

    /// Add a line (sync - can be called from std threads)
    pub fn add_line(&self, line: &str) {
        let entry = ConsoleEntry::new(line.to_string());

        {
            let mut lines = self.lines.write().unwrap();
            if lines.len() >= MAX_CONSOLE_LINES {
                lines.pop_front();
            }
            lines.push_back(entry.clone());
        }

        // Broadcast to subscribers (ignore if no receivers)
        let _ = self.broadcast_tx.send(entry);
    }

    /// Get all buffered lines, oldest first
    pub fn snapshot(&self) -> Vec<ConsoleEntry> {
        let lines = self.lines.read().unwrap();
        lines.iter().cloned().collect()
    }

    /// Get a broadcast receiver for live lines
    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEntry> {
        self.broadcast_tx.subscribe()
    }

    /// Drop all buffered lines
    pub fn clear(&self) {
        let mut lines = self.lines.write().unwrap();
        lines.clear();
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSinkPort for ConsoleLog {
    fn append(&self, line: String) {
        self.add_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest_beyond_capacity() {
        let log = ConsoleLog::new();
        for i in 0..(MAX_CONSOLE_LINES + 10) {
            log.add_line(&format!("line {i}"));
        }

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), MAX_CONSOLE_LINES);
        assert_eq!(snapshot[0].line, "line 10");
        assert_eq!(
            snapshot.last().unwrap().line,
            format!("line {}", MAX_CONSOLE_LINES + 9)
        );
    }

    #[test]
    fn test_clear_empties_buffer() {
        let log = ConsoleLog::new();
        log.add_line("one");
        log.add_line("two");
        log.clear();
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn test_subscribers_receive_lines_in_order() {
        let log = ConsoleLog::new();
        let mut rx = log.subscribe();

        log.add_line("first");
        log.add_line("second");

        assert_eq!(rx.try_recv().unwrap().line, "first");
        assert_eq!(rx.try_recv().unwrap().line, "second");
    }

    #[test]
    fn test_sink_port_appends_to_buffer() {
        let log = ConsoleLog::new();
        let sink: &dyn ConsoleSinkPort = &log;
        sink.append("via port".to_string());
        assert_eq!(log.snapshot()[0].line, "via port");
    }
}

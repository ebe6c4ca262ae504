//! Session memory — bounded, ordered log of past interactions.
//!
//! The resolver embeds the *context* string this module produces, not the
//! raw prompt, so recent history can bias which capabilities get retrieved.
//! Process-scoped only: nothing here survives a restart.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Maximum records a session retains before FIFO eviction.
pub const SESSION_CAPACITY: usize = 10;

/// How many of the most recent records feed the context rendering.
pub const CONTEXT_WINDOW: usize = 3;

/// One past interaction: what was asked, what ran, how it went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The raw prompt as the caller sent it.
    pub prompt: String,
    /// The capability that was chosen.
    pub capability_name: String,
    /// Summary of the execution result.
    pub result_summary: String,
    /// When the interaction was recorded.
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        prompt: impl Into<String>,
        capability_name: impl Into<String>,
        result_summary: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            capability_name: capability_name.into(),
            result_summary: result_summary.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded FIFO of interaction records.
///
/// `append` and the context-window read share one lock, so the rendered
/// window is always a consistent snapshot.
pub struct SessionMemory {
    records: Mutex<VecDeque<InteractionRecord>>,
    capacity: usize,
}

impl Default for SessionMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMemory {
    /// Create an empty session with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(SESSION_CAPACITY)
    }

    /// Create an empty session with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest once over capacity.
    pub fn append(&self, record: InteractionRecord) {
        let mut records = self.records.lock();
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when no interactions have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of the retained records, oldest first.
    pub fn snapshot(&self) -> Vec<InteractionRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Render the retrieval context for a prompt.
    ///
    /// Empty history returns the prompt unchanged. Otherwise the last
    /// [`CONTEXT_WINDOW`] records render as one
    /// `Previous interaction: <prompt> -> <capability>` line each (oldest
    /// of the window first), followed by a `Current prompt: <prompt>`
    /// line.
    pub fn context_for(&self, prompt: &str) -> String {
        let records = self.records.lock();
        if records.is_empty() {
            return prompt.to_string();
        }

        let start = records.len().saturating_sub(CONTEXT_WINDOW);
        let mut lines: Vec<String> = records
            .iter()
            .skip(start)
            .map(|r| format!("Previous interaction: {} -> {}", r.prompt, r.capability_name))
            .collect();
        lines.push(format!("Current prompt: {}", prompt));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> InteractionRecord {
        InteractionRecord::new(format!("prompt {n}"), format!("cap_{n}"), "success")
    }

    #[test]
    fn test_empty_history_returns_prompt_unchanged() {
        let memory = SessionMemory::new();
        assert_eq!(memory.context_for("Open calculator"), "Open calculator");
    }

    #[test]
    fn test_context_renders_last_three_oldest_first() {
        let memory = SessionMemory::new();
        for n in 1..=5 {
            memory.append(record(n));
        }

        let context = memory.context_for("Show CPU usage");
        let expected = "Previous interaction: prompt 3 -> cap_3\n\
                        Previous interaction: prompt 4 -> cap_4\n\
                        Previous interaction: prompt 5 -> cap_5\n\
                        Current prompt: Show CPU usage";
        assert_eq!(context, expected);
    }

    #[test]
    fn test_context_with_fewer_than_window_records() {
        let memory = SessionMemory::new();
        memory.append(record(1));

        let context = memory.context_for("next");
        assert_eq!(
            context,
            "Previous interaction: prompt 1 -> cap_1\nCurrent prompt: next"
        );
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let memory = SessionMemory::new();
        for n in 1..=11 {
            memory.append(record(n));
        }

        let records = memory.snapshot();
        assert_eq!(records.len(), SESSION_CAPACITY);
        assert_eq!(records[0].prompt, "prompt 2");
        assert_eq!(records[9].prompt, "prompt 11");
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.prompt, format!("prompt {}", i + 2));
        }
    }

    #[test]
    fn test_append_is_safe_across_threads() {
        use std::sync::Arc;

        let memory = Arc::new(SessionMemory::new());
        let mut handles = Vec::new();
        for n in 0..4 {
            let memory = Arc::clone(&memory);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    memory.append(record(n * 100 + i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(memory.len(), SESSION_CAPACITY);
    }
}

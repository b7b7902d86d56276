//! The logging capability the core reports into.
//!
//! Records and stores hold a [`SharedLog`] handed to them at construction;
//! nothing in this crate looks up a global logger.

use std::sync::{Arc, Mutex};

/// Two sinks: informational events and errors. Each accepts a formatted
/// message; transport and filtering are the implementor's concern.
pub trait EventLog: Send + Sync {
  fn info(&self, message: &str);
  fn error(&self, message: &str);
}

pub type SharedLog = Arc<dyn EventLog>;

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Forwards events to the `tracing` macros under the `intake::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl TracingLog {
  pub fn shared() -> SharedLog { Arc::new(Self) }
}

impl EventLog for TracingLog {
  fn info(&self, message: &str) {
    tracing::info!(target: "intake::audit", "{message}");
  }

  fn error(&self, message: &str) {
    tracing::error!(target: "intake::audit", "{message}");
  }
}

// ─── in-memory ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Error,
}

/// Keeps every event in memory; useful for asserting on audit output.
#[derive(Debug, Default)]
pub struct MemoryLog {
  entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
  pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

  /// A copy of all events recorded so far, oldest first.
  pub fn entries(&self) -> Vec<(LogLevel, String)> {
    self.lock().clone()
  }

  /// Messages recorded at `level`, oldest first.
  pub fn messages(&self, level: LogLevel) -> Vec<String> {
    self
      .lock()
      .iter()
      .filter(|(l, _)| *l == level)
      .map(|(_, m)| m.clone())
      .collect()
  }

  fn push(&self, level: LogLevel, message: &str) {
    self.lock().push((level, message.to_owned()));
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
    // A panic while holding the lock cannot leave the Vec half-written.
    self.entries.lock().unwrap_or_else(|p| p.into_inner())
  }
}

impl EventLog for MemoryLog {
  fn info(&self, message: &str) { self.push(LogLevel::Info, message); }

  fn error(&self, message: &str) { self.push(LogLevel::Error, message); }
}

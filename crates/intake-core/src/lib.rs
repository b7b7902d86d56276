//! Core types for the Intake patient registry.
//!
//! Raw strings enter through [`record::Record`] setters, are checked and
//! normalised by the pure functions in [`validate`], and are held in
//! per-field [`slot::FieldSlot`]s that enforce each field's write policy.
//!
//! This crate is deliberately free of filesystem access. Persistence goes
//! through the [`sink::RecordSink`] trait, implemented by storage backends
//! (e.g. `intake-store-file`).

pub mod error;
pub mod field;
pub mod log;
pub mod record;
pub mod sink;
pub mod slot;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
pub use field::{DocumentType, Field, WritePolicy};
pub use log::{EventLog, SharedLog, TracingLog};
pub use record::{Record, RecordView, SaveStatus};
pub use sink::RecordSink;

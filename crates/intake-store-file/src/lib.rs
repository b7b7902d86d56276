//! Append-only text file backend for the Intake patient registry.
//!
//! Each record is one line of six comma-separated canonical fields. Every
//! call opens and releases its own file handle; reads are lazy and re-run
//! all field validators.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{FileStore, Limit, Records};

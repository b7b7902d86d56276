//! The persistence seam between a [`Record`](crate::record::Record) and a
//! storage backend.

use crate::field::FIELD_COUNT;

/// Somewhere a record's canonical fields can be appended.
///
/// Implemented by storage backends (e.g. `intake-store-file`). The fields
/// arrive in [`Field::ALL`](crate::field::Field::ALL) order.
pub trait RecordSink {
  type Error: std::error::Error + 'static;

  fn append(&self, fields: &[&str; FIELD_COUNT]) -> Result<(), Self::Error>;
}

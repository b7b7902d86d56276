//! Error types for `intake-core`.

use thiserror::Error;

use crate::field::Field;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The input was not text.
  Type,
  /// The input was text but failed the field's format rule.
  Value,
  /// A write-once field was written twice, or a field was read unset.
  Attribute,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("{field} must be text")]
  NotText { field: Field },

  #[error("invalid {field}: {value:?}")]
  Invalid { field: Field, value: String },

  #[error("{field} is immutable once set")]
  Immutable { field: Field },

  #[error("{field} has not been set")]
  Unset { field: Field },
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotText { .. } => ErrorKind::Type,
      Self::Invalid { .. } => ErrorKind::Value,
      Self::Immutable { .. } | Self::Unset { .. } => ErrorKind::Attribute,
    }
  }

  /// The field the error is about.
  pub fn field(&self) -> Field {
    match self {
      Self::NotText { field }
      | Self::Invalid { field, .. }
      | Self::Immutable { field }
      | Self::Unset { field } => *field,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

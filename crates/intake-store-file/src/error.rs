//! Error type for `intake-store-file`.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record error on line {line}: {source}")]
  Record {
    line:   usize,
    #[source]
    source: intake_core::Error,
  },

  #[error("{}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  /// A stored line did not split into exactly six fields.
  #[error("line {line} has {fields} fields, expected {expected}")]
  MalformedLine {
    line:     usize,
    fields:   usize,
    expected: usize,
  },
}

impl Error {
  /// Whether this error came from the filesystem.
  pub fn is_io(&self) -> bool { matches!(self, Self::Io { .. }) }

  /// The underlying I/O error kind, if any.
  pub fn io_kind(&self) -> Option<io::ErrorKind> {
    match self {
      Self::Io { source, .. } => Some(source.kind()),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! [`FileStore`] — the append-only text file implementation of
//! [`RecordSink`], plus the lazy [`Records`] reader.

use std::{
  fs::{File, OpenOptions},
  io::{self, BufRead, BufReader, Write},
  iter::FusedIterator,
  path::{Path, PathBuf},
};

use intake_core::{
  Record, RecordSink,
  field::FIELD_COUNT,
  log::{SharedLog, TracingLog},
};

use crate::{
  Error, Result,
  encode::{decode_line, encode_line},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient store backed by a single delimited text file.
///
/// Holds only the path; the file is opened and released within each call.
/// Concurrent writers from other processes are not coordinated.
#[derive(Clone)]
pub struct FileStore {
  path: PathBuf,
  log:  SharedLog,
}

impl FileStore {
  /// A store at `path` whose records log through [`TracingLog`]. The file
  /// is not touched until the first append or read.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self::with_log(path, TracingLog::shared())
  }

  /// A store at `path` whose records report to `log`.
  pub fn with_log(path: impl Into<PathBuf>, log: SharedLog) -> Self {
    Self { path: path.into(), log }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Append one line of canonical fields, creating the file if needed.
  pub fn append(&self, fields: &[&str; FIELD_COUNT]) -> Result<()> {
    let line = encode_line(fields);

    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .map_err(|e| self.io_error(e))?;
    file
      .write_all(line.as_bytes())
      .and_then(|()| file.flush())
      .map_err(|e| self.io_error(e))?;

    tracing::debug!(path = %self.path.display(), "appended record");
    Ok(())
  }

  /// A fresh single pass over the records currently in the file.
  ///
  /// Each line is re-validated as it is pulled; a bad line surfaces as an
  /// `Err` item at its position and iteration carries on with the next.
  pub fn iter(&self) -> Result<Records> {
    let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
    Ok(Records {
      reader:  BufReader::new(file),
      path:    self.path.clone(),
      log:     self.log.clone(),
      buf:     Vec::new(),
      line_no: 0,
      done:    false,
    })
  }

  /// Like [`FileStore::iter`], but stops once `n` records have been
  /// produced. Bad lines are still yielded as `Err` but do not count
  /// toward `n`. Lines past the `n`th record are never read.
  pub fn limit(&self, n: usize) -> Result<Limit> {
    Ok(Limit { records: self.iter()?, remaining: n })
  }

  fn io_error(&self, source: io::Error) -> Error {
    Error::Io { path: self.path.clone(), source }
  }
}

impl RecordSink for FileStore {
  type Error = Error;

  fn append(&self, fields: &[&str; FIELD_COUNT]) -> Result<()> {
    FileStore::append(self, fields)
  }
}

// ─── Reader ──────────────────────────────────────────────────────────────────

/// Lazy iterator over the records of a [`FileStore`].
///
/// Owns its own read handle, released when the iterator is dropped. Not
/// restartable; call [`FileStore::iter`] again for a new pass.
pub struct Records {
  reader:  BufReader<File>,
  path:    PathBuf,
  log:     SharedLog,
  buf:     Vec<u8>,
  line_no: usize,
  done:    bool,
}

impl Records {
  /// 1-based number of the last line read.
  pub fn line_no(&self) -> usize { self.line_no }

  fn decode(&self) -> Result<Record> {
    let line = self.line_no;
    let [
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    ] = decode_line(&self.buf, line).inspect_err(|err| {
      self.log.error(&err.to_string());
    })?;

    Record::with_log(
      self.log.clone(),
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    )
    .map_err(|source| Error::Record { line, source })
  }
}

impl Iterator for Records {
  type Item = Result<Record>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }

    self.buf.clear();
    match self.reader.read_until(b'\n', &mut self.buf) {
      Ok(0) => {
        self.done = true;
        None
      }
      Ok(_) => {
        self.line_no += 1;
        Some(self.decode())
      }
      Err(source) => {
        self.done = true;
        let err = Error::Io { path: self.path.clone(), source };
        self.log.error(&err.to_string());
        Some(Err(err))
      }
    }
  }
}

impl FusedIterator for Records {}

// ─── Bounded reader ──────────────────────────────────────────────────────────

/// [`Records`] cut off after a number of successfully read records.
pub struct Limit {
  records:   Records,
  remaining: usize,
}

impl Limit {
  /// How many more records may still be produced.
  pub fn remaining(&self) -> usize { self.remaining }
}

impl Iterator for Limit {
  type Item = Result<Record>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }
    let item = self.records.next()?;
    if item.is_ok() {
      self.remaining -= 1;
    }
    Some(item)
  }
}

impl FusedIterator for Limit {}

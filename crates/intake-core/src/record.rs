//! [`Record`] — one patient, assembled from six field slots.

use std::fmt;

use serde::Serialize;

use crate::{
  Result,
  field::{DocumentType, FIELD_COUNT, Field},
  log::{SharedLog, TracingLog},
  sink::RecordSink,
  slot::FieldSlot,
  validate,
};

// ─── Record ──────────────────────────────────────────────────────────────────

/// A patient record.
///
/// Storage is private; every mutation goes through a named setter so the
/// field's validator and write policy always apply. `first_name` and
/// `last_name` are write-once, the other four fields may be overwritten and
/// each overwrite is reported to the record's log.
#[derive(Clone)]
pub struct Record {
  first_name:    FieldSlot,
  last_name:     FieldSlot,
  birth_date:    FieldSlot,
  phone:         FieldSlot,
  document_type: FieldSlot,
  document_id:   FieldSlot,
  log:           SharedLog,
}

/// Outcome of [`Record::persist`]. A failed save has already been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
  Saved,
  Failed,
}

impl SaveStatus {
  pub fn is_saved(self) -> bool { matches!(self, Self::Saved) }
}

/// A borrowed, serialisable snapshot of a complete record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView<'a> {
  pub first_name:    &'a str,
  pub last_name:     &'a str,
  pub birth_date:    &'a str,
  pub phone:         &'a str,
  pub document_type: &'a str,
  pub document_id:   &'a str,
}

impl Record {
  /// Build a record from six raw values, logging through [`TracingLog`].
  pub fn new(
    first_name: impl AsRef<[u8]>,
    last_name: impl AsRef<[u8]>,
    birth_date: impl AsRef<[u8]>,
    phone: impl AsRef<[u8]>,
    document_type: impl AsRef<[u8]>,
    document_id: impl AsRef<[u8]>,
  ) -> Result<Self> {
    Self::with_log(
      TracingLog::shared(),
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    )
  }

  /// Same as [`Record::new`].
  pub fn create(
    first_name: impl AsRef<[u8]>,
    last_name: impl AsRef<[u8]>,
    birth_date: impl AsRef<[u8]>,
    phone: impl AsRef<[u8]>,
    document_type: impl AsRef<[u8]>,
    document_id: impl AsRef<[u8]>,
  ) -> Result<Self> {
    Self::new(
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    )
  }

  /// Build a record from six raw values, reporting to `log`.
  ///
  /// Fields are set in declaration order, so `document_type` is in place
  /// before `document_id` is checked against it. The first failing field
  /// aborts construction with that field's error.
  pub fn with_log(
    log: SharedLog,
    first_name: impl AsRef<[u8]>,
    last_name: impl AsRef<[u8]>,
    birth_date: impl AsRef<[u8]>,
    phone: impl AsRef<[u8]>,
    document_type: impl AsRef<[u8]>,
    document_id: impl AsRef<[u8]>,
  ) -> Result<Self> {
    let mut record = Self::blank(log);
    record.set_first_name(first_name)?;
    record.set_last_name(last_name)?;
    record.set_birth_date(birth_date)?;
    record.set_phone(phone)?;
    record.set_document_type(document_type)?;
    record.set_document_id(document_id)?;
    record.log.info(&format!("patient {record} was created"));
    Ok(record)
  }

  /// A record with no field set, for incremental entry.
  pub fn blank(log: SharedLog) -> Self {
    Self {
      first_name: FieldSlot::new(Field::FirstName),
      last_name: FieldSlot::new(Field::LastName),
      birth_date: FieldSlot::new(Field::BirthDate),
      phone: FieldSlot::new(Field::Phone),
      document_type: FieldSlot::new(Field::DocumentType),
      document_id: FieldSlot::new(Field::DocumentId),
      log,
    }
  }

  // ── Setters ───────────────────────────────────────────────────────────

  pub fn set_first_name(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    self.first_name.set(value.as_ref(), validate::name, &*self.log)
  }

  pub fn set_last_name(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    self.last_name.set(value.as_ref(), validate::name, &*self.log)
  }

  pub fn set_birth_date(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    self.birth_date.set(value.as_ref(), validate::date, &*self.log)
  }

  pub fn set_phone(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    self.phone.set(value.as_ref(), validate::phone, &*self.log)
  }

  pub fn set_document_type(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    self.document_type.set(
      value.as_ref(),
      |text| validate::document_type(text, &DocumentType::ALL),
      &*self.log,
    )
  }

  /// Fails with [`Error::Unset`](crate::Error::Unset) if `document_type`
  /// has not been set yet.
  ///
  /// Changing `document_type` later does not re-check a stored id.
  pub fn set_document_id(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
    let document_type = match self.document_type.get() {
      Ok(ty) => ty,
      Err(err) => {
        self.log.error(&err.to_string());
        return Err(err);
      }
    };
    self.document_id.set(
      value.as_ref(),
      |text| validate::document_id(text, document_type),
      &*self.log,
    )
  }

  // ── Getters ───────────────────────────────────────────────────────────

  pub fn first_name(&self) -> Result<&str> { self.first_name.get() }

  pub fn last_name(&self) -> Result<&str> { self.last_name.get() }

  pub fn birth_date(&self) -> Result<&str> { self.birth_date.get() }

  pub fn phone(&self) -> Result<&str> { self.phone.get() }

  pub fn document_type(&self) -> Result<&str> { self.document_type.get() }

  pub fn document_id(&self) -> Result<&str> { self.document_id.get() }

  pub fn get(&self, field: Field) -> Result<&str> { self.slot(field).get() }

  // ── Whole-record views ────────────────────────────────────────────────

  /// True once every field has been set.
  pub fn is_complete(&self) -> bool {
    self.slots().iter().all(|slot| slot.is_set())
  }

  /// The six canonical values in declaration order.
  pub fn canonical_fields(&self) -> Result<[&str; FIELD_COUNT]> {
    Ok([
      self.first_name.get()?,
      self.last_name.get()?,
      self.birth_date.get()?,
      self.phone.get()?,
      self.document_type.get()?,
      self.document_id.get()?,
    ])
  }

  /// The canonical values joined by `", "`, for display and logs. Unset
  /// fields render as empty.
  pub fn canonical_string(&self) -> String {
    self
      .slots()
      .iter()
      .map(|slot| slot.get().unwrap_or_default())
      .collect::<Vec<_>>()
      .join(", ")
  }

  pub fn view(&self) -> Result<RecordView<'_>> {
    let [
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    ] = self.canonical_fields()?;
    Ok(RecordView {
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    })
  }

  // ── Persistence ───────────────────────────────────────────────────────

  /// Append this record to `sink`, best effort.
  ///
  /// An incomplete record is an error. A sink failure is logged and
  /// reported as [`SaveStatus::Failed`] rather than returned.
  pub fn persist<S: RecordSink>(&self, sink: &S) -> Result<SaveStatus> {
    let fields = match self.canonical_fields() {
      Ok(fields) => fields,
      Err(err) => {
        self.log.error(&format!("cannot save patient {self}: {err}"));
        return Err(err);
      }
    };

    match sink.append(&fields) {
      Ok(()) => {
        self.log.info(&format!("patient {self} was added to the store"));
        Ok(SaveStatus::Saved)
      }
      Err(err) => {
        self.log.error(&format!("failed to save patient {self}: {err}"));
        Ok(SaveStatus::Failed)
      }
    }
  }

  // ── Internals ─────────────────────────────────────────────────────────

  fn slots(&self) -> [&FieldSlot; FIELD_COUNT] {
    [
      &self.first_name,
      &self.last_name,
      &self.birth_date,
      &self.phone,
      &self.document_type,
      &self.document_id,
    ]
  }

  fn slot(&self, field: Field) -> &FieldSlot {
    match field {
      Field::FirstName => &self.first_name,
      Field::LastName => &self.last_name,
      Field::BirthDate => &self.birth_date,
      Field::Phone => &self.phone,
      Field::DocumentType => &self.document_type,
      Field::DocumentId => &self.document_id,
    }
  }
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.canonical_string())
  }
}

impl fmt::Debug for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Record")
      .field("first_name", &self.first_name.get().ok())
      .field("last_name", &self.last_name.get().ok())
      .field("birth_date", &self.birth_date.get().ok())
      .field("phone", &self.phone.get().ok())
      .field("document_type", &self.document_type.get().ok())
      .field("document_id", &self.document_id.get().ok())
      .finish_non_exhaustive()
  }
}

/// Records compare by field values; the attached log is ignored.
impl PartialEq for Record {
  fn eq(&self, other: &Self) -> bool { self.slots() == other.slots() }
}

impl Eq for Record {}

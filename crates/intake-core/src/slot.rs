//! [`FieldSlot`] — storage for one field plus its write policy.
//!
//! A slot never holds a rejected value: a write either replaces the stored
//! value and reports it, or leaves the slot untouched and returns an error.

use crate::{
  Error, Result,
  field::{Field, WritePolicy},
  log::EventLog,
  validate::{Rejected, Validated},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
  field: Field,
  value: Option<String>,
}

impl FieldSlot {
  pub fn new(field: Field) -> Self { Self { field, value: None } }

  pub fn field(&self) -> Field { self.field }

  /// Whether the slot has been set at least once.
  pub fn is_set(&self) -> bool { self.value.is_some() }

  /// The stored canonical value.
  pub fn get(&self) -> Result<&str> {
    self
      .value
      .as_deref()
      .ok_or(Error::Unset { field: self.field })
  }

  /// Run `raw` through `validate` and store the canonical result.
  ///
  /// Fails with [`Error::NotText`] if `raw` is not UTF-8,
  /// [`Error::Immutable`] if the field is write-once and already holds a
  /// value, or [`Error::Invalid`] if `validate` rejects the text. Every
  /// failure is reported to `log.error`; an overwrite of a write-many field
  /// is reported to `log.info`.
  pub fn set(
    &mut self,
    raw: &[u8],
    validate: impl FnOnce(&str) -> Validated,
    log: &dyn EventLog,
  ) -> Result<()> {
    let field = self.field;

    let Ok(text) = std::str::from_utf8(raw) else {
      return Self::fail(Error::NotText { field }, log);
    };

    if field.policy() == WritePolicy::Once && self.occupied() {
      return Self::fail(Error::Immutable { field }, log);
    }

    let canonical = match validate(text) {
      Ok(canonical) => canonical,
      Err(Rejected(value)) => {
        return Self::fail(Error::Invalid { field, value }, log);
      }
    };

    if self.occupied()
      && let Some(old) = &self.value
    {
      log.info(&format!("{field} changed from {old} to {canonical}"));
    }
    self.value = Some(canonical);
    Ok(())
  }

  /// An empty string does not count as a value for write-once checks or
  /// audit purposes.
  fn occupied(&self) -> bool {
    self.value.as_deref().is_some_and(|v| !v.is_empty())
  }

  fn fail(err: Error, log: &dyn EventLog) -> Result<()> {
    log.error(&err.to_string());
    Err(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    ErrorKind,
    log::{LogLevel, MemoryLog},
    validate,
  };

  #[test]
  fn unset_slot_reports_attribute_error() {
    let slot = FieldSlot::new(Field::Phone);
    assert!(!slot.is_set());
    assert_eq!(slot.get(), Err(Error::Unset { field: Field::Phone }));
  }

  #[test]
  fn stores_canonical_value() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::Phone);
    slot
      .set(b"8 (912) 345-67-89", validate::phone, &*log)
      .unwrap();
    assert_eq!(slot.get(), Ok("79123456789"));
    // A first set is not an overwrite.
    assert!(log.entries().is_empty());
  }

  #[test]
  fn non_utf8_input_is_a_type_error() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::FirstName);
    let err = slot.set(&[0xff, 0xfe], validate::name, &*log);
    assert_eq!(err.unwrap_err().kind(), ErrorKind::Type);
    assert!(!slot.is_set());
    assert_eq!(log.messages(LogLevel::Error), ["first_name must be text"]);
  }

  #[test]
  fn rejected_value_leaves_slot_unchanged() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::BirthDate);
    slot.set(b"2000-01-01", validate::date, &*log).unwrap();

    let err = slot
      .set(b"2023-02-29", validate::date, &*log)
      .unwrap_err();
    assert_eq!(
      err,
      Error::Invalid { field: Field::BirthDate, value: "2023-02-29".into() }
    );
    assert_eq!(slot.get(), Ok("2000-01-01"));
  }

  #[test]
  fn write_once_rejects_second_write() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::LastName);
    slot.set(b"smith", validate::name, &*log).unwrap();

    // Valid and invalid inputs alike are refused.
    for raw in [&b"jones"[..], &b"o'brien"[..]] {
      let err = slot.set(raw, validate::name, &*log).unwrap_err();
      assert_eq!(err, Error::Immutable { field: Field::LastName });
    }
    assert_eq!(slot.get(), Ok("Smith"));
  }

  #[test]
  fn empty_name_does_not_lock_the_slot() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::FirstName);
    slot.set(b"", validate::name, &*log).unwrap();
    assert!(slot.is_set());
    slot.set(b"anna", validate::name, &*log).unwrap();
    assert_eq!(slot.get(), Ok("Anna"));
  }

  #[test]
  fn overwrite_is_audited_with_old_and_new() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::Phone);
    slot.set(b"89123456789", validate::phone, &*log).unwrap();
    slot.set(b"+1 999 000 11 22", validate::phone, &*log).unwrap();

    assert_eq!(slot.get(), Ok("79990001122"));
    assert_eq!(
      log.messages(LogLevel::Info),
      ["phone changed from 79123456789 to 79990001122"]
    );
  }

  #[test]
  fn rejected_overwrite_is_not_audited() {
    let log = MemoryLog::new();
    let mut slot = FieldSlot::new(Field::Phone);
    slot.set(b"89123456789", validate::phone, &*log).unwrap();
    assert!(slot.set(b"123", validate::phone, &*log).is_err());

    assert!(log.messages(LogLevel::Info).is_empty());
    assert_eq!(slot.get(), Ok("79123456789"));
  }
}

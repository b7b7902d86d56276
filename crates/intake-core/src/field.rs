//! Field identities, write policies and the closed set of document types.

use strum::{Display, EnumString, IntoStaticStr};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// Number of fields on a [`Record`](crate::record::Record).
pub const FIELD_COUNT: usize = 6;

/// One of the six patient fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  FirstName,
  LastName,
  BirthDate,
  Phone,
  DocumentType,
  DocumentId,
}

/// Whether a field may be overwritten after its first successful set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
  Once,
  Many,
}

impl Field {
  /// All fields in declaration (and storage) order.
  ///
  /// `DocumentType` precedes `DocumentId`: the id rule depends on the type.
  pub const ALL: [Field; FIELD_COUNT] = [
    Field::FirstName,
    Field::LastName,
    Field::BirthDate,
    Field::Phone,
    Field::DocumentType,
    Field::DocumentId,
  ];

  pub fn policy(self) -> WritePolicy {
    match self {
      Self::FirstName | Self::LastName => WritePolicy::Once,
      _ => WritePolicy::Many,
    }
  }
}

// ─── Document types ──────────────────────────────────────────────────────────

/// The identity documents a patient may register with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum DocumentType {
  #[strum(to_string = "passport")]
  Passport,
  #[strum(to_string = "foreign passport")]
  ForeignPassport,
  #[strum(to_string = "driver's license")]
  DriversLicense,
}

impl DocumentType {
  pub const ALL: [DocumentType; 3] = [
    DocumentType::Passport,
    DocumentType::ForeignPassport,
    DocumentType::DriversLicense,
  ];

  /// Number of digits a document id of this type must carry.
  pub fn required_id_len(self) -> usize {
    match self {
      Self::ForeignPassport => 9,
      Self::Passport | Self::DriversLicense => 10,
    }
  }
}

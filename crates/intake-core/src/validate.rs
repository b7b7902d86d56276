//! Pure per-field validators.
//!
//! Each validator takes untrusted text and returns either the canonical form
//! of the value or a [`Rejected`] carrying the original text. None of them
//! panic or allocate beyond the returned string.

use std::{str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::field::DocumentType;

/// A validator's verdict on a rejected input. Holds the text as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected(pub String);

impl Rejected {
  fn of(text: &str) -> Self { Self(text.to_owned()) }
}

pub type Validated = Result<String, Rejected>;

static NAME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-zА-Яа-яЁё\s]*$").expect("name pattern compiles")
});

// Anchored at the start only; see `date`.
static DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date pattern compiles")
});

static PHONE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9()+\-]*$").expect("phone pattern compiles")
});

static DOCUMENT_ID_CHARS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[0-9/\-]*$").expect("document id pattern compiles")
});

const PHONE_DIGITS: usize = 11;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn strip_whitespace(text: &str) -> String {
  text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn ascii_digits(text: &str) -> String {
  text.chars().filter(char::is_ascii_digit).collect()
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first
      .to_uppercase()
      .chain(chars.flat_map(char::to_lowercase))
      .collect(),
    None => String::new(),
  }
}

// ─── Validators ──────────────────────────────────────────────────────────────

/// Latin or Cyrillic letters and whitespace only; canonical form is
/// capitalised.
pub fn name(text: &str) -> Validated {
  if !NAME.is_match(text) {
    return Err(Rejected::of(text));
  }
  Ok(capitalize(text))
}

/// A `YYYY-MM-DD` calendar date. Canonical form is the ISO-8601 rendering
/// of the parsed date.
///
/// Whitespace is ignored by the pattern check only, which anchors the start
/// of the text. The date itself is read from `text` as given, so any
/// whitespace or trailing input fails the parse.
pub fn date(text: &str) -> Validated {
  let stripped = strip_whitespace(text);
  if !DATE_PREFIX.is_match(&stripped) {
    return Err(Rejected::of(text));
  }
  // chrono skips leading whitespace before numeric items.
  if text.contains(char::is_whitespace) {
    return Err(Rejected::of(text));
  }
  NaiveDate::parse_from_str(text, "%Y-%m-%d")
    .map(|d| d.format("%Y-%m-%d").to_string())
    .map_err(|_| Rejected::of(text))
}

/// Digits, parentheses, `-` and `+`, whitespace ignored, carrying exactly
/// eleven digits. Canonical form is the digits with the first one replaced
/// by `7`.
pub fn phone(text: &str) -> Validated {
  let stripped = strip_whitespace(text);
  if !PHONE_CHARS.is_match(&stripped) {
    return Err(Rejected::of(text));
  }
  let digits = ascii_digits(&stripped);
  if digits.len() != PHONE_DIGITS {
    return Err(Rejected::of(text));
  }
  Ok(format!("7{}", &digits[1..]))
}

/// Case-insensitive membership in `allowed`. Canonical form is lower-cased.
pub fn document_type(text: &str, allowed: &[DocumentType]) -> Validated {
  let lowered = text.to_lowercase();
  match DocumentType::from_str(&lowered) {
    Ok(ty) if allowed.contains(&ty) => Ok(lowered),
    _ => Err(Rejected::of(text)),
  }
}

/// Digits, `/` and `-`, whitespace ignored. The digit count must match
/// `document_type`: nine for a foreign passport, ten for anything else.
/// Canonical form is the digits alone.
pub fn document_id(text: &str, document_type: &str) -> Validated {
  let stripped = strip_whitespace(text);
  if !DOCUMENT_ID_CHARS.is_match(&stripped) {
    return Err(Rejected::of(text));
  }
  let required = DocumentType::from_str(document_type)
    .map_or(DocumentType::Passport.required_id_len(), |ty| {
      ty.required_id_len()
    });
  let digits = ascii_digits(&stripped);
  if digits.len() != required {
    return Err(Rejected::of(text));
  }
  Ok(digits)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rejected(text: &str) -> Validated { Err(Rejected(text.to_owned())) }

  // ── name ────────────────────────────────────────────────────────────────

  #[test]
  fn name_capitalizes_only_the_first_letter() {
    assert_eq!(name("mary ann"), Ok("Mary ann".into()));
    assert_eq!(name("MARY"), Ok("Mary".into()));
  }

  #[test]
  fn name_accepts_cyrillic() {
    assert_eq!(name("пётр"), Ok("Пётр".into()));
    assert_eq!(name("ЁЖИК"), Ok("Ёжик".into()));
  }

  #[test]
  fn name_rejects_punctuation_and_digits() {
    assert_eq!(name("o'brien"), rejected("o'brien"));
    assert_eq!(name("anne-marie"), rejected("anne-marie"));
    assert_eq!(name("r2d2"), rejected("r2d2"));
    assert_eq!(name("snake_case"), rejected("snake_case"));
  }

  #[test]
  fn name_rejects_other_alphabets() {
    assert!(name("Ζωή").is_err());
    assert!(name("José").is_err());
  }

  // ── date ────────────────────────────────────────────────────────────────

  #[test]
  fn date_accepts_leap_day() {
    assert_eq!(date("2024-02-29"), Ok("2024-02-29".into()));
  }

  #[test]
  fn date_rejects_impossible_day() {
    assert_eq!(date("2023-02-29"), rejected("2023-02-29"));
    assert!(date("2023-13-01").is_err());
  }

  #[test]
  fn date_rejects_pattern_mismatch() {
    assert_eq!(date("abcd-02-29"), rejected("abcd-02-29"));
    assert!(date("29.02.2024").is_err());
    assert!(date("2024-2-29").is_err());
  }

  #[test]
  fn date_rejects_embedded_whitespace() {
    assert_eq!(date("2024 - 01 - 05"), rejected("2024 - 01 - 05"));
    assert_eq!(date(" 2024-01-05"), rejected(" 2024-01-05"));
    assert_eq!(date("2024-01-05\n"), rejected("2024-01-05\n"));
    assert_eq!(date("2024-01- 05"), rejected("2024-01- 05"));
  }

  #[test]
  fn date_rejects_trailing_input() {
    assert!(date("2024-01-05T10:00").is_err());
  }

  // ── phone ───────────────────────────────────────────────────────────────

  #[test]
  fn phone_normalizes_formatted_number() {
    assert_eq!(phone("+7 (912) 345-67-89"), Ok("79123456789".into()));
  }

  #[test]
  fn phone_replaces_leading_digit() {
    assert_eq!(phone("8 912 345 67 89"), Ok("79123456789".into()));
  }

  #[test]
  fn phone_rejects_wrong_length() {
    assert_eq!(phone("123"), rejected("123"));
    assert!(phone("+7 (912) 345-67-890").is_err());
  }

  #[test]
  fn phone_rejects_letters() {
    assert!(phone("8-800-CALL-NOW").is_err());
    assert!(phone("8 912 345 67 89 ext").is_err());
  }

  // ── document type ───────────────────────────────────────────────────────

  #[test]
  fn document_type_is_case_insensitive() {
    let all = &DocumentType::ALL;
    assert_eq!(document_type("Passport", all), Ok("passport".into()));
    assert_eq!(
      document_type("FOREIGN PASSPORT", all),
      Ok("foreign passport".into())
    );
    assert_eq!(
      document_type("Driver's License", all),
      Ok("driver's license".into())
    );
  }

  #[test]
  fn document_type_rejects_unknown_names() {
    let all = &DocumentType::ALL;
    assert_eq!(document_type("driver", all), rejected("driver"));
    assert_eq!(document_type("ПАСПОРТ", all), rejected("ПАСПОРТ"));
    assert!(document_type(" passport", all).is_err());
  }

  #[test]
  fn document_type_honours_allowed_set() {
    let only_passport = [DocumentType::Passport];
    assert!(document_type("passport", &only_passport).is_ok());
    assert!(document_type("foreign passport", &only_passport).is_err());
  }

  // ── document id ─────────────────────────────────────────────────────────

  #[test]
  fn document_id_length_depends_on_type() {
    assert_eq!(
      document_id("12 34 56 789", "foreign passport"),
      Ok("123456789".into())
    );
    assert_eq!(
      document_id("12 34 56 789", "passport"),
      rejected("12 34 56 789")
    );
    assert_eq!(
      document_id("1234-567/890", "driver's license"),
      Ok("1234567890".into())
    );
  }

  #[test]
  fn document_id_rejects_other_characters() {
    assert!(document_id("12345 6789x", "passport").is_err());
    assert!(document_id("1234.567.890", "passport").is_err());
  }
}

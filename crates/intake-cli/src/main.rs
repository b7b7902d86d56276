//! `intake` — add patients to, and list patients from, a record store.
//!
//! # Usage
//!
//! ```text
//! intake add ivan petrov 1990-05-17 "+7 (912) 345-67-89" passport "4509 123456"
//! intake list --limit 10
//! intake --store ~/patients.csv list --json
//! ```
//!
//! Settings come from `intake.toml` (or `--config`) and `INTAKE_*`
//! environment variables; `--store` overrides both.

mod settings;

use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use intake_core::{Record, field::FIELD_COUNT};
use intake_store_file::FileStore;
use settings::{Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Patient record intake")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "intake.toml")]
  config: PathBuf,

  /// Record store file; overrides the configured `store_path`.
  #[arg(short, long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Validate a patient and append it to the store.
  Add {
    first_name:    String,
    last_name:     String,
    /// `YYYY-MM-DD`.
    birth_date:    String,
    phone:         String,
    /// `passport`, `foreign passport` or `driver's license`.
    document_type: String,
    document_id:   String,
  },

  /// Print the patients in the store, in file order.
  List {
    /// Stop after this many records.
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print one JSON object per line instead of the canonical string.
    #[arg(long)]
    json: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = &cli.store {
    settings.store_path = expand_tilde(store);
  }
  let store = FileStore::new(&settings.store_path);

  match cli.command {
    Command::Add {
      first_name,
      last_name,
      birth_date,
      phone,
      document_type,
      document_id,
    } => {
      add(
        &store,
        [first_name, last_name, birth_date, phone, document_type, document_id],
      )?;
      Ok(ExitCode::SUCCESS)
    }
    Command::List { limit, json } => {
      let mut stdout = std::io::stdout().lock();
      let failures = list(&store, limit, json, &mut stdout)?;
      if failures > 0 {
        tracing::error!("{failures} stored record(s) could not be read");
        return Ok(ExitCode::FAILURE);
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}

/// Validate and append one patient. Invalid input is an error; a failed
/// append is only logged.
fn add(store: &FileStore, fields: [String; FIELD_COUNT]) -> anyhow::Result<()> {
  let [first_name, last_name, birth_date, phone, document_type, document_id] =
    fields;
  let record = Record::create(
    first_name,
    last_name,
    birth_date,
    phone,
    document_type,
    document_id,
  )
  .context("invalid patient")?;

  record.persist(store)?;
  Ok(())
}

/// Write the stored patients to `out` and return how many lines could not
/// be read. Those have already been logged by the store and are skipped.
fn list(
  store: &FileStore,
  limit: Option<usize>,
  json: bool,
  out: &mut impl Write,
) -> anyhow::Result<usize> {
  let records = store
    .limit(limit.unwrap_or(usize::MAX))
    .with_context(|| format!("failed to open store {:?}", store.path()))?;

  let mut failures = 0usize;
  for result in records {
    match result {
      Ok(record) if json => {
        writeln!(out, "{}", serde_json::to_string(&record.view()?)?)?;
      }
      Ok(record) => writeln!(out, "{record}")?,
      Err(_) => failures += 1,
    }
  }

  Ok(failures)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use intake_core::log::{LogLevel, MemoryLog};
  use tempfile::TempDir;

  use super::*;

  const ANNA: &str =
    "Anna,Petrova,1990-05-17,79123456789,passport,1000000001\n";
  const BORIS: &str =
    "Boris,Petrov,1988-01-02,79123456780,passport,1000000002\n";

  fn fields(first_name: &str) -> [String; FIELD_COUNT] {
    [
      first_name,
      "petrova",
      "1990-05-17",
      "89123456789",
      "passport",
      "1000000001",
    ]
    .map(String::from)
  }

  #[test]
  fn add_appends_a_validated_patient() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");
    let store = FileStore::new(&path);

    add(&store, fields("anna")).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), ANNA);
  }

  #[test]
  fn add_rejects_invalid_input() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("patients.csv"));

    let err = add(&store, fields("o'brien")).unwrap_err();
    assert!(err.to_string().contains("invalid patient"));
  }

  #[test]
  fn add_succeeds_when_the_append_fails() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());

    add(&store, fields("anna")).unwrap();
  }

  #[test]
  fn list_prints_canonical_strings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");
    fs::write(&path, [ANNA, BORIS].concat()).unwrap();
    let store = FileStore::new(&path);

    let mut out = Vec::new();
    assert_eq!(list(&store, None, false, &mut out).unwrap(), 0);
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "Anna, Petrova, 1990-05-17, 79123456789, passport, 1000000001\n\
       Boris, Petrov, 1988-01-02, 79123456780, passport, 1000000002\n"
    );
  }

  #[test]
  fn list_limit_skips_bad_lines_without_counting_them() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patients.csv");
    fs::write(&path, ["garbage\n", ANNA, BORIS].concat()).unwrap();
    let log = MemoryLog::new();
    let store = FileStore::with_log(&path, log.clone());

    let mut out = Vec::new();
    assert_eq!(list(&store, Some(2), true, &mut out).unwrap(), 1);

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"first_name\":\"Anna\""));
    assert!(lines[1].contains("\"first_name\":\"Boris\""));
    // Reported once, by the store.
    assert_eq!(log.messages(LogLevel::Error).len(), 1);
  }
}

//! End-to-end tests for the orderform pipeline through the CLI library
//!
//! The mock provider is configured through the same TOML the binary reads,
//! so these tests exercise config loading, provider selection, extraction,
//! validation, formatting and appending together.

use orderform_cli::commands::extract::extract_text;
use orderform_cli::commands::process::process_text;
use orderform_cli::commands::read_record;
use orderform_cli::commands::row::{append, record_to_row};
use orderform_cli::{CliError, Config};
use orderform_domain::Cell;
use orderform_gatekeeper::ValidationConfig;
use orderform_sheets::{JsonLinesSheet, ROW_WIDTH};
use std::fs;

const ACME_RESPONSE: &str = r#"```json
{
  "client": {"dsp_name": "Acme Logistics", "dsp_code": "ACM", "dsp_fein": "123456789"},
  "contacts": [{"contact_type": "DSP", "email": "owner@acme.com"}],
  "bank_account": {"bank_name": "First Bank", "routing_number": "021000021", "account_number": "000123", "account_type": "Savings"},
  "billing_terms": {"initial_term_period": "12 months", "renewal_term_period": "12 months",
                    "initial_term_start_date": "2024-02-01", "initial_term_end_date": "2025-01-31"},
  "plan_catalog": [{"employee_range_label": "51-100", "one_time_implementation_fee": 750,
                    "weekly_base_fee": 60, "weekly_per_check": 5}],
  "add_on_modules": [],
  "additional_notes": null
}
```"#;

fn mock_config(response: &str, sheet_path: &std::path::Path) -> Config {
    let toml = format!(
        "[provider]\nkind = \"mock\"\nmock_response = '''{}'''\n\n[sheet]\npath = {:?}\n",
        response,
        sheet_path.display().to_string()
    );
    Config::parse(&toml).unwrap()
}

#[tokio::test]
async fn test_extract_with_mock_provider() {
    let dir = tempfile::tempdir().unwrap();
    let config = mock_config(ACME_RESPONSE, &dir.path().join("orders.jsonl"));

    let result = extract_text("DSP Name: Acme Logistics", &config).await.unwrap();

    assert_eq!(result.metadata.model_name, "mock");
    assert_eq!(result.metadata.chunk_count, 1);
    assert_eq!(
        result.record.client.and_then(|c| c.dsp_fein).as_deref(),
        Some("123456789")
    );
}

#[tokio::test]
async fn test_process_text_to_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = mock_config(ACME_RESPONSE, &dir.path().join("orders.jsonl"));

    let row = process_text("order form text", &config, ValidationConfig::default())
        .await
        .unwrap();

    let cells = row.cells();
    assert_eq!(cells.len(), ROW_WIDTH);
    assert_eq!(cells[0], Cell::from("02/01/2024"));
    assert_eq!(cells[4], Cell::from("owner@acme.com"));
    assert_eq!(cells[12], Cell::from("NA"));
    assert_eq!(cells[15], Cell::from("Base Fee: $60.00, per check: $5.00"));
    assert_eq!(cells[16], Cell::from("NA"));
    assert_eq!(cells[17], Cell::from("$750.00"));
    assert_eq!(cells[33], Cell::from("12 Months"));
    assert_eq!(cells[37], Cell::from("Savings"));
    assert_eq!(cells[38], Cell::from("'021000021"));
}

#[tokio::test]
async fn test_unparseable_response_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = mock_config("I could not read this document.", &dir.path().join("orders.jsonl"));

    // Every chunk degrades; the merged record has no client, so validation rejects it
    let result = process_text("order form text", &config, ValidationConfig::default()).await;
    assert!(matches!(result, Err(CliError::Rejected(_))));
}

#[tokio::test]
async fn test_append_after_process() {
    let dir = tempfile::tempdir().unwrap();
    let sheet_path = dir.path().join("orders.jsonl");
    let config = mock_config(ACME_RESPONSE, &sheet_path);

    let row = process_text("order form text", &config, ValidationConfig::default())
        .await
        .unwrap();
    append(&row, &config).unwrap();
    append(&row, &config).unwrap();

    let rows = JsonLinesSheet::new(&sheet_path).read_rows().unwrap();
    assert_eq!(rows, vec![row.clone(), row]);
}

#[test]
fn test_record_file_to_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.json");
    fs::write(
        &path,
        r#"{"client": {"dsp_name": "Acme"}, "billing_terms": {"renewal_term_period": "6 months"}}"#,
    )
    .unwrap();

    let record = read_record(&path).unwrap();
    let row = record_to_row(&record, ValidationConfig::strict()).unwrap();
    assert_eq!(row.cells()[5], Cell::from("Acme"));
    assert_eq!(row.cells()[34], Cell::from("Automatic for 6 months"));
}

#[test]
fn test_rejected_record_is_not_formatted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.json");
    fs::write(&path, r#"{"client": {"dsp_name": "Acme"}}"#).unwrap();

    let record = read_record(&path).unwrap();
    let result = record_to_row(&record, ValidationConfig::default());
    assert!(matches!(result, Err(CliError::Rejected(_))));
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[provider]\nkind = \"mock\"\n\n[extractor]\nmax_chunk_size = 1200\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.extractor.max_chunk_size, 1200);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(CliError::Io(_))));
}

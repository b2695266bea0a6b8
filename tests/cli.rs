//! E2E tests for the report, assets, validate and schema commands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn ihtc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ihtc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn decimal(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialised as string")
        .parse()
        .expect("valid decimal")
}

/// Test the formatted report from a JSON estate
#[test]
fn report_tables_from_json() {
    let output = ihtc(&["report", "-i", "tests/data/estate.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("ASSET VALUES"));
    assert!(stdout.contains("ESTATE WORTH"));
    assert!(stdout.contains("ALLOWANCES & EXEMPTIONS"));
    assert!(stdout.contains("TAX INFORMATION"));
    assert!(stdout.contains("STATUS INDICATORS"));

    assert!(stdout.contains("£2,950,000.00"));
    assert!(stdout.contains("£175,000.00"));
    assert!(stdout.contains("£930,000.00"));
    assert!(stdout.contains("40%"));
}

/// Test JSON report output
#[test]
fn report_json_output() {
    let output = ihtc(&["report", "-i", "tests/data/estate.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(decimal(&json["total_assets_incl_trusts"]), dec!(2950000));
    assert_eq!(decimal(&json["total_assets_excl_trusts"]), dec!(2700000));
    assert_eq!(decimal(&json["gross_estate_value"]), dec!(2550000));
    assert_eq!(decimal(&json["total_charitable_value_excl_trusts"]), dec!(200000));
    assert_eq!(decimal(&json["nil_rate_band_allowance"]), Decimal::ZERO);
    assert_eq!(decimal(&json["residence_nil_rate_band_allowance"]), dec!(175000));
    assert_eq!(decimal(&json["inheritance_tax_rate"]), dec!(40));
    assert_eq!(decimal(&json["inheritance_tax_payable"]), dec!(930000));
    assert_eq!(decimal(&json["un_allocated_assets_value"]), dec!(2000000));
    assert_eq!(json["exemption_type_rnrb"], true);
    assert_eq!(json["exemption_type_charity"], true);
    assert_eq!(json["is_more_than_10_percent_to_charities"], false);
}

/// CSV input gives the same valuation as JSON input
#[test]
fn report_from_csv_matches_json() {
    let from_csv = ihtc(&[
        "report",
        "-a",
        "tests/data/assets.csv",
        "-l",
        "tests/data/liabilities.csv",
        "--json",
    ]);
    let from_json = ihtc(&["report", "-i", "tests/data/estate.json", "--json"]);

    assert!(from_csv.status.success(), "Command failed: {:?}", from_csv);
    assert!(from_json.status.success(), "Command failed: {:?}", from_json);

    let csv: serde_json::Value = serde_json::from_slice(&from_csv.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&from_json.stdout).unwrap();
    for key in [
        "legacy_worth",
        "net_worth",
        "estate_value_for_trusts_planning",
        "gross_estate_value",
        "inheritance_tax_payable",
    ] {
        assert_eq!(decimal(&csv[key]), decimal(&json[key]), "{key} differs");
    }
}

/// Test field,value CSV output and the supplementary flags
#[test]
fn report_csv_output() {
    let output = ihtc(&[
        "report",
        "-i",
        "tests/data/estate.json",
        "--csv",
        "--business",
        "--gifts",
        "12000",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("field,value"));
    assert!(stdout.contains("exemption_type_business,true"));
    assert!(stdout.contains("exemption_type_agricultural,false"));
    assert!(stdout.contains("total_gifts_made_in_last_7_years,12000"));
}

/// Overriding the taper threshold restores part of the nil rate band
#[test]
fn report_with_rules_override() {
    let output = ihtc(&[
        "report",
        "-i",
        "tests/data/estate.json",
        "--json",
        "--taper-threshold",
        "2500000",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 2,700,000 is 200,000 over the threshold, withdrawing 100,000
    assert_eq!(decimal(&json["nil_rate_band_allowance"]), dec!(225000));
}

fn ihtc_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ihtc"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

/// JSON estate piped through stdin
#[test]
fn report_from_stdin() {
    let output = ihtc_with_stdin(
        &["report", "-i", "-", "--json"],
        br#"{ "assets": [ { "alias": "Estate", "value": 3000000, "asset_type": "property" } ] }"#,
    );

    assert!(output.status.success(), "Command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decimal(&json["inheritance_tax_payable"]), dec!(1200000));
}

/// Values whose sum would overflow are an input error, not a crash
#[test]
fn report_rejects_amounts_beyond_range() {
    let output = ihtc_with_stdin(
        &["report", "-i", "-"],
        br#"{ "assets": [
            { "alias": "First", "value": "39614081257132168796771975168", "asset_type": "other" },
            { "alias": "Second", "value": "39614081257132168796771975168", "asset_type": "other" }
        ] }"#,
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("outside the supported range"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");

    let output = ihtc(&[
        "report",
        "-i",
        "tests/data/estate.json",
        "--nil-rate-band",
        "1000000000000000000",
    ]);
    assert!(!output.status.success());
}

#[test]
fn report_requires_input() {
    let output = ihtc(&["report"]);
    assert!(!output.status.success());
}

#[test]
fn report_rejects_unknown_asset_type() {
    let dir = std::env::temp_dir().join(format!("ihtc-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad_assets.csv");
    std::fs::write(&path, "alias,value,asset_type\nBoat,5000,yacht\n").unwrap();

    let output = ihtc(&["report", "-a", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown asset type: yacht"), "stderr: {stderr}");
}

#[test]
fn assets_table() {
    let output = ihtc(&["assets", "-i", "tests/data/estate.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Family home"));
    assert!(stdout.contains("life insurance"));
    assert!(stdout.contains("ISA"));
    assert!(stdout.contains("Mortgage"));
    assert!(stdout.contains("£200,000.00"));
}

#[test]
fn assets_csv_lists_liabilities_after_assets() {
    let output = ihtc(&["assets", "-i", "tests/data/estate.json", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let (assets, liabilities) = stdout
        .split_once("\n\n")
        .expect("blank line between asset and liability rows");
    assert!(assets.starts_with("row_num,alias,asset_type,value,held_in_trust"));
    assert_eq!(assets.lines().count(), 5);
    assert!(assets.contains("Family home"));
    assert_eq!(
        liabilities.lines().collect::<Vec<_>>(),
        vec!["row_num,alias,liability_type,value", "1,Mortgage,mortgage,\"£150,000.00\""]
    );
}

#[test]
fn validate_clean_estate() {
    let output = ihtc(&["validate", "-i", "tests/data/estate.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

#[test]
fn validate_reports_issues() {
    let output = ihtc(&["validate", "-i", "tests/data/issues.json", "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["issue_count"], 2);
    assert_eq!(json["issues"][0]["type"], "NegativeAssetValue");
    assert_eq!(json["issues"][0]["alias"], "Overdrawn account");
    assert_eq!(json["issues"][1]["type"], "SharesExceedWhole");
    assert_eq!(json["issues"][1]["alias"], "Cottage");
}

#[test]
fn schema_outputs() {
    let output = ihtc(&["schema"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["assets"].is_object());
    assert!(schema["properties"]["liabilities"].is_object());

    let output = ihtc(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("alias,value,asset_type,held_in_trust"));
    assert!(stdout.contains("alias,value,liability_type"));

    let output = ihtc(&["schema", "csv-fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Assets CSV"));
    assert!(stdout.contains("required"));
}

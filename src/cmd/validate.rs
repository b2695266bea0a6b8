//! Validate command - surface input the valuation accepts but probably should not

use super::display::format_gbp;
use super::InputArgs;
use crate::core::{check_estate, Warning};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output: the finding's own fields plus a sentence
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(flatten)]
    warning: Warning,
    message: String,
}

impl From<&Warning> for ValidationIssue {
    fn from(warning: &Warning) -> Self {
        let message = match warning {
            Warning::NegativeAssetValue { value, .. } => format!(
                "Asset value {} is negative and reduces the estate",
                format_gbp(*value)
            ),
            Warning::NegativeLiabilityValue { value, .. } => format!(
                "Liability value {} is negative and increases the estate",
                format_gbp(*value)
            ),
            Warning::ShareOutOfRange { share, percent, .. } => {
                format!("{share} share of {percent}% is outside 0-100%")
            }
            Warning::SharesExceedWhole { total_percent, .. } => format!(
                "Spouse and charity shares total {total_percent}%, more than the whole asset"
            ),
        };
        ValidationIssue {
            warning: warning.clone(),
            message,
        }
    }
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let estate = self.input.read_estate()?;
        let issues: Vec<ValidationIssue> = check_estate(&estate.assets, &estate.liabilities)
            .iter()
            .map(ValidationIssue::from)
            .collect();

        if self.json {
            self.print_json(&issues)?;
        } else {
            self.print_text(&issues);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[ValidationIssue]) {
        println!();
        println!("VALIDATION RESULTS");
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();

            for (i, issue) in issues.iter().enumerate() {
                println!(
                    "  {}. [{}] {}",
                    i + 1,
                    issue.warning.name(),
                    issue.warning.alias()
                );
                println!("     {}", issue.message);
                println!();
            }
        }
    }

    fn print_json(&self, issues: &[ValidationIssue]) -> anyhow::Result<()> {
        let output = ValidationOutput {
            issue_count: issues.len(),
            issues: issues.to_vec(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

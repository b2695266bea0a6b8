//! Report command - the full valuation, grouped the way it is usually read

use super::display::{format_gbp, format_percentage, yes_no};
use super::{InputArgs, RulesArgs};
use crate::core::{check_estate, ValuationReport};
use crate::utils::write_csv;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    rules: RulesArgs,

    /// Output as JSON instead of formatted tables
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV (field,value) instead of formatted tables
    #[arg(long)]
    csv: bool,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let estate = self.input.read_estate()?;
        for warning in check_estate(&estate.assets, &estate.liabilities) {
            log::warn!("Valuing input as given: {:?}", warning);
        }

        let rules = self.rules.rules();
        let report = estate.valuation(&rules);

        log::info!(
            "Combined allowance {}, inheritance tax payable {} at {}%",
            report.combined_allowance(),
            report.inheritance_tax_payable,
            report.inheritance_tax_rate
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else if self.csv {
            let rows = sections(&report)
                .into_iter()
                .flat_map(|section| section.lines)
                .map(|line| FieldRecord {
                    field: line.key,
                    value: line.value.raw(),
                });
            write_csv(rows, io::stdout())
        } else {
            print_tables(&report);
            Ok(())
        }
    }
}

/// A titled group of report lines
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<Line>,
}

pub struct Line {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Figure,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Figure {
    Money(Decimal),
    Percent(Decimal),
    Flag(bool),
}

impl Figure {
    fn display(&self) -> String {
        match self {
            Figure::Money(amount) => format_gbp(*amount),
            Figure::Percent(rate) => format_percentage(*rate),
            Figure::Flag(flag) => yes_no(*flag).to_string(),
        }
    }

    fn raw(&self) -> String {
        match self {
            Figure::Money(amount) | Figure::Percent(amount) => amount.to_string(),
            Figure::Flag(flag) => flag.to_string(),
        }
    }
}

fn line(key: &'static str, label: &'static str, value: Figure) -> Line {
    Line { key, label, value }
}

pub fn sections(r: &ValuationReport) -> Vec<Section> {
    use Figure::*;

    vec![
        Section {
            title: "Asset Values",
            lines: vec![
                line(
                    "total_assets_incl_trusts",
                    "Total Assets (incl. Trusts)",
                    Money(r.total_assets_incl_trusts),
                ),
                line(
                    "total_assets_excl_trusts",
                    "Total Assets (excl. Trusts)",
                    Money(r.total_assets_excl_trusts),
                ),
                line("life_insurance_value", "Life Insurance", Money(r.life_insurance_value)),
                line("isa_value", "ISA", Money(r.isa_value)),
                line("total_liabilities", "Total Liabilities", Money(r.total_liabilities)),
            ],
        },
        Section {
            title: "Estate Worth",
            lines: vec![
                line("legacy_worth", "Legacy Worth", Money(r.legacy_worth)),
                line("net_worth", "Net Worth", Money(r.net_worth)),
                line(
                    "estate_value_for_trusts_planning",
                    "Estate Value (Trusts Planning)",
                    Money(r.estate_value_for_trusts_planning),
                ),
                line("gross_estate_value", "Gross Estate Value", Money(r.gross_estate_value)),
            ],
        },
        Section {
            title: "Allowances & Exemptions",
            lines: vec![
                line(
                    "nil_rate_band_allowance",
                    "Nil Rate Band Allowance",
                    Money(r.nil_rate_band_allowance),
                ),
                line(
                    "residence_nil_rate_band_allowance",
                    "Residence Nil Rate Band Allowance",
                    Money(r.residence_nil_rate_band_allowance),
                ),
                line(
                    "total_spousal_value_excl_trusts",
                    "Spousal Value (excl. Trusts)",
                    Money(r.total_spousal_value_excl_trusts),
                ),
                line(
                    "total_charitable_value_excl_trusts",
                    "Charitable Value (excl. Trusts)",
                    Money(r.total_charitable_value_excl_trusts),
                ),
                line(
                    "total_gifts_made_in_last_7_years",
                    "Gifts in Last 7 Years",
                    Money(r.total_gifts_made_in_last_7_years),
                ),
            ],
        },
        Section {
            title: "Tax Information",
            lines: vec![
                line(
                    "is_more_than_10_percent_to_charities",
                    "10%+ to Charity",
                    Flag(r.is_more_than_10_percent_to_charities),
                ),
                line(
                    "inheritance_tax_rate",
                    "Inheritance Tax Rate",
                    Percent(r.inheritance_tax_rate),
                ),
                line("taxable_estate", "Taxable Estate", Money(r.taxable_estate)),
                line(
                    "inheritance_tax_payable",
                    "Inheritance Tax Payable",
                    Money(r.inheritance_tax_payable),
                ),
                line(
                    "un_allocated_assets_value",
                    "Unallocated Assets",
                    Money(r.un_allocated_assets_value),
                ),
            ],
        },
        Section {
            title: "Status Indicators",
            lines: vec![
                line("exemption_type_spousal", "Spousal Exemption", Flag(r.exemption_type_spousal)),
                line("exemption_type_charity", "Charity Exemption", Flag(r.exemption_type_charity)),
                line("exemption_type_rnrb", "RNRB Exemption", Flag(r.exemption_type_rnrb)),
                line(
                    "exemption_type_agricultural",
                    "Agricultural Relief",
                    Flag(r.exemption_type_agricultural),
                ),
                line("exemption_type_business", "Business Relief", Flag(r.exemption_type_business)),
                line(
                    "un_allocated_assets",
                    "Unallocated Assets Present",
                    Flag(r.un_allocated_assets),
                ),
            ],
        },
    ]
}

#[derive(Debug, Tabled)]
struct ReportRow {
    #[tabled(rename = "Item")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize)]
struct FieldRecord {
    field: &'static str,
    value: String,
}

fn print_tables(report: &ValuationReport) {
    println!();
    println!("ESTATE VALUE & INHERITANCE TAX SUMMARY");
    for section in sections(report) {
        let rows: Vec<ReportRow> = section
            .lines
            .iter()
            .map(|line| ReportRow {
                label: line.label,
                value: line.value.display(),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();

        println!();
        println!("{}", section.title.to_uppercase());
        println!("{}", table);
    }
    println!();
}

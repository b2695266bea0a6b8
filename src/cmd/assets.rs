//! Assets command - the input estate, one row per asset and liability

use super::display::{asset_type_label, format_gbp, format_percentage, liability_type_label, yes_no};
use super::InputArgs;
use crate::core::{Asset, Liability};
use crate::utils::write_csv;
use clap::Args;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct AssetsCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output as CSV instead of formatted tables: the asset rows, then a blank
    /// line and the liability rows (each block with its own header)
    #[arg(long)]
    csv: bool,
}

impl AssetsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let estate = self.input.read_estate()?;
        let asset_rows: Vec<AssetRow> = estate
            .assets
            .iter()
            .enumerate()
            .map(|(i, asset)| AssetRow::new(i + 1, asset))
            .collect();
        let liability_rows: Vec<LiabilityRow> = estate
            .liabilities
            .iter()
            .enumerate()
            .map(|(i, liability)| LiabilityRow::new(i + 1, liability))
            .collect();

        if self.csv {
            write_csv(&asset_rows, io::stdout())?;
            if !liability_rows.is_empty() {
                println!();
                write_csv(&liability_rows, io::stdout())?;
            }
            return Ok(());
        }

        if asset_rows.is_empty() {
            println!("No assets added yet");
        } else {
            print_table(asset_rows);
        }

        if !liability_rows.is_empty() {
            println!();
            print_table(liability_rows);
        }
        Ok(())
    }
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

/// Row for the assets table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AssetRow {
    #[tabled(rename = "#")]
    row_num: usize,
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Type")]
    asset_type: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "In Trust")]
    held_in_trust: &'static str,
    #[tabled(rename = "Spouse")]
    spouse_share: String,
    #[tabled(rename = "Spousal Value")]
    spousal_value: String,
    #[tabled(rename = "Charity")]
    charity_share: String,
    #[tabled(rename = "Charitable Value")]
    charitable_value: String,
    #[tabled(rename = "RNRB")]
    rnrb: &'static str,
    #[tabled(rename = "Allocated")]
    allocated: &'static str,
}

impl AssetRow {
    fn new(row_num: usize, asset: &Asset) -> Self {
        AssetRow {
            row_num,
            alias: asset.alias.clone(),
            asset_type: asset_type_label(asset.asset_type),
            value: format_gbp(asset.value),
            held_in_trust: yes_no(asset.held_in_trust),
            spouse_share: format_percentage(asset.spouse_allocated_share),
            spousal_value: format_gbp(asset.spousal_value()),
            charity_share: format_percentage(asset.charity_allocated_share),
            charitable_value: format_gbp(asset.charitable_value()),
            rnrb: yes_no(asset.residence_nil_rate_band_applicable),
            allocated: yes_no(!asset.is_unallocated()),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct LiabilityRow {
    #[tabled(rename = "#")]
    row_num: usize,
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Type")]
    liability_type: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl LiabilityRow {
    fn new(row_num: usize, liability: &Liability) -> Self {
        LiabilityRow {
            row_num,
            alias: liability.alias.clone(),
            liability_type: liability_type_label(liability.liability_type),
            value: format_gbp(liability.value),
        }
    }
}

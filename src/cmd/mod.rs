pub mod assets;
pub mod display;
pub mod report;
pub mod schema;
pub mod validate;

use crate::core::{self, EstateInput, Rules, MAX_AMOUNT};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where the estate comes from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// JSON estate file (use "-" for stdin)
    #[arg(
        short,
        long,
        required_unless_present = "assets",
        conflicts_with_all = ["assets", "liabilities"]
    )]
    input: Option<PathBuf>,

    /// CSV file of assets
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// CSV file of liabilities (with --assets)
    #[arg(short, long, requires = "assets")]
    liabilities: Option<PathBuf>,

    /// Total value of gifts made in the last 7 years
    #[arg(long, value_parser = parse_amount)]
    gifts: Option<Decimal>,

    /// Mark the estate as claiming agricultural relief
    #[arg(long)]
    agricultural: bool,

    /// Mark the estate as claiming business relief
    #[arg(long)]
    business: bool,
}

impl InputArgs {
    /// Read the estate, with command line flags layered over the file
    pub fn read_estate(&self) -> anyhow::Result<EstateInput> {
        let mut estate = match (&self.input, &self.assets) {
            (Some(path), _) => read_json_input(path)?,
            (None, Some(assets)) => {
                let assets = core::read_assets_csv(open(assets)?)?;
                let liabilities = match &self.liabilities {
                    Some(path) => core::read_liabilities_csv(open(path)?)?,
                    None => Vec::new(),
                };
                EstateInput {
                    assets,
                    liabilities,
                    ..Default::default()
                }
            }
            (None, None) => anyhow::bail!("Provide --input or --assets"),
        };

        if let Some(gifts) = self.gifts {
            estate.total_gifts_made_in_last_7_years = gifts;
        }
        estate.exemption_type_agricultural |= self.agricultural;
        estate.exemption_type_business |= self.business;
        estate.check_bounds()?;

        log::info!(
            "Loaded estate with {} assets and {} liabilities",
            estate.assets.len(),
            estate.liabilities.len()
        );
        Ok(estate)
    }
}

/// Overrides for the statutory figures
#[derive(Args, Debug, Default)]
pub struct RulesArgs {
    /// Nil rate band before taper
    #[arg(long, value_parser = parse_amount)]
    nil_rate_band: Option<Decimal>,

    /// Residence nil rate band
    #[arg(long, value_parser = parse_amount)]
    residence_nil_rate_band: Option<Decimal>,

    /// Estate value above which the nil rate band tapers
    #[arg(long, value_parser = parse_amount)]
    taper_threshold: Option<Decimal>,
}

impl RulesArgs {
    pub fn rules(&self) -> Rules {
        let defaults = Rules::default();
        Rules {
            nil_rate_band: self.nil_rate_band.unwrap_or(defaults.nil_rate_band),
            residence_nil_rate_band: self
                .residence_nil_rate_band
                .unwrap_or(defaults.residence_nil_rate_band),
            taper_threshold: self.taper_threshold.unwrap_or(defaults.taper_threshold),
            ..defaults
        }
    }
}

/// A sum of money small enough to value without overflow
fn parse_amount(s: &str) -> Result<Decimal, String> {
    let amount: Decimal = s.trim().parse().map_err(|e| format!("{e}"))?;
    if amount.abs() > MAX_AMOUNT {
        return Err(format!("must be within ±{MAX_AMOUNT}"));
    }
    Ok(amount)
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn read_json_input(path: &Path) -> anyhow::Result<EstateInput> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }
    core::read_json(open(path)?).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_from_stdin() -> anyhow::Result<EstateInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    core::read_json(io::Cursor::new(buffer))
}

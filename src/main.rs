use clap::{Parser, Subcommand};
use log::LevelFilter;

mod cmd;
mod core;
mod utils;

#[derive(Parser, Debug)]
#[command(name = "ihtc", version, about = "Calculate UK Inheritance Tax (IHT) on an estate")]
struct Cli {
    /// Log the valuation working to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Value the estate and calculate inheritance tax
    Report(cmd::report::ReportCommand),
    /// List the estate's assets and liabilities
    Assets(cmd::assets::AssetsCommand),
    /// Check input for values the valuation accepts as given
    Validate(cmd::validate::ValidateCommand),
    /// Print the expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Report(report) => report.exec(),
        Command::Assets(assets) => assets.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}

/// RUST_LOG takes precedence over --verbose
fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

//! Schema command - print expected input formats

use crate::core::{AssetRecord, CsvField, EstateInput, LiabilityRecord};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the estate input document
    JsonSchema,
    /// CSV header rows for the assets and liabilities files
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(EstateInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", AssetRecord::csv_header().join(","));
        println!("{}", LiabilityRecord::csv_header().join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        print_fields("Assets CSV", AssetRecord::csv_schema());
        print_fields("Liabilities CSV", LiabilityRecord::csv_schema());
        println!("Flags accept true/false, yes/no or 1/0; blank means false.");
        Ok(())
    }
}

fn print_fields(title: &str, fields: &[CsvField]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("{:36} ({:8})  {}", field.name, req, field.description);
    }
    println!();
}

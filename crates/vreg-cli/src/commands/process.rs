//! Process command - extract registration fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use vreg_core::{validate, ExtractionPipeline};

use super::output::{format_result, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, or a .txt/.json transcript of recognized lines)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted fields
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let pipeline = ExtractionPipeline::from_config(&config.extraction);

    info!("Processing file: {}", args.input.display());

    let result = pipeline.process_file(&args.input, &config.ocr);

    if args.validate && result.success {
        let report = validate(&result.fields);
        for error in &report.errors {
            eprintln!("{} {}", style("✗").red(), error);
        }
        for warning in &report.warnings {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
        if report.is_clean() {
            eprintln!("{} All checks passed", style("✓").green());
        } else if !report.is_valid() {
            eprintln!("{}", style("Record is incomplete").red());
        }
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

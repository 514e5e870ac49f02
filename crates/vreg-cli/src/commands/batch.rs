//! Batch processing command for multiple registration documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use vreg_core::{ExtractionPipeline, ExtractionResult, FieldName};

use super::output::{format_result, OutputFormat};

const INPUT_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp", "txt", "json",
];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: one record per line on stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Exit successfully even when some files fail
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileOutcome {
    path: PathBuf,
    result: ExtractionResult,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = Arc::new(super::load_config(config_path)?);
    let pipeline = Arc::new(ExtractionPipeline::from_config(&config.extraction));

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| has_input_extension(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let config = Arc::clone(&config);
        let pipeline = Arc::clone(&pipeline);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = pipeline.process_file(&path, &config.ocr);
            let outcome = FileOutcome {
                path,
                result,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            };
            (index, outcome)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined?;
        if !outcome.result.success {
            warn!(
                "Failed to process {}: {}",
                outcome.path.display(),
                outcome.result.error.as_deref().unwrap_or("unknown error")
            );
        }
        outcomes.push((index, outcome));
        pb.inc(1);
    }
    pb.finish_and_clear();

    outcomes.sort_by_key(|(index, _)| *index);
    let outcomes: Vec<FileOutcome> = outcomes.into_iter().map(|(_, o)| o).collect();

    for outcome in &outcomes {
        let content = format_result(&outcome.result, args.format)?;
        match &args.output_dir {
            Some(output_dir) => {
                let output_path = output_path_for(output_dir, &outcome.path, args.format);
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!("{}", content),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.result.success).collect();
    let successful = outcomes.len() - failed.len();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for outcome in &failed {
            eprintln!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.result.error.as_deref().unwrap_or("unknown error")
            );
        }

        if !args.continue_on_error {
            error!("{} of {} files failed", failed.len(), outcomes.len());
            anyhow::bail!("Processing failed for {} files", failed.len());
        }
    }

    Ok(())
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// `<stem>.<ext>` in the output directory. A transcript whose extension
/// matches the output format keeps its stem but gains a `.vreg` infix so it
/// is never overwritten in place.
fn output_path_for(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let candidate = output_dir.join(format!("{}.{}", stem, format.extension()));

    if candidate == input {
        output_dir.join(format!("{}.vreg.{}", stem, format.extension()))
    } else {
        candidate
    }
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(FieldName::ALL.iter().map(|f| f.as_str()));
    header.extend(["line_count", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if outcome.result.success { "success" } else { "error" };

        let mut row = vec![filename.to_string(), status.to_string()];
        row.extend(FieldName::ALL.iter().map(|f| {
            outcome
                .result
                .get(*f)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        row.push(outcome.result.line_count.to_string());
        row.push(outcome.processing_time_ms.to_string());
        row.push(outcome.result.error.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_extensions() {
        assert!(has_input_extension(Path::new("scan.PNG")));
        assert!(has_input_extension(Path::new("lines.txt")));
        assert!(!has_input_extension(Path::new("scan.pdf")));
        assert!(!has_input_extension(Path::new("README")));
    }

    #[test]
    fn test_output_path_never_overwrites_input() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            output_path_for(dir, Path::new("/data/a.png"), OutputFormat::Json),
            PathBuf::from("/tmp/out/a.json")
        );
        assert_eq!(
            output_path_for(dir, Path::new("/tmp/out/a.json"), OutputFormat::Json),
            PathBuf::from("/tmp/out/a.vreg.json")
        );
    }
}

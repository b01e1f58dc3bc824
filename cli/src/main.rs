//! doctables CLI - DOCX/PDF table extraction tool

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use doctables::pipeline::{self, BatchEvent, Pipeline, PipelineOptions, DEFAULT_PATTERN};
use doctables::{
    CommandConverter, ExtractOptions, ExtractionResult, JsonFormat, TableExtractor,
};

#[derive(Parser)]
#[command(name = "doctables")]
#[command(version)]
#[command(about = "Extract DOCX/PDF tables with superscript/subscript flags into XLSX", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables from one DOCX or PDF file
    Extract {
        /// Input DOCX or PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output workbook (default: <stem>_tables.xlsx beside the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Extract tables from every matching file in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// File name glob (`*` and `?` wildcards)
        #[arg(short, long, default_value = DEFAULT_PATTERN)]
        pattern: String,

        /// Number of files processed in parallel
        #[arg(short, long, env = "DOCTABLES_JOBS", default_value_t = 1)]
        jobs: usize,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show sections and tables found in a DOCX file
    Inspect {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the extraction result as JSON
        #[arg(long)]
        json: bool,

        /// Keep cell text exactly as read
        #[arg(long)]
        raw: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct CommonArgs {
    /// Keep the DOCX produced from PDF input
    #[arg(long)]
    keep_intermediate: bool,

    /// Keep cell text exactly as read
    #[arg(long)]
    raw: bool,

    /// Also write a JSON sidecar next to each workbook
    #[arg(long)]
    json: bool,

    /// Font-size ratio below which a digit run counts as superscript
    #[arg(long, value_name = "RATIO", default_value_t = doctables::extract::DEFAULT_SMALL_FONT_RATIO)]
    small_font_ratio: f32,

    /// PDF converter command; `{input}` and `{output}` are substituted
    #[arg(
        long,
        env = "DOCTABLES_CONVERTER",
        default_value = "pdf2docx convert {input} {output}"
    )]
    converter: String,
}

impl CommonArgs {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .with_clean_data(!self.raw)
            .with_small_font_ratio(self.small_font_ratio)
    }

    fn pipeline(&self, jobs: usize) -> Result<Pipeline, Box<dyn std::error::Error>> {
        let converter = CommandConverter::from_command_line(&self.converter)?;
        let options = PipelineOptions::new()
            .keep_intermediate(self.keep_intermediate)
            .with_jobs(jobs)
            .with_json(self.json)
            .with_extract_options(self.extract_options());

        Ok(Pipeline::new()
            .with_converter(Arc::new(converter))
            .with_options(options))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            common,
        } => cmd_extract(&input, output.as_deref(), &common),
        Commands::Batch {
            input,
            output,
            pattern,
            jobs,
            common,
        } => cmd_batch(&input, &output, &pattern, jobs, &common),
        Commands::Inspect { input, json, raw } => cmd_inspect(&input, json, raw),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(pipeline::output_file_name(input))
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Extracting {}", input.display()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = common.pipeline(1)?.process_file(input, &output);
    spinner.finish_and_clear();
    let report = report?;

    println!("{} {}", "Saved to".green(), report.output.display());
    println!(
        "  {} {} sections, {} tables, {} sheets",
        "├─".dimmed(),
        report.sections,
        report.tables,
        report.sheets
    );
    if report.converted {
        println!("  {} converted from PDF", "├─".dimmed());
    }
    if let Some(json) = &report.json {
        println!("  {} {}", "├─".dimmed(), json.display());
    }
    println!("  {} done", "└─".dimmed());

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    pattern: &str,
    jobs: usize,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = common.pipeline(jobs)?;
    let (tx, rx) = crossbeam_channel::unbounded();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = thread::scope(|scope| {
        let worker = scope.spawn(move || {
            pipeline.batch_process_with_progress(input, output, pattern, Some(&tx))
        });

        for event in rx.iter() {
            match event {
                BatchEvent::Queued { total } => pb.set_length(total as u64),
                BatchEvent::Started { path, .. } => {
                    pb.set_message(display_name(&path));
                }
                BatchEvent::Finished { report, .. } => {
                    pb.println(format!(
                        "{} {} ({} tables)",
                        "✓".green(),
                        display_name(&report.input),
                        report.tables
                    ));
                    pb.inc(1);
                }
                BatchEvent::Failed { path, error, .. } => {
                    pb.println(format!(
                        "{} {}: {}",
                        "✗".red(),
                        display_name(&path),
                        error
                    ));
                    pb.inc(1);
                }
            }
        }

        worker
            .join()
            .map_err(|_| "batch worker panicked".to_string())
    })??;
    pb.finish_and_clear();

    println!(
        "\n{} {} succeeded, {} failed",
        "Done!".green().bold(),
        summary.succeeded,
        summary.failed
    );
    for failure in &summary.failures {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.path.display(),
            failure.error.dimmed()
        );
    }

    if summary.is_success() {
        Ok(())
    } else {
        Err(format!("{} of {} files failed", summary.failed, summary.total()).into())
    }
}

fn cmd_inspect(input: &Path, json: bool, raw: bool) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions::new().with_clean_data(!raw);
    let result = TableExtractor::with_options(options).extract(input)?;

    if json {
        println!("{}", doctables::to_json(&result, JsonFormat::Pretty)?);
        return Ok(());
    }

    print_summary(input, &result);
    Ok(())
}

fn print_summary(input: &Path, result: &ExtractionResult) {
    println!("{}", "Document Tables".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Sections".bold(), result.section_count());
    println!("{}: {}", "Tables".bold(), result.table_count());
    println!();

    for (label, tables) in result.iter() {
        println!("{} ({})", label.bold(), tables.len());
        for (i, grid) in tables.iter().enumerate() {
            let branch = if i + 1 == tables.len() { "└─" } else { "├─" };
            println!(
                "  {} #{}: {} rows × {} cols, {} sup, {} sub",
                branch.dimmed(),
                i,
                grid.row_count(),
                grid.max_columns(),
                grid.superscript_count(),
                grid.subscript_count()
            );
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_version() {
    println!("{} {}", "doctables".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX/PDF table extraction tool");
    println!();
    println!("License: MIT");
}

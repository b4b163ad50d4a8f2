//! cellspan CLI - column and row spans for pipe tables

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use cellspan::{
    diagnostics::{check_markdown, check_table, format_diagnostics, CheckResult, Diagnostic},
    render_html, span_markdown, span_table_with_options, table_from_json, table_to_json,
    PipeTable, SpanOptions, SpanWarning,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing::{error, info};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cellspan")]
#[command(version)]
#[command(about = "Column and row spans for pipe tables", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Pipe)]
    input_format: InputFormat,

    /// Cell text treated as empty in addition to blank cells
    #[arg(long, default_value = cellspan::DEFAULT_EMPTY_TOKEN)]
    empty_token: String,

    /// Strict mode: fail on rows that do not add up to the table width
    #[arg(long)]
    strict: bool,

    /// Check mode - report span issues without writing output
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Show version and span syntax
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// HTML tables
    Html,
    /// Spanned cells as JSON
    Json,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Markdown document with pipe tables
    Pipe,
    /// JSON array of rows, each an array of cells
    Json,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!(error = %err, "command failed");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Returns `Ok(false)` when the run should exit with a failure status
#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<bool> {
    if let Some(Commands::Info) = cli.command {
        print_info();
        return Ok(true);
    }

    let input = match cli.input_file {
        Some(ref path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let options = if cli.strict {
        SpanOptions::strict()
    } else {
        SpanOptions::new()
    }
    .with_empty_token(&cli.empty_token)?;
    let use_color = !cli.no_color;

    if cli.check {
        let result = match cli.input_format {
            InputFormat::Pipe => check_markdown(&input, &options),
            InputFormat::Json => check_table(&table_from_json(&input)?, &options),
        };
        println!("{}", format_diagnostics(&result, use_color));
        return Ok(!result.has_errors());
    }

    let (output, warnings) = match cli.input_format {
        InputFormat::Pipe => {
            let spanned = span_markdown(&input, &options)?;
            let mut warnings = CheckResult::new();
            for (index, table) in spanned.iter().enumerate() {
                collect_warnings(&mut warnings, &table.report.warnings, Some(index + 1));
            }
            let output = match cli.format {
                OutputFormat::Html => spanned
                    .iter()
                    .map(|t| render_html(&t.table))
                    .collect::<Vec<_>>()
                    .join("\n"),
                OutputFormat::Json => {
                    let tables: Vec<&PipeTable> = spanned.iter().map(|t| &t.table).collect();
                    serde_json::to_string_pretty(&tables)?
                }
            };
            (output, warnings)
        }
        InputFormat::Json => {
            let mut table = table_from_json(&input)?;
            let report = span_table_with_options(&mut table, &options)?;
            let mut warnings = CheckResult::new();
            collect_warnings(&mut warnings, &report.warnings, None);
            let output = match cli.format {
                OutputFormat::Html => render_html(&PipeTable {
                    header: Default::default(),
                    alignments: Vec::new(),
                    body: table,
                }),
                OutputFormat::Json => table_to_json(&table),
            };
            (output, warnings)
        }
    };

    if !cli.quiet && !warnings.is_empty() {
        eprintln!("{}", format_diagnostics(&warnings, use_color));
    }

    match cli.output {
        Some(path) => {
            let mut file =
                fs::File::create(&path).with_context(|| format!("failed to create {}", path))?;
            writeln!(file, "{}", output.trim_end())?;
            info!(path = %path, warnings = warnings.diagnostics.len(), "output written");
        }
        None => {
            println!("{}", output.trim_end());
        }
    }

    Ok(true)
}

#[cfg(feature = "cli")]
fn collect_warnings(result: &mut CheckResult, warnings: &[SpanWarning], table: Option<usize>) {
    for warning in warnings {
        let diag = Diagnostic::from(warning);
        result.add(match table {
            Some(number) => diag.in_table(number),
            None => diag,
        });
    }
}

#[cfg(feature = "cli")]
fn print_info() {
    println!("cellspan - column and row spans for pipe tables");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Column spans:");
    println!("  | wide     || next |   empty cell folds into its left neighbour");
    println!("  | wide |~~|  next |   same, written with the empty token");
    println!();
    println!("Row spans:");
    println!("  |_   _|   closes the empty cells above into the first content cell");
    println!("  |_^  _|   ... aligned to the top");
    println!("  |_=  _|   ... aligned to the bottom");
    println!();
    println!("Set RUST_LOG=debug to trace every merge.");
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install cellspan --features cli");
    eprintln!("  cellspan [OPTIONS] [INPUT_FILE]");
}

//! pyscope CLI binary entry point.
//!
//! ## Usage
//!
//! ```bash
//! # Reference graph (the default report)
//! pyscope module.py --names public_names.txt
//!
//! # Inheritance hierarchy only
//! pyscope module.py --hierarchy
//!
//! # Both reports, as a JSON envelope
//! pyscope module.py --hierarchy --references --format json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use pyscope::analyzer::analyze_file;
use pyscope::error::{OutputErrorCode, PyscopeError};
use pyscope::output::{emit_response, render_report, AnalyzeResponse, ErrorResponse, ReportToggles};
use pyscope::registry::NameRegistry;

// ============================================================================
// CLI Structure
// ============================================================================

/// Top-level scope and reference mapping for Python source files.
///
/// Reports the class inheritance hierarchy and/or the graph of which known
/// names each top-level scope references, in yUML edge notation or JSON.
#[derive(Parser, Debug)]
#[command(name = "pyscope", version, about)]
struct Cli {
    /// Source file to analyze.
    file: PathBuf,

    /// Names file seeding the known-name registry: one name per line,
    /// blank lines and `#` comments skipped.
    #[arg(long)]
    names: Option<PathBuf>,

    /// Add a single name to the registry (repeatable).
    #[arg(long = "name", value_name = "NAME")]
    name: Vec<String>,

    /// Report the class inheritance hierarchy.
    #[arg(long)]
    hierarchy: bool,

    /// Report the reference graph (the default when no report is selected).
    #[arg(long)]
    references: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// yUML-style edge notation, one edge per line.
    Text,
    /// Versioned JSON response envelope.
    Json,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let format = cli.format;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = OutputErrorCode::from(&err);
            match format {
                OutputFormat::Text => eprintln!("pyscope: {}", err),
                OutputFormat::Json => {
                    let response = ErrorResponse::from_error(&err);
                    let _ = emit_response(&response, &mut io::stdout());
                    let _ = io::stdout().flush();
                }
            }
            ExitCode::from(code.code())
        }
    }
}

/// Initialize tracing subscriber writing to stderr, so stdout stays a clean
/// report stream.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the analysis and print the selected reports.
fn execute(cli: Cli) -> Result<(), PyscopeError> {
    let mut registry = match &cli.names {
        Some(path) => NameRegistry::load(path)?,
        None => NameRegistry::new(),
    };
    for name in &cli.name {
        registry.insert(name.clone());
    }

    let toggles = ReportToggles {
        hierarchy: cli.hierarchy,
        // The reference report is the default configuration.
        references: cli.references || !cli.hierarchy,
    };

    let analysis = analyze_file(&cli.file, registry)?;

    match cli.format {
        OutputFormat::Text => {
            print!("{}", render_report(&analysis, toggles));
        }
        OutputFormat::Json => {
            let response =
                AnalyzeResponse::from_analysis(cli.file.display().to_string(), &analysis, toggles);
            emit_response(&response, &mut io::stdout())
                .map_err(|e| PyscopeError::internal(format!("failed to write response: {}", e)))?;
        }
    }
    Ok(())
}

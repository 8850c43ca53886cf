//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use vsdx_ooxml::{ExtractOptions, ExtractionResult, VsdxExtractor};

/// Output format for extraction reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON summary for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "vsdx")]
#[command(author, version, about = "Extract pages, masters and properties from Visio files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the XML parts of a VSDX file and report what was found
    Extract {
        /// Input VSDX file
        input: PathBuf,

        /// Output directory (defaults to <input>_extracted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run the part extractors concurrently
        #[arg(long)]
        parallel: bool,

        /// Report format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Extract a VSDX file and print an analysis prompt for it
    Prompt {
        /// Input VSDX file
        input: PathBuf,

        /// Output directory (defaults to <input>_extracted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            config,
            parallel,
            format,
        } => {
            let options = load_options(config.as_deref(), output.as_deref(), parallel)?;
            extract_command(&input, options, format)?;
        }
        Commands::Prompt {
            input,
            output,
            config,
        } => {
            let options = load_options(config.as_deref(), output.as_deref(), false)?;
            prompt_command(&input, options)?;
        }
    }

    Ok(())
}

/// Install the log subscriber (stderr, `RUST_LOG` or `info`)
///
/// Library records emitted through `log` are forwarded to the subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build extraction options from an optional config file and CLI overrides
pub fn load_options(
    config: Option<&Path>,
    output: Option<&Path>,
    parallel: bool,
) -> Result<ExtractOptions> {
    let mut options = match config {
        Some(path) => ExtractOptions::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => ExtractOptions::default(),
    };

    if let Some(output) = output {
        options.output_dir = Some(output.to_path_buf());
    }
    if parallel {
        options.parallel = true;
    }

    tracing::debug!("Extraction options: {:?}", options);
    Ok(options)
}

/// Execute the extract command
pub fn extract_command(
    input: &Path,
    options: ExtractOptions,
    format: OutputFormat,
) -> Result<ExtractionResult> {
    let result = run_extraction(input, options)?;
    let summary = result.summary();

    match format {
        OutputFormat::Text => {
            println!("vsdx v{}", vsdx_ooxml::VERSION);
            println!("Extraction successful!");
            if let Some(dir) = &result.output_dir {
                println!("Output directory: {}", dir.display());
            }
            println!("Pages extracted: {}", summary.total_pages);
            println!("Masters extracted: {}", summary.total_masters);
            println!();

            for page in summary.pages {
                println!(
                    "  {:<24} {:>6} elements  ({})",
                    page.name, page.element_count, page.filename
                );
            }

            println!();
            println!("Summary:");
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(result)
}

/// Execute the prompt command
pub fn prompt_command(input: &Path, options: ExtractOptions) -> Result<()> {
    let result = run_extraction(input, options)?;
    print!("{}", result.summary().analysis_prompt());
    Ok(())
}

fn run_extraction(input: &Path, options: ExtractOptions) -> Result<ExtractionResult> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let result = VsdxExtractor::with_options(options).extract(input);
    if !result.success {
        anyhow::bail!(
            "Extraction failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(result)
}

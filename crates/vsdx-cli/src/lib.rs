//! vsdx CLI - Command-line interface library
//!
//! This library provides the CLI functionality for vsdx:
//! - Extract: Unpack a VSDX file into rewritten XML parts and report on it
//! - Prompt: Print the analysis prompt for a VSDX file
//!
//! # Library Usage
//!
//! ```ignore
//! use vsdx_cli::{extract_command, load_options, OutputFormat};
//!
//! let options = load_options(None, Some(Path::new("out")), true)?;
//! let result = extract_command(Path::new("diagram.vsdx"), options, OutputFormat::Json)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Extract into diagram.vsdx_extracted/
//! vsdx extract diagram.vsdx
//!
//! # Extract with a config file and JSON output
//! vsdx extract diagram.vsdx --config vsdx.toml --format json
//!
//! # Verbose logging
//! RUST_LOG=debug vsdx extract diagram.vsdx --output out/
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{extract_command, init_logging, load_options, prompt_command, run_cli, OutputFormat};

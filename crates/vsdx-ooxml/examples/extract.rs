//! Example: Extract pages and properties from a VSDX file
//!
//! Usage: cargo run --example extract -- path/to/diagram.vsdx [output_dir]

use std::env;
use std::path::Path;
use vsdx_ooxml::{Container, VsdxExtractor};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path/to/diagram.vsdx> [output_dir]", args[0]);
        eprintln!();
        eprintln!("Extracts the XML parts of a VSDX file and prints:");
        eprintln!("  - Package contents");
        eprintln!("  - Per-page element counts");
        eprintln!("  - Extraction summary (JSON)");
        std::process::exit(1);
    }

    let vsdx_path = Path::new(&args[1]);

    if !vsdx_path.exists() {
        eprintln!("Error: File not found: {}", vsdx_path.display());
        std::process::exit(1);
    }

    println!("=== Extracting from: {} ===\n", vsdx_path.display());

    let container = match Container::open(vsdx_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening VSDX: {}", e);
            std::process::exit(1);
        }
    };

    println!("--- Package Contents ---");
    for name in container.entries() {
        println!("  {}", name);
    }
    println!();

    let mut extractor = VsdxExtractor::new();
    if let Some(out) = args.get(2) {
        extractor = extractor.with_output_dir(out);
    }

    let result = extractor.extract(vsdx_path);
    if !result.success {
        eprintln!(
            "Error extracting diagram: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    println!("--- Pages ---");
    for page in &result.pages {
        println!("  {} ({}): {} elements", page.name, page.filename, page.element_count);
    }
    println!();

    println!("--- Summary ---");
    match serde_json::to_string_pretty(&result.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing summary: {}", e),
    }

    println!("--- Extraction Complete ---");
}

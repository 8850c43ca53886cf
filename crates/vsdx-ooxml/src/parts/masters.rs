//! Master shape parts (visio/masters/*.xml)
//!
//! Masters are passed through: parsed, rewritten under `masters/`, and
//! otherwise not interpreted.

use std::fs;
use std::path::Path;

use crate::archive::ScratchDir;
use crate::error::Result;

/// Output folder for rewritten masters, relative to the output root
pub const OUTPUT_DIR: &str = "masters";

/// Rewrite every master part under `masters_dir`
///
/// Returns the file names of the masters written, in archive listing order.
pub fn extract(scratch: &ScratchDir, masters_dir: &str, output_dir: &Path) -> Vec<String> {
    let entries: Vec<&str> = scratch.xml_entries_in(masters_dir).collect();
    if entries.is_empty() {
        log::debug!("No master parts under {}", masters_dir);
        return Vec::new();
    }

    let masters_out = output_dir.join(OUTPUT_DIR);
    if let Err(e) = fs::create_dir_all(&masters_out) {
        log::error!("Cannot create {}: {}", masters_out.display(), e);
        return Vec::new();
    }

    let mut written = Vec::with_capacity(entries.len());
    for entry in entries {
        match pass_through(scratch, entry, &masters_out) {
            Ok(filename) => {
                log::info!("Processed master: {}", filename);
                written.push(filename);
            }
            Err(e) => log::error!("Error processing master {}: {}", entry, e),
        }
    }
    written
}

fn pass_through(scratch: &ScratchDir, entry: &str, masters_out: &Path) -> Result<String> {
    let tree = super::load(scratch, entry)?;
    let filename = super::file_name(entry);
    tree.save(&masters_out.join(filename))?;
    Ok(filename.to_string())
}

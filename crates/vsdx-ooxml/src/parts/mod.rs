//! Part extractors
//!
//! Each extractor reads its own parts from the unpacked package, writes the
//! rewritten XML under its own slice of the output tree and returns a model
//! fragment. Failures stay inside the extractor: they are logged and the
//! affected part is left out, so one bad part never stops the others.

pub mod app;
pub mod document;
pub mod masters;
pub mod pages;

use crate::archive::ScratchDir;
use crate::error::Result;
use crate::xml::PartTree;

/// Read and parse one unpacked part
fn load(scratch: &ScratchDir, name: &str) -> Result<PartTree> {
    let bytes = scratch.read(name)?;
    PartTree::parse(&bytes).map_err(|e| e.in_part(name))
}

/// Last path segment of an archive entry name
fn file_name(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}

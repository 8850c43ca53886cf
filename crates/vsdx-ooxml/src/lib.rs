//! # vsdx-ooxml
//!
//! Extraction of Visio (.vsdx) packages.
//!
//! This crate provides functionality to:
//! - Open a VSDX package and list or stream its entries
//! - Parse namespaced XML parts into trees and write them back out
//! - Extract application properties, document info, pages and masters
//! - Summarize an extraction for reporting
//!
//! ## Example: Extracting a Package
//!
//! ```no_run
//! use vsdx_ooxml::VsdxExtractor;
//!
//! let result = VsdxExtractor::new().extract("diagram.vsdx");
//! if result.success {
//!     let summary = result.summary();
//!     println!("{} pages, {} elements", summary.total_pages, summary.total_elements);
//! } else {
//!     eprintln!("Extraction failed: {}", result.error.unwrap_or_default());
//! }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod parts;
pub mod summary;
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use archive::{Container, ScratchDir};
pub use config::{ExtractOptions, PartLayout};
pub use error::{Result, VsdxError};
pub use extractor::VsdxExtractor;
pub use model::{DocumentInfo, DocumentProperties, ExtractedData, ExtractionResult, PageSummary};
pub use summary::ExtractionSummary;
pub use xml::{Element, PartTree, MAX_DEPTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Extraction output model
//!
//! These types are plain owned data. Once an [`ExtractionResult`] is returned
//! it holds no reference to the archive or the scratch directory.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::VsdxError;

/// Application properties, keyed by local element name
///
/// Kept sorted by name so serialized output is stable across producers that
/// order `app.xml` differently.
pub type DocumentProperties = BTreeMap<String, String>;

/// Root element of the main document part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Qualified tag of the root element
    pub root_tag: String,
    /// Root attributes, namespace declarations excluded
    pub attributes: BTreeMap<String, String>,
}

/// One extracted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// File name of the page part inside the pages folder
    pub filename: String,
    /// Where the rewritten page was written
    pub output_path: PathBuf,
    /// Number of elements below the page root
    #[serde(rename = "elements_count")]
    pub element_count: usize,
    /// Qualified tag of the page root
    pub root_tag: String,
    /// Page name from the page sheet, or the file stem
    pub name: String,
}

/// Document-level metadata gathered from the package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_properties: Option<DocumentProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_info: Option<DocumentInfo>,
}

impl ExtractedData {
    pub fn has_app_properties(&self) -> bool {
        self.app_properties.is_some()
    }

    pub fn has_document_info(&self) -> bool {
        self.document_info.is_some()
    }
}

/// Outcome of one extraction call
///
/// When `success` is false only `error` is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Pages in archive listing order; unreadable pages are left out
    #[serde(default)]
    pub pages: Vec<PageSummary>,
    /// File names of the masters that were passed through
    #[serde(default)]
    pub masters: Vec<String>,
    #[serde(default)]
    pub extracted_data: ExtractedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub(crate) fn failure(error: &VsdxError) -> Self {
        Self {
            success: false,
            output_dir: None,
            pages: Vec::new(),
            masters: Vec::new(),
            extracted_data: ExtractedData::default(),
            error: Some(error.to_string()),
        }
    }

    /// Look up a page by its resolved name
    pub fn page(&self, name: &str) -> Option<&PageSummary> {
        self.pages.iter().find(|page| page.name == name)
    }
}

//! Extraction options
//!
//! Options can be built in code or read from a TOML file:
//!
//! ```toml
//! parallel = true
//! output_dir = "out"
//! scratch_dir = "/var/tmp"
//!
//! [parts]
//! document = "visio/document.xml"
//! pages_dir = "visio/pages"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level extraction options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Run the part extractors concurrently
    pub parallel: bool,
    /// Output root; defaults to `<input>_extracted`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Parent of the scratch directory; defaults to the system temp dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
    /// Where the parts live inside the package
    pub parts: PartLayout,
}

impl ExtractOptions {
    /// Parse options from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load options from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Output root for a given input package
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut dir = input.as_os_str().to_owned();
                dir.push("_extracted");
                PathBuf::from(dir)
            }
        }
    }
}

/// Archive-relative locations of the parts the extractors read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartLayout {
    /// Application properties part
    pub app_properties: String,
    /// Main document part
    pub document: String,
    /// Folder holding one part per page
    pub pages_dir: String,
    /// Folder holding master shape parts
    pub masters_dir: String,
}

impl Default for PartLayout {
    fn default() -> Self {
        Self {
            app_properties: "docProps/app.xml".to_string(),
            document: "visio/document.xml".to_string(),
            pages_dir: "visio/pages".to_string(),
            masters_dir: "visio/masters".to_string(),
        }
    }
}

//! Error types for VSDX extraction

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting a VSDX package
///
/// `NotFound`, `CorruptArchive` and `Io` are container-level faults and end
/// the extraction. The remaining variants are raised per part and only ever
/// reach the caller through the log.
#[derive(Error, Debug)]
pub enum VsdxError {
    /// The package path does not exist
    #[error("VSDX file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The bytes are not a readable ZIP archive
    #[error("Corrupt archive: {0}")]
    CorruptArchive(#[from] zip::result::ZipError),

    /// A named entry is not present in the archive
    #[error("Entry not found in archive: {0}")]
    EntryMissing(String),

    /// A part could not be parsed as XML
    #[error("Malformed XML in {part}: {reason}")]
    MalformedXml {
        /// Part being parsed (archive-relative name, or `<bytes>`)
        part: String,
        /// What the parser rejected
        reason: String,
    },

    /// A rewritten part could not be written to the output tree
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error reading files or creating directories
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing an options file
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl VsdxError {
    /// Build a `MalformedXml` error for an anonymous byte buffer
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        VsdxError::MalformedXml {
            part: "<bytes>".to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the part name to a `MalformedXml` error
    pub(crate) fn in_part(self, name: &str) -> Self {
        match self {
            VsdxError::MalformedXml { reason, .. } => VsdxError::MalformedXml {
                part: name.to_string(),
                reason,
            },
            other => other,
        }
    }

    /// Whether this error ends the whole extraction
    pub fn is_container_fault(&self) -> bool {
        matches!(
            self,
            VsdxError::NotFound(_) | VsdxError::CorruptArchive(_) | VsdxError::Io(_)
        )
    }
}

/// Result type for VSDX operations
pub type Result<T> = std::result::Result<T, VsdxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_part_renames_malformed() {
        let err = VsdxError::malformed("unexpected end").in_part("visio/pages/page1.xml");
        assert_eq!(
            err.to_string(),
            "Malformed XML in visio/pages/page1.xml: unexpected end"
        );
    }

    #[test]
    fn test_container_faults() {
        assert!(VsdxError::NotFound(PathBuf::from("a.vsdx")).is_container_fault());
        assert!(!VsdxError::EntryMissing("docProps/app.xml".into()).is_container_fault());
        assert!(!VsdxError::malformed("x").is_container_fault());
    }
}

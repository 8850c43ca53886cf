//! VSDX extraction (package → output tree + model)
//!
//! [`VsdxExtractor`] drives one extraction per call: open the package,
//! unpack it to a scratch directory, run the part extractors and assemble an
//! [`ExtractionResult`]. Only container-level faults fail the call; part
//! faults are logged and the part is left out of the result.
//!
//! # Example
//!
//! ```no_run
//! use vsdx_ooxml::VsdxExtractor;
//!
//! let result = VsdxExtractor::new().extract_to("flow.vsdx", "flow_out");
//! if result.success {
//!     for page in &result.pages {
//!         println!("{}: {} elements", page.name, page.element_count);
//!     }
//! }
//! ```

use std::fs;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::archive::{Container, ScratchDir};
use crate::config::ExtractOptions;
use crate::error::Result;
use crate::model::{DocumentInfo, DocumentProperties, ExtractedData, ExtractionResult, PageSummary};
use crate::parts::{app, document, masters, pages};

/// Extracts VSDX packages according to a set of options
///
/// The extractor only holds configuration; every call builds a fresh
/// result, so one instance can be reused and shared across threads.
#[derive(Debug, Clone, Default)]
pub struct VsdxExtractor {
    options: ExtractOptions,
}

/// Outputs of the four part extractors
struct Fragments {
    app_properties: Option<DocumentProperties>,
    document_info: Option<DocumentInfo>,
    pages: Vec<PageSummary>,
    masters: Vec<String>,
}

impl VsdxExtractor {
    /// Create an extractor with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from explicit options
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Run the part extractors concurrently
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    /// Set the default output root
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.options.output_dir = Some(output_dir.into());
        self
    }

    /// Unpack packages under `parent` instead of the system temp dir
    pub fn with_scratch_dir(mut self, parent: impl Into<PathBuf>) -> Self {
        self.options.scratch_dir = Some(parent.into());
        self
    }

    /// Current options
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract a package into the configured output root
    ///
    /// Without an explicit output root, `<input>_extracted` is used.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> ExtractionResult {
        let path = path.as_ref();
        let output_dir = self.options.output_dir_for(path);
        self.extract_to(path, output_dir)
    }

    /// Extract a package into `output_dir`
    pub fn extract_to<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path: P,
        output_dir: Q,
    ) -> ExtractionResult {
        let path = path.as_ref();
        log::info!("Extracting {}", path.display());
        self.finish(Container::<File>::open(path), output_dir.as_ref())
    }

    /// Extract a package held in any `Read + Seek` source
    pub fn extract_reader<R: Read + Seek, Q: AsRef<Path>>(
        &self,
        reader: R,
        output_dir: Q,
    ) -> ExtractionResult {
        self.finish(Container::from_reader(reader), output_dir.as_ref())
    }

    fn finish<R: Read + Seek>(
        &self,
        container: Result<Container<R>>,
        output_dir: &Path,
    ) -> ExtractionResult {
        match self.try_extract(container, output_dir) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Error extracting VSDX: {}", e);
                ExtractionResult::failure(&e)
            }
        }
    }

    fn try_extract<R: Read + Seek>(
        &self,
        container: Result<Container<R>>,
        output_dir: &Path,
    ) -> Result<ExtractionResult> {
        let mut container = container?;
        fs::create_dir_all(output_dir)?;

        // Removed when dropped at the end of this scope, on every path
        let scratch = match &self.options.scratch_dir {
            Some(parent) => container.materialize_in(parent)?,
            None => container.materialize()?,
        };
        let fragments = self.run_extractors(&scratch, output_dir);

        log::info!(
            "Extracted {} pages and {} masters to {}",
            fragments.pages.len(),
            fragments.masters.len(),
            output_dir.display()
        );

        Ok(ExtractionResult {
            success: true,
            output_dir: Some(output_dir.to_path_buf()),
            pages: fragments.pages,
            masters: fragments.masters,
            extracted_data: ExtractedData {
                app_properties: fragments.app_properties,
                document_info: fragments.document_info,
            },
            error: None,
        })
    }

    fn run_extractors(&self, scratch: &ScratchDir, output_dir: &Path) -> Fragments {
        let parts = &self.options.parts;
        let app = || app::extract(scratch, &parts.app_properties, output_dir);
        let document = || document::extract(scratch, &parts.document, output_dir);
        let pages = || pages::extract(scratch, &parts.pages_dir, output_dir);
        let masters = || masters::extract(scratch, &parts.masters_dir, output_dir);

        if self.options.parallel {
            let ((app_properties, document_info), (pages, masters)) = rayon::join(
                || rayon::join(app, document),
                || rayon::join(pages, masters),
            );
            Fragments {
                app_properties,
                document_info,
                pages,
                masters,
            }
        } else {
            Fragments {
                app_properties: app(),
                document_info: document(),
                pages: pages(),
                masters: masters(),
            }
        }
    }
}

//! Main document part (visio/document.xml)

use std::path::Path;

use crate::archive::ScratchDir;
use crate::error::Result;
use crate::model::DocumentInfo;
use crate::xml::PartTree;

/// File name of the rewritten part in the output root
pub const OUTPUT_NAME: &str = "document.xml";

/// Extract the document root description, if the part exists and is readable
pub fn extract(scratch: &ScratchDir, part: &str, output_dir: &Path) -> Option<DocumentInfo> {
    if !scratch.contains(part) {
        log::debug!("No main document part at {}", part);
        return None;
    }

    match process(scratch, part, output_dir) {
        Ok(info) => {
            log::info!("Processed {}", part);
            Some(info)
        }
        Err(e) => {
            log::error!("Error processing {}: {}", part, e);
            None
        }
    }
}

fn process(scratch: &ScratchDir, part: &str, output_dir: &Path) -> Result<DocumentInfo> {
    let tree = super::load(scratch, part)?;
    tree.save(&output_dir.join(OUTPUT_NAME))?;
    Ok(document_info(&tree))
}

/// Root tag and attributes of the document part
pub fn document_info(tree: &PartTree) -> DocumentInfo {
    let root = tree.root();
    DocumentInfo {
        root_tag: root.tag(),
        attributes: root
            .attributes()
            .map(|attr| (attr.name.clark(), attr.value.clone()))
            .collect(),
    }
}

//! Application properties (docProps/app.xml)

use std::path::Path;

use crate::archive::ScratchDir;
use crate::error::Result;
use crate::model::DocumentProperties;
use crate::xml::PartTree;

/// File name of the rewritten part in the output root
pub const OUTPUT_NAME: &str = "app_properties.xml";

/// Extract application properties, if the part exists and is readable
pub fn extract(scratch: &ScratchDir, part: &str, output_dir: &Path) -> Option<DocumentProperties> {
    if !scratch.contains(part) {
        log::debug!("No application properties part at {}", part);
        return None;
    }

    match process(scratch, part, output_dir) {
        Ok(properties) => {
            log::info!("Processed {}", part);
            Some(properties)
        }
        Err(e) => {
            log::error!("Error processing {}: {}", part, e);
            None
        }
    }
}

fn process(scratch: &ScratchDir, part: &str, output_dir: &Path) -> Result<DocumentProperties> {
    let tree = super::load(scratch, part)?;
    tree.save(&output_dir.join(OUTPUT_NAME))?;
    Ok(properties(&tree))
}

/// Collect `local name -> text` for each direct child of the root
///
/// Children without leading text are skipped. Whitespace counts as text, so
/// a container such as `HeadingPairs` records the indentation before its
/// first child.
pub fn properties(tree: &PartTree) -> DocumentProperties {
    tree.root()
        .child_elements()
        .filter_map(|child| {
            let text = child.text().filter(|text| !text.is_empty())?;
            Some((child.local_name().to_string(), text.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::archive::Container;
    use crate::test_utils::{build_package, APP_XML};

    #[test]
    fn test_properties_strip_prefixes() {
        let tree = PartTree::parse(
            br#"<ep:Properties xmlns:ep="urn:ep" xmlns:vt="urn:vt">
    <ep:Application>Microsoft Visio</ep:Application>
    <ep:Template></ep:Template>
    <ep:HeadingPairs>
        <vt:vector size="2"><vt:variant><vt:lpstr>Pages</vt:lpstr></vt:variant></vt:vector>
    </ep:HeadingPairs>
    <ep:Company>Contoso</ep:Company>
</ep:Properties>"#,
        )
        .unwrap();

        let props = properties(&tree);
        assert_eq!(props.len(), 3);
        assert_eq!(props["Application"], "Microsoft Visio");
        assert_eq!(props["Company"], "Contoso");
        assert_eq!(props["HeadingPairs"], "\n        ");
        assert!(!props.contains_key("Template"));
    }

    #[test]
    fn test_whitespace_text_is_recorded() {
        let tree = PartTree::parse(
            b"<Properties><Company> </Company><HeadingPairs>\n  <vector/></HeadingPairs>\
              <Application>Visio</Application><Manager/></Properties>",
        )
        .unwrap();

        let props = properties(&tree);
        assert_eq!(props.len(), 3);
        assert_eq!(props["Company"], " ");
        assert_eq!(props["HeadingPairs"], "\n  ");
        assert_eq!(props["Application"], "Visio");
    }

    #[test]
    fn test_extract_writes_output() {
        let mut container =
            Container::from_reader(Cursor::new(build_package(&[("docProps/app.xml", APP_XML)])))
                .unwrap();
        let scratch = container.materialize().unwrap();
        let out = tempfile::tempdir().unwrap();

        let props = extract(&scratch, "docProps/app.xml", out.path()).unwrap();
        assert_eq!(props["Company"], "Test Company");
        assert_eq!(props["AppVersion"], "16.0000");

        let written = std::fs::read_to_string(out.path().join(OUTPUT_NAME)).unwrap();
        assert!(written.starts_with("<?xml"));
    }

    #[test]
    fn test_missing_or_malformed_part() {
        let mut container = Container::from_reader(Cursor::new(build_package(&[(
            "docProps/app.xml",
            "<Properties><Company>x</Properties>",
        )])))
        .unwrap();
        let scratch = container.materialize().unwrap();
        let out = tempfile::tempdir().unwrap();

        assert!(extract(&scratch, "docProps/app.xml", out.path()).is_none());
        assert!(extract(&scratch, "docProps/custom.xml", out.path()).is_none());
        assert!(!out.path().join(OUTPUT_NAME).exists());
    }
}

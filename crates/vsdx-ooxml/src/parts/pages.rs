//! Page parts (visio/pages/*.xml)
//!
//! Every page part is rewritten to `pages/<file name>` and summarized as a
//! [`PageSummary`]. The page name comes from the `PageName` cell of the page
//! sheet when there is one.

use std::fs;
use std::path::Path;

use crate::archive::ScratchDir;
use crate::error::Result;
use crate::model::PageSummary;
use crate::xml::{Element, PartTree};

/// Output folder for rewritten pages, relative to the output root
pub const OUTPUT_DIR: &str = "pages";

/// Cell name carrying the page name
const PAGE_NAME_CELL: &str = "PageName";

/// Name used when a `PageName` cell has no value attribute
const UNNAMED: &str = "Unnamed";

/// Extract every page part under `pages_dir`, in archive listing order
///
/// Pages that fail to parse or write are logged and left out.
pub fn extract(scratch: &ScratchDir, pages_dir: &str, output_dir: &Path) -> Vec<PageSummary> {
    let entries: Vec<&str> = scratch.xml_entries_in(pages_dir).collect();
    if entries.is_empty() {
        log::debug!("No page parts under {}", pages_dir);
        return Vec::new();
    }

    let pages_out = output_dir.join(OUTPUT_DIR);
    if let Err(e) = fs::create_dir_all(&pages_out) {
        log::error!("Cannot create {}: {}", pages_out.display(), e);
        return Vec::new();
    }

    entries
        .into_iter()
        .filter_map(|entry| match process_page(scratch, entry, &pages_out) {
            Ok(page) => {
                log::info!("Processed page: {}", page.filename);
                Some(page)
            }
            Err(e) => {
                log::error!("Error processing page {}: {}", entry, e);
                None
            }
        })
        .collect()
}

fn process_page(scratch: &ScratchDir, entry: &str, pages_out: &Path) -> Result<PageSummary> {
    let tree = super::load(scratch, entry)?;
    let filename = super::file_name(entry);
    let output_path = pages_out.join(filename);
    tree.save(&output_path)?;

    Ok(PageSummary {
        filename: filename.to_string(),
        element_count: tree.element_count(),
        root_tag: tree.root_tag(),
        name: resolve_name(&tree, filename),
        output_path,
    })
}

/// Page name from the page sheet, falling back to the file stem
pub fn resolve_name(tree: &PartTree, filename: &str) -> String {
    match page_name(tree.root()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => file_stem(filename).to_string(),
    }
}

/// Loose page-sheet test: any element whose local name contains `PageSheet`
///
/// This also accepts names like `PageSheetExt`; that looseness is kept on
/// purpose so pages from unusual producers still resolve a name.
pub fn is_page_sheet(element: &Element) -> bool {
    element.local_name().contains("PageSheet")
}

/// `V` of the first `PageName` cell in the first page sheet, in document order
///
/// Only the first page sheet is searched. A matching cell without `V`
/// yields `"Unnamed"`.
pub fn page_name(root: &Element) -> Option<&str> {
    let sheet = std::iter::once(root)
        .chain(root.descendants())
        .find(|element| is_page_sheet(element))?;

    sheet
        .descendants()
        .filter(|element| element.local_name() == "Cell")
        .find(|cell| cell.attribute("N") == Some(PAGE_NAME_CELL))
        .map(|cell| cell.attribute("V").unwrap_or(UNNAMED))
}

fn file_stem(filename: &str) -> &str {
    match filename.strip_suffix(".xml") {
        Some(stem) if !stem.is_empty() => stem,
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::archive::Container;
    use crate::test_utils::{build_package, PAGE1_XML};

    fn tree(xml: &str) -> PartTree {
        PartTree::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_page_name_from_page_sheet() {
        let page = tree(PAGE1_XML);
        assert_eq!(page_name(page.root()), Some("Overview"));
        assert_eq!(resolve_name(&page, "page1.xml"), "Overview");
    }

    #[test]
    fn test_first_page_name_cell_wins() {
        let page = tree(
            r#"<PageContents>
                <PageSheet>
                    <Cell N="PageName" V="First"/>
                    <Section><Cell N="PageName" V="Second"/></Section>
                </PageSheet>
            </PageContents>"#,
        );
        assert_eq!(page_name(page.root()), Some("First"));
    }

    #[test]
    fn test_only_first_page_sheet_is_searched() {
        let page = tree(
            r#"<PageContents>
                <PageSheet><Cell N="PageWidth" V="8.5"/></PageSheet>
                <PageSheet><Cell N="PageName" V="Later"/></PageSheet>
            </PageContents>"#,
        );
        assert_eq!(page_name(page.root()), None);
        assert_eq!(resolve_name(&page, "page3.xml"), "page3");
    }

    #[test]
    fn test_fallback_to_file_stem() {
        let page = tree("<PageContents><Shapes/></PageContents>");
        assert_eq!(resolve_name(&page, "page1.xml"), "page1");
    }

    #[test]
    fn test_cell_without_value_is_unnamed() {
        let page =
            tree(r#"<PageContents><PageSheet><Cell N="PageName"/></PageSheet></PageContents>"#);
        assert_eq!(resolve_name(&page, "page1.xml"), "Unnamed");
    }

    #[test]
    fn test_empty_value_falls_back() {
        let page =
            tree(r#"<PageContents><PageSheet><Cell N="PageName" V=""/></PageSheet></PageContents>"#);
        assert_eq!(resolve_name(&page, "page2.xml"), "page2");
    }

    #[test]
    fn test_is_page_sheet_substring_match() {
        let page = tree(
            r#"<v:PageContents xmlns:v="urn:v"><v:PageSheetExt><v:Cell N="PageName" V="Loose"/></v:PageSheetExt></v:PageContents>"#,
        );
        let sheet = page.root().descendants().next().unwrap();
        assert!(is_page_sheet(sheet));
        assert!(!is_page_sheet(page.root()));
        assert_eq!(page_name(page.root()), Some("Loose"));
    }

    #[test]
    fn test_extract_pages_in_archive_order() {
        let bytes = build_package(&[
            ("visio/pages/page2.xml", "<PageContents><Shapes/></PageContents>"),
            ("visio/pages/page1.xml", PAGE1_XML),
            ("visio/pages/_rels/page1.xml.rels", "<Relationships/>"),
            ("visio/pages/page3.xml", "<PageContents><Shapes></PageContents>"),
        ]);
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();
        let scratch = container.materialize().unwrap();
        let out = tempfile::tempdir().unwrap();

        let pages = extract(&scratch, "visio/pages", out.path());
        let names: Vec<_> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page2", "Overview"]);

        let overview = &pages[1];
        assert_eq!(overview.filename, "page1.xml");
        assert_eq!(overview.element_count, 6);
        assert_eq!(
            overview.root_tag,
            "{http://schemas.microsoft.com/office/visio/2012/main}PageContents"
        );
        assert_eq!(overview.output_path, out.path().join("pages").join("page1.xml"));
        assert!(overview.output_path.is_file());
        assert!(!out.path().join("pages").join("page3.xml").exists());
    }

    #[test]
    fn test_no_pages_no_output_folder() {
        let bytes = build_package(&[("visio/document.xml", "<VisioDocument/>")]);
        let mut container = Container::from_reader(Cursor::new(bytes)).unwrap();
        let scratch = container.materialize().unwrap();
        let out = tempfile::tempdir().unwrap();

        assert!(extract(&scratch, "visio/pages", out.path()).is_empty());
        assert!(!out.path().join(OUTPUT_DIR).exists());
    }
}

//! Shared test utilities for vsdx-ooxml
//!
//! This module provides in-memory VSDX fixtures used across unit tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

pub const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>Microsoft Visio</Application>
    <ScaleCrop>false</ScaleCrop>
    <Company>Test Company</Company>
    <AppVersion>16.0000</AppVersion>
</Properties>"#;

pub const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<VisioDocument xmlns="http://schemas.microsoft.com/office/visio/2012/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xml:space="preserve">
    <DocumentSettings TopPage="0">
        <GlueSettings>9</GlueSettings>
    </DocumentSettings>
</VisioDocument>"#;

pub const PAGE1_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<PageContents xmlns="http://schemas.microsoft.com/office/visio/2012/main">
    <PageSheet>
        <Cell N="PageWidth" V="8.5"/>
        <Cell N="PageName" V="Overview"/>
    </PageSheet>
    <Shapes>
        <Shape ID="1" Type="Shape">
            <Text>Start</Text>
        </Shape>
    </Shapes>
</PageContents>"#;

/// Build a ZIP archive from `(name, contents)` pairs, in the given order
pub fn build_package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// A small but complete package: properties, document, one page, one master
pub fn minimal_package() -> Vec<u8> {
    build_package(&[
        ("docProps/app.xml", APP_XML),
        ("visio/document.xml", DOCUMENT_XML),
        ("visio/pages/page1.xml", PAGE1_XML),
        (
            "visio/masters/master1.xml",
            r#"<MasterContents xmlns="http://schemas.microsoft.com/office/visio/2012/main"><Shapes/></MasterContents>"#,
        ),
    ])
}

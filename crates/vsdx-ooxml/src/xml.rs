//! XML part trees
//!
//! A [`PartTree`] is the parsed form of one archive entry. Element and
//! attribute names keep the raw `prefix:local` spelling for writing the part
//! back out, plus the resolved namespace and local name for matching, so
//! lookups never depend on which prefix the producing application chose.
//!
//! # Example
//!
//! ```
//! use vsdx_ooxml::xml::PartTree;
//!
//! let tree = PartTree::parse(br#"<v:PageContents xmlns:v="urn:v"><v:Shapes/></v:PageContents>"#)?;
//! assert_eq!(tree.root().local_name(), "PageContents");
//! assert_eq!(tree.root_tag(), "{urn:v}PageContents");
//! assert_eq!(tree.element_count(), 1);
//! # Ok::<(), vsdx_ooxml::VsdxError>(())
//! ```

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

use crate::error::{Result, VsdxError};

/// An element or attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    raw: String,
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// Name as written in the source, including any prefix
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Namespace URI the prefix resolved to, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name without prefix
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// `{uri}local` for bound names, `local` otherwise
    pub fn clark(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.local),
            None => self.local.clone(),
        }
    }

    /// Whether this is an `xmlns` or `xmlns:prefix` attribute
    pub fn is_namespace_decl(&self) -> bool {
        self.raw == "xmlns" || self.raw.starts_with("xmlns:")
    }
}

/// A single attribute with its unescaped value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// Child content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element and its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    /// Attributes in source order, namespace declarations included
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Name without prefix
    pub fn local_name(&self) -> &str {
        self.name.local_name()
    }

    /// Qualified tag in `{uri}local` form
    pub fn tag(&self) -> String {
        self.name.clark()
    }

    /// Attributes other than namespace declarations
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|attr| !attr.name.is_namespace_decl())
    }

    /// Value of the first attribute with the given local name
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes()
            .find(|attr| attr.name.local_name() == local)
            .map(|attr| attr.value.as_str())
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Text preceding the first child element
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// All elements below this one, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }
}

/// Pre-order iterator over the elements of a subtree
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Deepest element nesting accepted by [`PartTree::parse`]
///
/// Writing and dropping a tree recurse once per level, so deeper documents
/// are rejected as malformed instead of exhausting the stack.
pub const MAX_DEPTH: usize = 512;

/// A parsed XML part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartTree {
    root: Element,
}

impl PartTree {
    /// Parse XML bytes into a tree
    ///
    /// Any well-formed document up to [`MAX_DEPTH`] levels deep is accepted;
    /// nothing is checked against the Visio schema. Comments and processing
    /// instructions are skipped.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = NsReader::from_reader(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    check_depth(stack.len())?;
                    stack.push(read_element(&reader, e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    check_depth(stack.len())?;
                    let element = read_element(&reader, e)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| VsdxError::malformed("closing tag without opening tag"))?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e.unescape().map_err(VsdxError::malformed)?;
                    push_text(&text, &mut stack)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = std::str::from_utf8(e).map_err(VsdxError::malformed)?;
                    push_text(text, &mut stack)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(VsdxError::malformed(e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(VsdxError::malformed(format!(
                "unclosed element <{}>",
                open.name.raw()
            )));
        }

        root.map(|root| PartTree { root })
            .ok_or_else(|| VsdxError::malformed("no root element"))
    }

    /// The document element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Qualified tag of the document element
    pub fn root_tag(&self) -> String {
        self.root.tag()
    }

    /// Number of elements below the root
    pub fn element_count(&self) -> usize {
        self.root.descendants().count()
    }

    /// Serialize with an XML declaration
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        writer
            .write_event(Event::Text(BytesText::new("\n")))
            .map_err(write_error)?;
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }

    /// Serialize and write to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_xml_bytes()?;
        fs::write(path, bytes).map_err(|source| VsdxError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(VsdxError::malformed)
}

fn namespace_of(resolved: ResolveResult) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => utf8(ns.as_ref()).map(Some),
        // An undeclared prefix is tolerated and treated as no namespace
        ResolveResult::Unbound | ResolveResult::Unknown(_) => Ok(None),
    }
}

fn read_element(reader: &NsReader<&[u8]>, start: &BytesStart) -> Result<Element> {
    let (resolved, local) = reader.resolve_element(start.name());
    let name = QName {
        raw: utf8(start.name().as_ref())?,
        namespace: namespace_of(resolved)?,
        local: utf8(local.as_ref())?,
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(VsdxError::malformed)?;
        let value = attr
            .unescape_value()
            .map_err(VsdxError::malformed)?
            .into_owned();
        let (resolved, local) = reader.resolve_attribute(attr.key);
        attributes.push(Attribute {
            name: QName {
                raw: utf8(attr.key.as_ref())?,
                namespace: namespace_of(resolved)?,
                local: utf8(local.as_ref())?,
            },
            value,
        });
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn check_depth(open: usize) -> Result<()> {
    if open >= MAX_DEPTH {
        return Err(VsdxError::malformed(format!(
            "elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    Ok(())
}

fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            Ok(())
        }
        None if root.is_some() => Err(VsdxError::malformed("multiple root elements")),
        None => {
            *root = Some(element);
            Ok(())
        }
    }
}

fn push_text(text: &str, stack: &mut [Element]) -> Result<()> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(VsdxError::malformed("text outside the root element"));
    };

    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(Node::Text(text.to_string())),
    }
    Ok(())
}

fn write_error(e: impl std::fmt::Display) -> VsdxError {
    VsdxError::Io(std::io::Error::other(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.raw());
    for attr in &element.attributes {
        start.push_attribute((attr.name.raw(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.raw())))
        .map_err(write_error)
}

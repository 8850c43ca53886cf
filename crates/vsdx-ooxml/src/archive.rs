//! Archive handling for VSDX files
//!
//! VSDX files are ZIP archives containing XML parts. The [`Container`] keeps
//! the archive open for random access; [`Container::materialize`] unpacks it
//! into a [`ScratchDir`] that is removed again when the guard is dropped.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::read::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, VsdxError};

/// Name prefix of scratch directories
pub const SCRATCH_PREFIX: &str = "vsdx-";

/// An opened VSDX package
#[derive(Debug)]
pub struct Container<R = File> {
    archive: ZipArchive<R>,
}

impl Container<File> {
    /// Open a VSDX file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VsdxError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Container<R> {
    /// Create from any reader that implements Read + Seek
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Entry names in archive listing order
    pub fn entries(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Stream the contents of a named entry
    pub fn read_entry(&mut self, name: &str) -> Result<impl Read + '_> {
        match self.archive.by_name(name) {
            Ok(file) => Ok(file),
            Err(ZipError::FileNotFound) => Err(VsdxError::EntryMissing(name.to_string())),
            Err(e) => Err(VsdxError::CorruptArchive(e)),
        }
    }

    /// Unpack every entry into a fresh temporary directory
    ///
    /// Entries whose names would escape the scratch root are rejected by the
    /// ZIP reader and fail the whole call.
    pub fn materialize(&mut self) -> Result<ScratchDir> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
        self.unpack(dir)
    }

    /// Like [`materialize`](Self::materialize), but under `parent` instead
    /// of the system temporary directory
    pub fn materialize_in(&mut self, parent: &Path) -> Result<ScratchDir> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(parent)?;
        self.unpack(dir)
    }

    fn unpack(&mut self, dir: TempDir) -> Result<ScratchDir> {
        self.archive.extract(dir.path())?;
        log::info!("Extracted VSDX to temporary directory: {}", dir.path().display());

        Ok(ScratchDir {
            entries: self.entries(),
            dir,
        })
    }
}

/// A package unpacked to disk
///
/// The directory and everything below it is deleted when this value is
/// dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    entries: Vec<String>,
}

impl ScratchDir {
    /// Root of the unpacked tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Entry names in archive listing order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether a file entry with this name was unpacked
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name) && self.path_of(name).is_file()
    }

    /// On-disk location of an entry
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Read an unpacked entry
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        if !self.contains(name) {
            return Err(VsdxError::EntryMissing(name.to_string()));
        }
        Ok(std::fs::read(self.path_of(name))?)
    }

    /// `.xml` entries directly inside `dir`, in archive listing order
    ///
    /// Nested folders such as `visio/pages/_rels/` are not included.
    pub fn xml_entries_in<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let dir = dir.trim_end_matches('/');
        self.entries.iter().filter_map(move |entry| {
            let file_name = entry.strip_prefix(dir)?.strip_prefix('/')?;
            if file_name.is_empty() || file_name.contains('/') || !file_name.ends_with(".xml") {
                return None;
            }
            Some(entry.as_str())
        })
    }
}

//! File input and output helpers for survey documents.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{SurfaceError, SurfaceResult};

pub mod export;
pub mod landxml;

/// Reads a file to string.
pub fn read_to_string(path: &str) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes a string to a file, replacing any existing content.
pub fn write_string(path: &str, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Supplies raw document bytes by identifier.
pub trait ByteSource {
    fn read(&self, identifier: &str) -> SurfaceResult<Vec<u8>>;
}

/// Reads identifiers as file names relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ByteSource for DirectorySource {
    fn read(&self, identifier: &str) -> SurfaceResult<Vec<u8>> {
        fs::read(self.root.join(identifier)).map_err(|e| SurfaceError::from_io(identifier, e))
    }
}

/// In-memory byte source, mostly useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(identifier.into(), bytes.into());
    }

    pub fn with(mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(identifier, bytes);
        self
    }
}

impl ByteSource for MemorySource {
    fn read(&self, identifier: &str) -> SurfaceResult<Vec<u8>> {
        self.entries
            .get(identifier)
            .cloned()
            .ok_or_else(|| SurfaceError::NotFound(identifier.to_string()))
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn read(&self, identifier: &str) -> SurfaceResult<Vec<u8>> {
        (**self).read(identifier)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read(&self, identifier: &str) -> SurfaceResult<Vec<u8>> {
        (**self).read(identifier)
    }
}

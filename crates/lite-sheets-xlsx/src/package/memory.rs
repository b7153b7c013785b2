//! In-memory package

use std::collections::BTreeMap;
use std::io::{self, Write};

use super::{PackageSink, PartManifest, TargetMode};
use crate::error::XlsxResult;

/// Keeps every part as raw bytes, keyed by path
///
/// Useful for inspecting generated XML without unpacking an archive.
#[derive(Debug, Default)]
pub struct MemoryPackage {
    parts: BTreeMap<String, Vec<u8>>,
    current: Option<String>,
    manifest: PartManifest,
}

impl MemoryPackage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Write for MemoryPackage {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let part = self
            .current
            .as_ref()
            .and_then(|path| self.parts.get_mut(path))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no package part is open"))?;
        part.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PackageSink for MemoryPackage {
    type Output = PackageParts;

    fn start_part(&mut self, path: &str, content_type: &'static str) -> XlsxResult<()> {
        self.manifest.register_part(path, content_type)?;
        self.parts.insert(path.to_string(), Vec::new());
        self.current = Some(path.to_string());
        Ok(())
    }

    fn add_relationship(
        &mut self,
        source: &str,
        rel_type: &'static str,
        target: &str,
        mode: TargetMode,
    ) -> String {
        self.manifest.add_relationship(source, rel_type, target, mode)
    }

    fn finish(mut self) -> XlsxResult<PackageParts> {
        for (path, bytes) in self.manifest.render()? {
            self.parts.insert(path, bytes);
        }
        Ok(PackageParts { parts: self.parts })
    }
}

/// The finished parts of a [`MemoryPackage`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageParts {
    parts: BTreeMap<String, Vec<u8>>,
}

impl PackageParts {
    /// Raw bytes of a part
    pub fn part(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    /// A part decoded as UTF-8
    pub fn part_str(&self, path: &str) -> Option<&str> {
        self.part(path).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// All part paths, sorted
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

//! ZIP archive package

use std::io::{self, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{PackageSink, PartManifest, TargetMode};
use crate::error::XlsxResult;
use crate::settings::{PackageCompression, WorkbookSettings};

/// Writes parts straight into a ZIP archive
///
/// Each part is compressed as it is written; nothing but the manifest is kept
/// in memory.
pub struct ZipPackage<W: Write + Seek> {
    zip: ZipWriter<W>,
    method: CompressionMethod,
    level: Option<i64>,
    manifest: PartManifest,
    part_open: bool,
}

impl<W: Write + Seek> ZipPackage<W> {
    /// Start a package over a seekable writer
    pub fn new(inner: W, settings: &WorkbookSettings) -> Self {
        let method = match settings.compression {
            PackageCompression::Stored => CompressionMethod::Stored,
            PackageCompression::Deflated => CompressionMethod::Deflated,
        };
        Self {
            zip: ZipWriter::new(inner),
            method,
            level: settings.compression_level,
            manifest: PartManifest::default(),
            part_open: false,
        }
    }

    fn entry_options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(self.method)
            .compression_level(self.level)
    }
}

impl<W: Write + Seek> Write for ZipPackage<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.part_open {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "no package part is open",
            ));
        }
        self.zip.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.zip.flush()
    }
}

impl<W: Write + Seek> PackageSink for ZipPackage<W> {
    type Output = W;

    fn start_part(&mut self, path: &str, content_type: &'static str) -> XlsxResult<()> {
        self.manifest.register_part(path, content_type)?;
        let options = self.entry_options();
        self.zip.start_file(path, options)?;
        self.part_open = true;
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

    fn finish(mut self) -> XlsxResult<W> {
        for (path, bytes) in self.manifest.render()? {
            let options = self.entry_options();
            self.zip.start_file(path, options)?;
            self.zip.write_all(&bytes)?;
        }
        Ok(self.zip.finish()?)
    }
}

//! Archive writer capability and its ZIP implementation.
//!
//! Traversal only ever talks to [`ArchiveSink`], so the container format can
//! change without touching the walker.

use crate::ArchiveError;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Destination for named file entries.
pub trait ArchiveSink {
    /// Streams the file at `source` into the archive as `entry_name`.
    ///
    /// Returns the number of uncompressed bytes read from `source`.
    ///
    /// # Errors
    ///
    /// Failing to open or read `source` is reported as
    /// [`ArchiveError::ReadEntry`]; a `NotFound` kind there is the
    /// non-fatal "missing file" warning class.
    fn append_file(&mut self, source: &Path, entry_name: &str) -> Result<u64>;

    /// Writes the container trailer, flushes, and returns the archive size.
    fn finish(self) -> Result<u64>
    where
        Self: Sized;
}

/// ZIP writer streaming deflated entries into `W`.
///
/// # Examples
///
/// ```no_run
/// use dirzip_core::sink::ArchiveSink;
/// use dirzip_core::sink::ZipSink;
/// use std::path::Path;
///
/// let mut sink = ZipSink::create(Path::new("out.zip"), Some(9), true)?;
/// sink.append_file(Path::new("README.md"), "README.md")?;
/// let size = sink.finish()?;
/// println!("{size} bytes");
/// # Ok::<(), dirzip_core::ArchiveError>(())
/// ```
pub struct ZipSink<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    preserve_permissions: bool,
    buffer: Vec<u8>,
}

impl ZipSink<BufWriter<File>> {
    /// Creates (or truncates) the archive file at `path`.
    pub fn create(
        path: &Path,
        compression_level: Option<u8>,
        preserve_permissions: bool,
    ) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(
            BufWriter::new(file),
            compression_level,
            preserve_permissions,
        ))
    }
}

impl<W: Write + Seek> ZipSink<W> {
    /// Wraps an arbitrary seekable writer.
    pub fn new(writer: W, compression_level: Option<u8>, preserve_permissions: bool) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(compression_level.map(i64::from));

        Self {
            zip: ZipWriter::new(writer),
            options,
            preserve_permissions,
            buffer: vec![0u8; 64 * 1024],
        }
    }

    /// Finalizes the archive and returns the inner writer with its size.
    pub fn finish_into_inner(self) -> Result<(W, u64)> {
        let mut writer = self.zip.finish()?;
        let size = writer.seek(SeekFrom::End(0))?;
        writer.flush()?;
        Ok((writer, size))
    }

    fn entry_options(&self, file: &File) -> Result<SimpleFileOptions> {
        if !self.preserve_permissions {
            return Ok(self.options);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = file.metadata()?.permissions().mode();
            Ok(self.options.unix_permissions(mode))
        }
        #[cfg(not(unix))]
        {
            let _ = file;
            Ok(self.options)
        }
    }
}

impl<W: Write + Seek> ArchiveSink for ZipSink<W> {
    fn append_file(&mut self, source: &Path, entry_name: &str) -> Result<u64> {
        let read_error = |source_err| ArchiveError::ReadEntry {
            path: source.to_path_buf(),
            source: source_err,
        };

        // Open before starting the entry so a vanished file leaves no stub
        let mut file = File::open(source).map_err(read_error)?;
        let options = self.entry_options(&file)?;

        self.zip.start_file(entry_name, options)?;

        let mut bytes_read = 0u64;
        loop {
            let n = file.read(&mut self.buffer).map_err(read_error)?;
            if n == 0 {
                break;
            }
            self.zip.write_all(&self.buffer[..n])?;
            bytes_read += n as u64;
        }

        Ok(bytes_read)
    }

    fn finish(self) -> Result<u64> {
        self.finish_into_inner().map(|(_, size)| size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn test_zip_sink_writes_entries() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();

        let mut sink = ZipSink::new(Cursor::new(Vec::new()), Some(9), false);
        let bytes = sink.append_file(&temp.path().join("a.txt"), "dir/a.txt").unwrap();
        assert_eq!(bytes, 5);

        let (cursor, size) = sink.finish_into_inner().unwrap();
        let data = cursor.into_inner();
        assert_eq!(size, data.len() as u64);
        assert_eq!(&data[0..4], b"PK\x03\x04");

        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 1);
        let mut entry = archive.by_name("dir/a.txt").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_zip_sink_missing_source_is_missing_file() {
        let temp = TempDir::new().unwrap();
        let mut sink = ZipSink::new(Cursor::new(Vec::new()), Some(6), false);

        let err = sink
            .append_file(&temp.path().join("gone.txt"), "gone.txt")
            .unwrap_err();
        assert!(err.is_missing_file());

        // No stub entry was started
        let (cursor, _) = sink.finish_into_inner().unwrap();
        let archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_zip_sink_large_file_spans_buffers() {
        let temp = TempDir::new().unwrap();
        let content = "x".repeat(200 * 1024);
        fs::write(temp.path().join("big.txt"), &content).unwrap();

        let mut sink = ZipSink::new(Cursor::new(Vec::new()), Some(9), false);
        let bytes = sink.append_file(&temp.path().join("big.txt"), "big.txt").unwrap();
        assert_eq!(bytes, content.len() as u64);

        let (cursor, size) = sink.finish_into_inner().unwrap();
        // Highly repetitive data compresses well
        assert!(size < 10 * 1024);
        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.by_name("big.txt").unwrap().size(), content.len() as u64);
    }

    #[test]
    fn test_zip_sink_create_on_disk() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "content").unwrap();
        let output = temp.path().join("out.zip");

        let mut sink = ZipSink::create(&output, None, true).unwrap();
        sink.append_file(&temp.path().join("a.txt"), "a.txt").unwrap();
        let size = sink.finish().unwrap();

        assert_eq!(fs::metadata(&output).unwrap().len(), size);
    }

    #[cfg(unix)]
    #[test]
    fn test_zip_sink_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut sink = ZipSink::new(Cursor::new(Vec::new()), Some(9), true);
        sink.append_file(&script, "run.sh").unwrap();
        let (cursor, _) = sink.finish_into_inner().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        let mode = archive.by_name("run.sh").unwrap().unix_mode().unwrap();
        assert_eq!(mode & 0o777, 0o755);
    }
}

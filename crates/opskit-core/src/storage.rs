//! Part-file lifecycle for single-artifact outputs.
//!
//! Bytes go to `<final>.part`; only a complete payload is synced and renamed
//! onto the final path. A part file that is dropped without `finish` is
//! removed, so a failed attempt never leaves a truncated artifact behind.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `rockyou.txt` → `rockyou.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for `<final>.part`.
pub struct PartFile {
    file: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the part file for `final_path`. The final file is not touched.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file: Some(BufWriter::new(file)),
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    /// Append `data` to the part file.
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "part file already closed"))?;
        file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, fsync, and rename onto the final path. Returns the number of bytes written.
    /// On error the part file is removed.
    pub fn finish(mut self) -> io::Result<u64> {
        let Some(writer) = self.file.take() else {
            return Err(io::Error::new(io::ErrorKind::Other, "part file already closed"));
        };
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&self.temp_path, &self.final_path)?;
        Ok(self.written)
    }

    /// Close and remove the part file.
    pub fn discard(mut self) {
        self.remove_temp();
    }

    fn remove_temp(&mut self) {
        self.file.take();
        if self.temp_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.temp_path) {
                tracing::warn!("could not remove {}: {}", self.temp_path.display(), e);
            }
        }
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.file.is_some() || self.temp_path.exists() {
            self.remove_temp();
        }
    }
}

/// Write a complete in-memory payload to `final_path` through a part file.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<u64> {
    let mut part = PartFile::create(final_path)?;
    part.write(data)?;
    part.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.txt"));
        assert_eq!(p.to_string_lossy(), "file.txt.part");
        let p2 = temp_path(Path::new("/tmp/wordlists/rockyou.txt"));
        assert_eq!(p2.to_string_lossy(), "/tmp/wordlists/rockyou.txt.part");
    }

    #[test]
    fn write_and_finish_renames() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.txt");
        let mut part = PartFile::create(&final_path).unwrap();
        part.write(b"hello ").unwrap();
        part.write(b"world").unwrap();
        assert_eq!(part.written(), 11);
        assert!(temp_path(&final_path).exists());
        assert!(!final_path.exists());

        let n = part.finish().unwrap();
        assert_eq!(n, 11);
        assert!(!temp_path(&final_path).exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"hello world");
    }

    #[test]
    fn discard_removes_part_and_keeps_previous_final() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.txt");
        std::fs::write(&final_path, b"previous").unwrap();

        let mut part = PartFile::create(&final_path).unwrap();
        part.write(b"truncated").unwrap();
        part.discard();

        assert!(!temp_path(&final_path).exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"previous");
    }

    #[test]
    fn drop_without_finish_removes_part() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.txt");
        {
            let mut part = PartFile::create(&final_path).unwrap();
            part.write(b"abc").unwrap();
        }
        assert!(!temp_path(&final_path).exists());
        assert!(!final_path.exists());
    }

    #[test]
    fn create_truncates_stale_part() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.txt");
        std::fs::write(temp_path(&final_path), b"stale bytes from an interrupted run").unwrap();
        let n = write_atomic(&final_path, b"new").unwrap();
        assert_eq!(n, 3);
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }
}

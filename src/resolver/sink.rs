//! Destinations for downloaded artwork.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// Where resolved artwork bytes go.
pub trait ArtworkSink {
    fn write_artwork(&mut self, data: &[u8]) -> io::Result<()>;

    /// Human-readable name for status messages.
    fn describe(&self) -> String;
}

/// Writes artwork to a file, replacing any existing content.
///
/// Bytes land in a sibling `.part` file first and are renamed over the target,
/// so a failed write never leaves a truncated cover behind. Missing parent
/// directories are created.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }
}

impl ArtworkSink for FileSink {
    fn write_artwork(&mut self, data: &[u8]) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = std::fs::write(&temp_path, data).and_then(|()| std::fs::rename(&temp_path, &self.path)) {
            if temp_path.is_file() {
                let _ = std::fs::remove_file(&temp_path);
            }
            return Err(e);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory sink; appends the bytes.
impl ArtworkSink for Vec<u8> {
    fn write_artwork(&mut self, data: &[u8]) -> io::Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory buffer".to_string()
    }
}

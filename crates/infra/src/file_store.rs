//! File-backed product stores.
//!
//! Both flavours hold the same JSON array of product records; they differ only
//! in their default file name. Saves go to a sibling temporary file that is
//! renamed over the target, so the file always holds either the old or the new list.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, trace};

use stockroom_inventory::{ProductRecord, ProductStore, StoreError};

/// On-disk flavour of a product file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileFlavor {
    /// `inventario.json`
    Json,
    /// `inventario.txt`
    Text,
}

impl FileFlavor {
    pub fn default_file_name(self) -> &'static str {
        match self {
            FileFlavor::Json => "inventario.json",
            FileFlavor::Text => "inventario.txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileFlavor::Json => "json",
            FileFlavor::Text => "text",
        }
    }
}

/// Product store persisted as a JSON record array in a single file.
///
/// The store assumes it is the only writer of `path` for the life of the process.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    flavor: FileFlavor,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, flavor: FileFlavor) -> Self {
        Self {
            path: path.into(),
            flavor,
        }
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileFlavor::Json)
    }

    pub fn text(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileFlavor::Text)
    }

    /// Store using the flavour's default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, flavor: FileFlavor) -> Self {
        Self::new(dir.as_ref().join(flavor.default_file_name()), flavor)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flavor(&self) -> FileFlavor {
        self.flavor
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| self.flavor.default_file_name().into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn encode(records: &[ProductRecord]) -> Result<Vec<u8>, StoreError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut ser)
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn write_atomically(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::unavailable(parent, e))?;
        }

        let temp = self.temp_path();
        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });

        if let Err(e) = written.and_then(|()| fs::rename(&temp, &self.path)) {
            // Best effort; the target file is untouched either way.
            let _ = fs::remove_file(&temp);
            return Err(StoreError::unavailable(&self.path, e));
        }
        Ok(())
    }
}

impl ProductStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "no product file yet; starting empty");
                return Ok(vec![]);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StoreError::corrupt(&self.path, format!("not valid UTF-8: {e}")));
            }
            Err(e) => return Err(StoreError::unavailable(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Err(StoreError::corrupt(&self.path, "file is empty"));
        }

        let records: Vec<ProductRecord> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
        trace!(path = ?self.path, records = records.len(), "product file read");
        Ok(records)
    }

    fn save(&self, records: &[ProductRecord]) -> Result<(), StoreError> {
        let bytes = Self::encode(records)?;
        self.write_atomically(&bytes)?;
        trace!(path = ?self.path, records = records.len(), bytes = bytes.len(), "product file written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.flavor.label(), self.path.display())
    }
}

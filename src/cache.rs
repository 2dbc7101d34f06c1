use crate::capabilities::Capabilities;
use crate::package::PackageRef;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const CACHE_FILE_NAME: &str = "li.db";

/// Handle to the persistent license cache: a JSON object mapping encoded
/// (name, version) keys to raw license strings.
///
/// Opened once per run and consumed by `write_all`, which replaces the
/// backing file atomically.
pub struct CacheHandle {
    path: PathBuf,
}

impl CacheHandle {
    /// Open the per-user cache, creating the directory if needed. Falls back
    /// to the system temp directory when no platform cache directory is
    /// available.
    pub fn open(caps: &Capabilities) -> Result<Self, Box<dyn Error>> {
        let dir = match &caps.cache_dir {
            Some(dir) => dir.join("license-info"),
            None => std::env::temp_dir(),
        };

        if !dir.is_dir() {
            fs::create_dir_all(&dir)?;
        }

        Ok(CacheHandle {
            path: dir.join(CACHE_FILE_NAME),
        })
    }

    /// Open a cache at an explicit path.
    #[allow(dead_code)] // Used by tests, which never touch the user cache
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        CacheHandle { path: path.into() }
    }

    /// Read the full persisted mapping into memory. A missing backing file
    /// is an empty cache; an undecodable key is a fatal error.
    pub fn read_all(&self) -> Result<HashMap<PackageRef, String>, Box<dyn Error>> {
        let packed = self.read_packed()?;

        let mut data = HashMap::with_capacity(packed.len());
        for (key, license) in packed {
            data.insert(PackageRef::decode_key(&key)?, license);
        }

        Ok(data)
    }

    /// Merge `delta` over the persisted mapping and flush. Delta entries
    /// overwrite existing ones with the same key. Consumes the handle.
    pub fn write_all(self, delta: &HashMap<PackageRef, String>) -> Result<(), Box<dyn Error>> {
        let mut packed = self.read_packed()?;

        for (pkg, license) in delta {
            packed.insert(pkg.encode_key(), license.clone());
        }

        let json_content = serde_json::to_string(&packed)?;

        // Write to a sibling temp file and rename over the cache so a failed
        // run never leaves a half-written file behind.
        let dir = self.path.parent().ok_or("cache path has no parent directory")?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(json_content.as_bytes())?;
        file.persist(&self.path)?;

        Ok(())
    }

    fn read_packed(&self) -> Result<HashMap<String, String>, Box<dyn Error>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

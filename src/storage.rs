use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Flat JSON object on disk, rewritten atomically on every `set`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        read_json(&self.path)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // an unreadable file is replaced rather than blocking every later write
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        write_json_atomic(&self.path, &entries)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store
                .entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
        store
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "folio", "folio")
}

pub fn get_config_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        let dir = proj_dirs
            .state_dir()
            .unwrap_or_else(|| proj_dirs.data_local_dir())
            .to_path_buf();
        fs::create_dir_all(&dir).ok();
        return dir;
    }
    PathBuf::from(".")
}

pub fn get_visitor_store_path() -> PathBuf {
    get_state_dir().join("visitor.json")
}

pub fn get_logs_dir() -> PathBuf {
    get_state_dir().join("logs")
}

pub fn get_download_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| StorageError::parse(path, e))
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::parse(path, e))?;
    atomic_write(path, &json)
}

pub fn copy_into_dir(source: &Path, dest_dir: &Path) -> Result<PathBuf, StorageError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| StorageError::io(source, "path has no file name"))?;
    fs::create_dir_all(dest_dir).map_err(|e| StorageError::io(dest_dir, e))?;
    let target = dest_dir.join(file_name);
    fs::copy(source, &target).map_err(|e| StorageError::io(source, e))?;
    Ok(target)
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "folio-";
pub const LOG_FILTER_ENV: &str = "FOLIO_LOG";
pub const RETENTION_DAYS: u64 = 7;

#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: PathBuf,
}

pub fn create_log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("{}{}.log", LOG_FILE_PREFIX, timestamp))
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
}

#[derive(Clone)]
struct SharedFile(Arc<Mutex<File>>);

impl std::io::Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut file) => file.write(buf),
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut file) => file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = SharedFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub fn init_file_logging(logs_dir: &Path) -> Result<LogFileInfo> {
    fs::create_dir_all(logs_dir).context("Failed to create logs directory")?;

    let log_path = create_log_file_path(logs_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(SharedFile(Arc::new(Mutex::new(file))))
        .with_ansi(false)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("folio=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogFileInfo { path: log_path })
}

pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(RETENTION_DAYS * 24 * 60 * 60))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    cleanup_logs_before(logs_dir, cutoff)
}

fn cleanup_logs_before(logs_dir: &Path, cutoff: SystemTime) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_log_file(name) {
            continue;
        }

        if let Ok(modified) = entry.metadata().and_then(|m| m.modified())
            && modified < cutoff
            && fs::remove_file(&path).is_ok()
        {
            deleted += 1;
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}", prefix, now))
    }

    #[test]
    fn test_create_log_file_path() {
        let path = create_log_file_path(Path::new("/tmp/folio/logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("folio-"));
        assert!(name.ends_with(".log"));
        assert!(is_log_file(&name));
        assert!(!is_log_file("notes.txt"));
        assert!(!is_log_file("other-2026.log"));
    }

    #[test]
    fn test_cleanup_missing_dir_is_zero() {
        assert_eq!(cleanup_old_logs(&unique_dir("folio_logs_none")).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_only_touches_folio_logs() {
        let dir = unique_dir("folio_logs_cleanup");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("folio-2026-01-01_00-00-00.log"), "old").unwrap();
        fs::write(dir.join("keep.txt"), "not a log").unwrap();

        // every file is older than a cutoff in the future
        let future = SystemTime::now() + Duration::from_secs(60);
        assert_eq!(cleanup_logs_before(&dir, future).unwrap(), 1);
        assert!(dir.join("keep.txt").exists());

        fs::write(dir.join("folio-2026-01-02_00-00-00.log"), "fresh").unwrap();
        assert_eq!(cleanup_old_logs(&dir).unwrap(), 0);

        fs::remove_dir_all(dir).ok();
    }
}

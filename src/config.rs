use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{TIME_SETTINGS, TYPEWRITER_SETTINGS},
    error::ConfigError,
    storage,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_owner_name")]
    pub owner_name: String,

    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,

    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub resume: ResumeConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_loading_ms")]
    pub loading_ms: u64,

    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    #[serde(default = "default_type_ms")]
    pub type_ms: u64,

    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,

    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeConfig {
    #[serde(default = "default_resume_path")]
    pub display_path: PathBuf,

    #[serde(default = "default_resume_path")]
    pub download_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_contact_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_contact_from")]
    pub from: String,

    #[serde(default = "default_contact_to")]
    pub to: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_owner_name() -> String {
    "Richard Su".to_string()
}

fn default_greetings() -> Vec<String> {
    vec![
        "Hi, I am Richard Su".to_string(),
        "A student and developer".to_string(),
        "Good to see you!".to_string(),
    ]
}

fn default_tagline() -> String {
    "Hello / Bonjour / 你好 / Здравствуйте".to_string()
}

fn default_loading_ms() -> u64 {
    TIME_SETTINGS.loading_ms
}

fn default_transition_ms() -> u64 {
    TIME_SETTINGS.transition_ms
}

fn default_type_ms() -> u64 {
    TYPEWRITER_SETTINGS.type_ms
}

fn default_delete_ms() -> u64 {
    TYPEWRITER_SETTINGS.delete_ms
}

fn default_pause_ms() -> u64 {
    TYPEWRITER_SETTINGS.pause_ms
}

fn default_resume_path() -> PathBuf {
    PathBuf::from("Ruiquan_Richard_Su_Resume.pdf")
}

fn default_contact_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_api_key_env() -> String {
    "RESEND_API_KEY".to_string()
}

fn default_contact_from() -> String {
    "noreply@richardsu.org".to_string()
}

fn default_contact_to() -> String {
    "r38su@uwaterloo.ca".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            greetings: default_greetings(),
            tagline: default_tagline(),
            catalog_path: None,
            timing: TimingConfig::default(),
            resume: ResumeConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_ms: default_loading_ms(),
            transition_ms: default_transition_ms(),
            type_ms: default_type_ms(),
            delete_ms: default_delete_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            display_path: default_resume_path(),
            download_path: default_resume_path(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_contact_endpoint(),
            api_key_env: default_api_key_env(),
            from: default_contact_from(),
            to: default_contact_to(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TimingConfig {
    pub fn loading(&self) -> Duration {
        Duration::from_millis(self.loading_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&storage::get_config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary). Every
//! section is optional and unknown fields are ignored so older binaries keep
//! accepting newer files. A missing file yields defaults; a malformed file also
//! yields defaults, with a `warn` under the `config` target.
//!
//! ```toml
//! [cipher]
//! module = "rotation"   # resolved once at startup; unknown names abort startup
//!
//! [history]
//! max_depth = 500       # omit for an unbounded undo stack
//!
//! [log]
//! file = "quill.log"
//! filter = "info"       # used when RUST_LOG is unset
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "quill.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CipherConfig {
    #[serde(default = "CipherConfig::default_module")]
    pub module: String,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            module: Self::default_module(),
        }
    }
}

impl CipherConfig {
    fn default_module() -> String {
        "rotation".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default)]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: String,
    #[serde(default = "LogConfig::default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            filter: Self::default_filter(),
        }
    }
}

impl LogConfig {
    fn default_file() -> String {
        "quill.log".to_string()
    }
    fn default_filter() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub cipher: CipherConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,     // original file string (optional)
    pub source: Option<PathBuf>, // path the file was read from
    pub file: ConfigFile,        // parsed (or default) data
}

/// Config path following platform conventions: working directory first, then
/// the user config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), module = file.cipher.module.as_str(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Cipher module name, preferring a command line override.
    pub fn cipher_module<'a>(&'a self, cli_override: Option<&'a str>) -> &'a str {
        cli_override.unwrap_or(self.file.cipher.module.as_str())
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.file.history.max_depth
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/curlrun/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlrunConfig {
    /// Directory holding request templates. Relative paths resolve against the working directory.
    pub templates_dir: PathBuf,
    /// Program invoked for every request (looked up in PATH unless absolute).
    pub curl_program: String,
    /// JSON field read from a token response body.
    pub token_field: String,
    /// Header whose value may carry a `[template]` token reference.
    pub authorization_header: String,
}

impl Default for CurlrunConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("curl_templates"),
            curl_program: "curl".to_string(),
            token_field: "accesstoken".to_string(),
            authorization_header: "Authorization".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("curlrun")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CurlrunConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CurlrunConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<CurlrunConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: CurlrunConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

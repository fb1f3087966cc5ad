//! Config module - Quản lý cấu hình QuoteVault (quotevault.toml).
//!
//! File cấu hình chứa:
//! - Đường dẫn store directory
//! - Các settings cho server sync (endpoint, interval, batch size)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cấu hình sync với server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Endpoint trả về JSON array của posts
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Khoảng cách giữa các lần sync (giây) cho watch mode
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Số items lấy từ server mỗi lần sync
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    5
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_secs: default_interval_secs(),
            batch_size: default_batch_size(),
        }
    }
}

/// Cấu hình chính của QuoteVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Phiên bản config (để migrate trong tương lai)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Đường dẫn đến store directory (chứa quotes.json và state.json)
    pub store_path: PathBuf,

    /// Cấu hình sync
    #[serde(default)]
    pub sync: SyncConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store_path: default_store_path(),
            sync: SyncConfig::default(),
        }
    }
}

/// Lấy đường dẫn store mặc định
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("quotevault"))
        .unwrap_or_else(|| PathBuf::from("./quotevault"))
}

/// Lấy đường dẫn config directory mặc định (~/.config/quotevault/)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("quotevault"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Lấy đường dẫn config file mặc định
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("quotevault.toml")
}

#[allow(dead_code)]
impl Config {
    /// Tạo config mới với các giá trị mặc định
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config từ file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config từ đường dẫn mặc định (default nếu file chưa có)
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Lưu config ra file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Tạo thư mục cha nếu chưa tồn tại
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        Ok(())
    }

    /// Lấy đường dẫn đến store directory
    pub fn store_dir(&self) -> &Path {
        &self.store_path
    }
}

//! AppState - State nhỏ lưu trong state.json.
//!
//! Giữ category đang chọn (persist qua các lần chạy) và thời gian
//! sync thành công cuối cùng.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::quotes::QuoteStore;

/// Sentinel category: không filter gì cả
pub const ALL_CATEGORIES: &str = "all";

/// Tên file chứa state trong store directory
pub const STATE_FILE: &str = "state.json";

/// State persist qua các lần chạy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Category đang chọn ("all" hoặc một category trong collection)
    #[serde(default = "default_category")]
    pub selected_category: String,
    /// Thời gian sync thành công cuối cùng
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_category: default_category(),
            last_sync_at: None,
        }
    }
}

impl AppState {
    /// Đường dẫn đến state.json trong store directory
    pub fn state_path(store_dir: &Path) -> PathBuf {
        store_dir.join(STATE_FILE)
    }

    /// Load state từ store directory (default nếu chưa có hoặc invalid)
    pub fn load(store_dir: &Path) -> Self {
        let path = Self::state_path(store_dir);
        if !path.exists() {
            return Self::default();
        }

        fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Lưu state ra state.json
    pub fn save(&self, store_dir: &Path) -> Result<()> {
        fs::create_dir_all(store_dir)
            .with_context(|| format!("Cannot create store directory: {}", store_dir.display()))?;

        let path = Self::state_path(store_dir);
        let content = serde_json::to_string_pretty(self).context("Cannot serialize state")?;
        fs::write(&path, content)
            .with_context(|| format!("Cannot write state file: {}", path.display()))?;
        Ok(())
    }

    /// Set category đang chọn
    pub fn set_category(&mut self, category: &str) {
        self.selected_category = category.to_string();
    }

    /// Đánh dấu vừa sync thành công
    pub fn mark_synced(&mut self) {
        self.last_sync_at = Some(Utc::now());
    }

    /// Category hiệu lực cho việc render.
    ///
    /// Nếu category đã persist không còn xuất hiện trong collection
    /// (ví dụ store file bị thay bởi collection khác), fallback về "all".
    /// Giá trị persist giữ nguyên: category quay lại qua import thì
    /// selection tự hiệu lực lại.
    pub fn effective_category<'a>(&'a self, store: &QuoteStore) -> &'a str {
        if self.selected_category == ALL_CATEGORIES {
            return ALL_CATEGORIES;
        }
        if store
            .categories()
            .contains(&self.selected_category.as_str())
        {
            &self.selected_category
        } else {
            ALL_CATEGORIES
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.selected_category, ALL_CATEGORIES);
        assert!(state.last_sync_at.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp = TempDir::new().unwrap();
        let state = AppState::load(temp.path());
        assert_eq!(state.selected_category, ALL_CATEGORIES);
    }

    #[test]
    fn test_selection_survives_reload() -> Result<()> {
        let temp = TempDir::new()?;

        let mut state = AppState::default();
        state.set_category("Motivation");
        state.save(temp.path())?;

        let reloaded = AppState::load(temp.path());
        assert_eq!(reloaded.selected_category, "Motivation");

        let store = QuoteStore::seeded();
        assert_eq!(reloaded.effective_category(&store), "Motivation");
        Ok(())
    }

    #[test]
    fn test_effective_category_falls_back_to_all() {
        let mut state = AppState::default();
        state.set_category("Vanished");

        let store = QuoteStore::seeded();
        assert_eq!(state.effective_category(&store), ALL_CATEGORIES);
        // Giá trị persist không bị ghi đè
        assert_eq!(state.selected_category, "Vanished");
    }

    #[test]
    fn test_mark_synced_sets_timestamp() {
        let mut state = AppState::default();
        state.mark_synced();
        assert!(state.last_sync_at.is_some());
    }

    #[test]
    fn test_load_invalid_json_gives_default() {
        let temp = TempDir::new().unwrap();
        std::fs::write(AppState::state_path(temp.path()), "garbage").unwrap();
        let state = AppState::load(temp.path());
        assert_eq!(state.selected_category, ALL_CATEGORIES);
    }
}

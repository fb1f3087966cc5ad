//! QuoteStore - Bộ sưu tập quotes lưu trong quotes.json.
//!
//! Collection là một flat JSON array của `{text, category}`, giữ nguyên
//! thứ tự insert. Không có id field: hai quotes bằng nhau khi text VÀ
//! category giống nhau. Toàn bộ collection được ghi lại ra disk sau mỗi
//! lần mutate (add, import, sync).

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::state::ALL_CATEGORIES;

/// Tên file chứa collection trong store directory
pub const QUOTES_FILE: &str = "quotes.json";

/// Lỗi validation khi thêm quote mới
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("quote text cannot be empty")]
    EmptyText,
    #[error("quote category cannot be empty")]
    EmptyCategory,
}

/// Một quote trong bộ sưu tập
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Nội dung quote
    pub text: String,
    /// Category của quote (ví dụ: "Motivation", "Life", "Server")
    pub category: String,
}

impl Quote {
    /// Tạo quote mới từ user input: trim cả hai fields, reject nếu rỗng
    pub fn new(text: &str, category: &str) -> Result<Self, StoreError> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        if category.is_empty() {
            return Err(StoreError::EmptyCategory);
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }
}

/// Bộ sưu tập quotes, giữ nguyên thứ tự insert
#[derive(Debug, Clone)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Tạo store với 3 quotes mặc định
    pub fn seeded() -> Self {
        let quotes = vec![
            Quote {
                text: "The best way to get started is to quit talking and begin doing.".to_string(),
                category: "Motivation".to_string(),
            },
            Quote {
                text: "Life is what happens when you're busy making other plans.".to_string(),
                category: "Life".to_string(),
            },
            Quote {
                text: "Do something today that your future self will thank you for.".to_string(),
                category: "Motivation".to_string(),
            },
        ];
        Self { quotes }
    }

    /// Đường dẫn đến quotes.json trong store directory
    pub fn quotes_path(store_dir: &Path) -> PathBuf {
        store_dir.join(QUOTES_FILE)
    }

    /// Load collection từ store directory.
    ///
    /// File chưa có hoặc không parse được đều cho ra seed collection,
    /// để lần save tiếp theo tự khởi tạo lại store.
    pub fn load(store_dir: &Path) -> Self {
        let path = Self::quotes_path(store_dir);
        if !path.exists() {
            return Self::seeded();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Quote>>(&content) {
                Ok(quotes) => Self { quotes },
                Err(e) => {
                    tracing::warn!("Cannot parse {}: {}, reseeding", path.display(), e);
                    Self::seeded()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read {}: {}, reseeding", path.display(), e);
                Self::seeded()
            }
        }
    }

    /// Lưu toàn bộ collection ra quotes.json (overwrite)
    pub fn save(&self, store_dir: &Path) -> Result<()> {
        fs::create_dir_all(store_dir)
            .with_context(|| format!("Cannot create store directory: {}", store_dir.display()))?;

        let path = Self::quotes_path(store_dir);
        let content = self.to_json()?;
        fs::write(&path, content)
            .with_context(|| format!("Cannot write quotes file: {}", path.display()))?;
        Ok(())
    }

    /// Serialize collection thành pretty-printed JSON array
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.quotes).context("Cannot serialize quotes to JSON")
    }

    /// Parse một JSON array của quotes (dùng cho import).
    /// Records được giữ nguyên như trong file, không trim.
    pub fn parse_json(content: &str) -> Result<Vec<Quote>> {
        serde_json::from_str::<Vec<Quote>>(content)
            .context("Invalid JSON file: expected an array of {text, category} records")
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Kiểm tra quote đã có trong collection chưa (so sánh text + category)
    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.contains(quote)
    }

    /// Thêm quote mới từ user input (trim + validate), trả về quote vừa thêm
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Quote, StoreError> {
        let quote = Quote::new(text, category)?;
        self.quotes.push(quote);
        Ok(self.quotes.last().expect("just pushed"))
    }

    /// Append records đã parse từ import file, giữ nguyên thứ tự.
    /// Không dedup: import trung thực với nội dung file.
    pub fn append(&mut self, quotes: Vec<Quote>) -> usize {
        let count = quotes.len();
        self.quotes.extend(quotes);
        count
    }

    /// Merge incoming quotes vào collection: chỉ thêm entries chưa có
    /// (so sánh text + category), giữ nguyên thứ tự của incoming.
    /// Trả về số quotes đã thêm.
    pub fn merge(&mut self, incoming: Vec<Quote>) -> usize {
        let mut added = 0;
        for quote in incoming {
            if !self.contains(&quote) {
                self.quotes.push(quote);
                added += 1;
            }
        }
        added
    }

    /// Danh sách categories theo thứ tự xuất hiện (không có sentinel "all")
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for quote in &self.quotes {
            if !categories.contains(&quote.category.as_str()) {
                categories.push(&quote.category);
            }
        }
        categories
    }

    /// Lọc quotes theo category ("all" trả về toàn bộ collection)
    pub fn filtered(&self, category: &str) -> Vec<&Quote> {
        if category == ALL_CATEGORIES {
            self.quotes.iter().collect()
        } else {
            self.quotes
                .iter()
                .filter(|q| q.category == category)
                .collect()
        }
    }

    /// Chọn ngẫu nhiên (uniform) một quote theo category.
    /// Trả về None nếu không có quote nào match.
    pub fn random(&self, category: &str) -> Option<&Quote> {
        let filtered = self.filtered(category);
        filtered.choose(&mut rand::thread_rng()).copied()
    }
}

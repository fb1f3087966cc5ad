//! Quote server integration - Fetch và merge quotes từ placeholder API.
//!
//! Server trả về JSON array của posts; mỗi post được map thành quote
//! với `title` làm text và category cố định "Server". Merge policy:
//! chỉ thêm entries chưa có trong collection (so sánh text + category),
//! local quotes không bao giờ bị xóa hay sắp xếp lại.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::storage::{AppState, Quote, QuoteStore};

/// Category gán cho mọi quote lấy từ server
pub const SERVER_CATEGORY: &str = "Server";

/// Một post từ placeholder API (các fields khác bị bỏ qua)
#[derive(Debug, Deserialize)]
struct ServerPost {
    title: String,
}

/// Nguồn quotes từ xa.
///
/// Trait seam để sync logic và scheduler test được mà không cần network.
pub trait QuoteSource {
    /// Tên của source (hiển thị trong log)
    fn name(&self) -> &'static str;

    /// Fetch tối đa `limit` quotes từ source
    fn fetch(&self, limit: usize) -> Result<Vec<Quote>>;
}

/// QuoteSource gọi placeholder API qua HTTP GET
pub struct PlaceholderApi {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl PlaceholderApi {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Map posts thành quotes với category "Server"
    fn map_posts(posts: Vec<ServerPost>, limit: usize) -> Vec<Quote> {
        posts
            .into_iter()
            .take(limit)
            .map(|post| Quote {
                text: post.title,
                category: SERVER_CATEGORY.to_string(),
            })
            .collect()
    }
}

impl QuoteSource for PlaceholderApi {
    fn name(&self) -> &'static str {
        "placeholder-api"
    }

    fn fetch(&self, limit: usize) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("User-Agent", "QuoteVault")
            .header("Accept", "application/json")
            .send()
            .with_context(|| format!("Failed to fetch quotes from {}", self.endpoint))?;

        if !response.status().is_success() {
            anyhow::bail!("Server error: {}", response.status());
        }

        let posts: Vec<ServerPost> = response.json().context("Failed to parse server response")?;

        Ok(Self::map_posts(posts, limit))
    }
}

/// Kết quả của một chu kỳ sync
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Số quotes fetch được từ server
    pub fetched: usize,
    /// Số quotes mới được thêm vào collection
    pub added: usize,
    /// Fetch thất bại (network hoặc parse error) - chu kỳ là no-op
    pub fetch_failed: bool,
}

/// Một chu kỳ sync: fetch từ source, merge vào collection, persist.
///
/// Fetch thất bại chỉ được log ở mức warn và chu kỳ trở thành no-op;
/// lỗi ghi disk vẫn propagate vì state local không còn đáng tin.
pub fn sync_once(
    source: &dyn QuoteSource,
    store: &mut QuoteStore,
    state: &mut AppState,
    store_dir: &Path,
    limit: usize,
) -> Result<SyncReport> {
    let incoming = match source.fetch(limit) {
        Ok(quotes) => quotes,
        Err(e) => {
            tracing::warn!("[{}] Fetch failed, skipping cycle: {:#}", source.name(), e);
            return Ok(SyncReport {
                fetch_failed: true,
                ..SyncReport::default()
            });
        }
    };

    let fetched = incoming.len();
    let added = store.merge(incoming);

    if added > 0 {
        store.save(store_dir)?;
    }

    state.mark_synced();
    state.save(store_dir)?;

    tracing::debug!(
        "[{}] Sync cycle done: fetched {}, added {}",
        source.name(),
        fetched,
        added
    );

    Ok(SyncReport {
        fetched,
        added,
        fetch_failed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct StubSource {
        quotes: Vec<Quote>,
        fail: bool,
    }

    impl QuoteSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn fetch(&self, limit: usize) -> Result<Vec<Quote>> {
            if self.fail {
                anyhow::bail!("stub network down");
            }
            Ok(self.quotes.iter().take(limit).cloned().collect())
        }
    }

    fn server_quote(text: &str) -> Quote {
        Quote {
            text: text.to_string(),
            category: SERVER_CATEGORY.to_string(),
        }
    }

    #[test]
    fn test_map_posts_takes_limit_and_assigns_category() {
        let posts = vec![
            ServerPost {
                title: "first".to_string(),
            },
            ServerPost {
                title: "second".to_string(),
            },
            ServerPost {
                title: "third".to_string(),
            },
        ];
        let quotes = PlaceholderApi::map_posts(posts, 2);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "first");
        assert!(quotes.iter().all(|q| q.category == SERVER_CATEGORY));
    }

    #[test]
    fn test_server_post_parse_ignores_extra_fields() {
        let raw = r#"[{"userId": 1, "id": 1, "title": "hello", "body": "..."}]"#;
        let posts: Vec<ServerPost> = serde_json::from_str(raw).unwrap();
        assert_eq!(posts[0].title, "hello");
    }

    #[test]
    fn test_sync_once_appends_only_missing() -> Result<()> {
        let temp = TempDir::new()?;
        let mut store = QuoteStore::seeded();
        let mut state = AppState::default();

        let source = StubSource {
            quotes: vec![server_quote("from server"), server_quote("from server")],
            fail: false,
        };

        // Quote trùng nhau trong batch: chỉ thêm một lần
        let report = sync_once(&source, &mut store, &mut state, temp.path(), 5)?;
        assert_eq!(report.fetched, 2);
        assert_eq!(report.added, 1);
        assert!(state.last_sync_at.is_some());

        // Chu kỳ thứ hai là no-op về data
        let report = sync_once(&source, &mut store, &mut state, temp.path(), 5)?;
        assert_eq!(report.added, 0);
        assert_eq!(store.len(), 4);

        // Collection đã persist
        let reloaded = QuoteStore::load(temp.path());
        assert_eq!(reloaded.len(), 4);
        Ok(())
    }

    #[test]
    fn test_sync_once_fetch_failure_is_noop() -> Result<()> {
        let temp = TempDir::new()?;
        let mut store = QuoteStore::seeded();
        let mut state = AppState::default();

        let source = StubSource {
            quotes: Vec::new(),
            fail: true,
        };

        let report = sync_once(&source, &mut store, &mut state, temp.path(), 5)?;
        assert!(report.fetch_failed);
        assert_eq!(report.added, 0);
        assert_eq!(store.len(), 3);
        assert!(state.last_sync_at.is_none());
        Ok(())
    }

    #[test]
    fn test_sync_once_respects_limit() -> Result<()> {
        let temp = TempDir::new()?;
        let mut store = QuoteStore::seeded();
        let mut state = AppState::default();

        let source = StubSource {
            quotes: (0..10).map(|i| server_quote(&format!("q{}", i))).collect(),
            fail: false,
        };

        let report = sync_once(&source, &mut store, &mut state, temp.path(), 5)?;
        assert_eq!(report.fetched, 5);
        assert_eq!(report.added, 5);
        Ok(())
    }
}

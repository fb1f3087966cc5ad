//! Storage module - Quản lý bộ sưu tập quotes và state trên disk.
//!
//! Module này chứa:
//! - QuoteStore: collection các quotes, lưu dưới dạng flat JSON array
//! - AppState: category đang chọn và thời gian sync cuối
//! - Các hàm tiện ích để quản lý store directory

pub mod quotes;
pub mod state;

pub use quotes::{Quote, QuoteStore, StoreError};
pub use state::{AppState, ALL_CATEGORIES};

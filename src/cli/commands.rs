//! Command implementations cho QuoteVault CLI.
//!
//! Mỗi command load collection và state từ store directory, gọi các
//! operations trên QuoteStore rồi in kết quả. Mọi render đều nằm ở
//! đây: storage layer không in gì cả.

use crate::config::Config;
use crate::storage::{AppState, Quote, QuoteStore, ALL_CATEGORIES};
use crate::sync::scheduler::Scheduler;
use crate::sync::{sync_once, PlaceholderApi, SyncReport};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Message cố định khi category không có quote nào
const NO_QUOTES_MESSAGE: &str = "No quotes available for this category.";

/// In một quote: text đậm, category mờ phía sau
fn print_quote(quote: &Quote) {
    println!(
        "\"{}\" {}",
        quote.text.white().bold(),
        format!("[{}]", quote.category).dimmed()
    );
}

/// Render một quote ngẫu nhiên theo category (hoặc empty message)
fn render_random(store: &QuoteStore, category: &str) {
    match store.random(category) {
        Some(quote) => print_quote(quote),
        None => println!("{}", NO_QUOTES_MESSAGE.yellow()),
    }
}

/// Hiển thị một quote ngẫu nhiên từ category đang chọn
pub fn show(config: &Config, category: Option<&str>) -> Result<()> {
    let store_dir = config.store_dir();
    let store = QuoteStore::load(store_dir);
    let state = AppState::load(store_dir);

    // Flag --category chỉ override cho lần chạy này, không persist
    let category = match category {
        Some(c) => c,
        None => state.effective_category(&store),
    };

    render_random(&store, category);
    Ok(())
}

/// Thêm quote mới (trim + validate), persist rồi in lại quote vừa thêm
pub fn add(config: &Config, text: &str, category: &str) -> Result<()> {
    let store_dir = config.store_dir();
    let mut store = QuoteStore::load(store_dir);

    let quote = match store.add(text, category) {
        Ok(q) => q.clone(),
        // Validation failure: collection không đổi, không ghi gì ra disk
        Err(e) => bail!("{}", e),
    };
    store.save(store_dir)?;

    println!("  {} Added quote:", "✓".green());
    print_quote(&quote);
    Ok(())
}

/// Liệt kê categories ("all" sentinel đứng đầu, selection được đánh dấu)
pub fn categories(config: &Config) -> Result<()> {
    let store_dir = config.store_dir();
    let store = QuoteStore::load(store_dir);
    let state = AppState::load(store_dir);
    let selected = state.effective_category(&store).to_string();

    println!("{}", "Categories:".cyan().bold());
    for name in std::iter::once(ALL_CATEGORIES).chain(store.categories()) {
        let count = store.filtered(name).len();
        let marker = if name == selected { "*".green() } else { " ".normal() };
        println!(
            "  {} {} {}",
            marker,
            name.white().bold(),
            format!("[{} quotes]", count).dimmed()
        );
    }
    Ok(())
}

/// Set category filter, persist rồi render theo filter mới
pub fn filter(config: &Config, category: &str) -> Result<()> {
    let store_dir = config.store_dir();
    let store = QuoteStore::load(store_dir);

    if category != ALL_CATEGORIES && !store.categories().contains(&category) {
        bail!(
            "Unknown category '{}'. Available: all, {}",
            category,
            store.categories().join(", ")
        );
    }

    let mut state = AppState::load(store_dir);
    state.set_category(category);
    state.save(store_dir)?;

    println!("  {} Filter set to {}", "✓".green(), category.cyan());
    render_random(&store, category);
    Ok(())
}

/// Export toàn bộ collection ra một file JSON
pub fn export(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let store = QuoteStore::load(config.store_dir());
    let path = output.unwrap_or_else(|| PathBuf::from("quotes.json"));

    let content = store.to_json()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Cannot write export file: {}", path.display()))?;

    println!(
        "  {} Exported {} quotes to {}",
        "✓".green(),
        store.len().to_string().cyan(),
        path.display()
    );
    Ok(())
}

/// Import quotes từ file JSON, append vào collection
pub fn import(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Cannot read import file: {}", file.display()))?;

    // Parse trước khi load store: file hỏng thì state không đổi
    let imported = QuoteStore::parse_json(&content)?;

    let store_dir = config.store_dir();
    let mut store = QuoteStore::load(store_dir);
    let state = AppState::load(store_dir);
    let count = store.append(imported);
    store.save(store_dir)?;

    println!(
        "  {} Imported {} quotes from {}",
        "✓".green(),
        count.to_string().cyan(),
        file.display()
    );
    render_random(&store, state.effective_category(&store));
    Ok(())
}

/// In kết quả một chu kỳ sync
fn print_sync_report(report: &SyncReport) {
    if report.fetch_failed {
        println!("  {} Server unreachable, nothing synced", "!".yellow());
    } else if report.added > 0 {
        println!(
            "  {} Quotes updated from server! ({} new)",
            "✓".green(),
            report.added.to_string().cyan()
        );
    } else {
        println!(
            "  {} Already up to date ({} fetched)",
            "✓".green(),
            report.fetched
        );
    }
}

/// Một chu kỳ sync với quote server
pub fn sync(config: &Config) -> Result<()> {
    let store_dir = config.store_dir();
    let mut store = QuoteStore::load(store_dir);
    let mut state = AppState::load(store_dir);
    let source = PlaceholderApi::new(&config.sync.endpoint);

    println!("{}", "Syncing quotes with server...".cyan());
    let report = sync_once(
        &source,
        &mut store,
        &mut state,
        store_dir,
        config.sync.batch_size,
    )?;
    print_sync_report(&report);
    Ok(())
}

/// Sync định kỳ cho đến khi bị kill (hoặc hết --count chu kỳ)
pub fn watch(config: &Config, interval: Option<u64>, count: Option<u64>) -> Result<()> {
    let interval_secs = interval.unwrap_or(config.sync.interval_secs);
    if interval_secs == 0 {
        bail!("Sync interval must be at least 1 second");
    }

    let store_dir = config.store_dir();
    let mut store = QuoteStore::load(store_dir);
    let mut state = AppState::load(store_dir);
    let source = PlaceholderApi::new(&config.sync.endpoint);

    println!(
        "{} every {}s (Ctrl-C to stop)",
        "Watching quote server".cyan().bold(),
        interval_secs.to_string().cyan()
    );

    let scheduler = Scheduler::new(Duration::from_secs(interval_secs), config.sync.batch_size);
    let completed = scheduler.run(
        &source,
        &mut store,
        &mut state,
        store_dir,
        count,
        print_sync_report,
    )?;

    println!(
        "\n{} {} sync cycle(s) completed",
        "Done.".green().bold(),
        completed.to_string().cyan()
    );
    Ok(())
}

/// Hiển thị trạng thái store, collection và lần sync cuối
pub fn status(config: &Config) -> Result<()> {
    let store_dir = config.store_dir();
    let store = QuoteStore::load(store_dir);
    let state = AppState::load(store_dir);

    println!("{}", "QuoteVault Status".cyan().bold());
    println!("  Store:      {}", store_dir.display().to_string().dimmed());
    println!("  Quotes:     {}", store.len().to_string().cyan());
    println!("  Categories: {}", store.categories().len().to_string().cyan());
    println!(
        "  Filter:     {}",
        state.effective_category(&store).cyan()
    );
    match &state.last_sync_at {
        Some(t) => println!("  Last sync:  {}", t.to_rfc3339().dimmed()),
        None => println!("  Last sync:  {}", "never".dimmed()),
    }
    Ok(())
}

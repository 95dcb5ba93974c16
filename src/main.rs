//! BoardVault console demo.
//!
//! Runs the board against an in-memory database and prints what a UI would
//! render after each step. The real front end talks to `boardvault-rpc`.

use anyhow::Context;

use boardvault::app::App;
use boardvault::database::Database;
use boardvault::logging;
use boardvault::managers::record_board::PasteOutcome;
use boardvault::services::settings_engine::SettingsEngine;
use boardvault::types::record::{FilterTag, Page, RecordForm};

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_page(page: &Page) {
    if page.items.is_empty() {
        println!("  (board is empty)");
    }
    for r in &page.items {
        let description = if r.description.is_empty() { "---" } else { &r.description };
        println!("  {:<24} #{:<10} {}", r.title, r.category, description);
    }
    if page.show_controls {
        println!(
            "  page {}/{}  prev:{} next:{}",
            page.page, page.total_pages, page.has_previous, page.has_next
        );
    }
    println!();
}

fn form(title: &str, category: &str, url: &str, description: &str) -> RecordForm {
    RecordForm {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let db = Database::open_in_memory()?;
    let mut app = App::with_database(SettingsEngine::new(None), db);
    app.startup().await;

    section("Adding records");
    let samples = [
        ("API sketch", "ideas", "https://example.com/api", "Endpoints and payloads"),
        ("Landing page", "design", "https://example.com/landing", ""),
        ("Onboarding flow", "design", "https://example.com/onboarding", "First-run screens"),
        ("Rate limits", "ideas", "https://example.com/limits", "Per-workspace quotas"),
        ("Schema v2", "backend", "https://example.com/schema", ""),
        ("Retry policy", "backend", "https://example.com/retry", "Backoff notes"),
        ("Icon set", "design", "https://example.com/icons", ""),
    ];
    for (title, category, url, description) in samples {
        app.board.open_new();
        app.board.update_form(form(title, category, url, description));
        app.board.submit().await?;
    }
    println!("  categories: {:?}", app.board.categories());
    print_page(&app.board.view());

    section("Second page");
    app.board.next_page();
    print_page(&app.board.view());

    section("Filter: design, search \"page\"");
    app.board.set_filter(FilterTag::Category("design".to_string()));
    app.board.set_search("page");
    print_page(&app.board.view());

    section("Archive and trash view");
    let id = app
        .board
        .visible()
        .first()
        .map(|r| r.id.clone())
        .context("nothing matched the design filter")?;
    app.board.archive(&id, true).await?;
    app.board.set_search("");
    app.board.set_filter(FilterTag::Archived);
    print_page(&app.board.view());

    section("Paste url from clipboard");
    app.board.set_filter(FilterTag::All);
    let target = app
        .board
        .visible()
        .first()
        .map(|r| r.id.clone())
        .context("board is empty")?;
    app.clipboard.set_text(Some("hello world".to_string()));
    let outcome = app.board.paste_url_from_clipboard(&target).await?;
    println!("  {:?}: {:?}", outcome, app.board.toast().map(|t| &t.message));
    app.clipboard.set_text(Some("https://example.com/new".to_string()));
    let outcome = app.board.paste_url_from_clipboard(&target).await?;
    if outcome == PasteOutcome::Updated {
        println!("  url now {}", app.board.record(&target).map(|r| r.url.as_str()).unwrap_or(""));
    }
    println!();

    section("Delete from trash");
    let deleted = app
        .board
        .delete(&id, |prompt| {
            println!("  {} yes", prompt);
            true
        })
        .await?;
    println!("  deleted: {}", deleted);
    app.board.set_filter(FilterTag::Archived);
    print_page(&app.board.view());

    Ok(())
}

//! `fridgekit` command line entry point: load the workspace and print it.

use std::sync::Arc;

use anyhow::Context;

use fridgekit_client::{
    AuthState, ChannelSink, ClientConfig, FridgeView, HttpInventoryApi, ItemStore, StaticToken,
};
use fridgekit_inventory::Item;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fridgekit_observability::init();

    let config = ClientConfig::from_env().context("reading configuration")?;
    tracing::info!(api_url = %config.api_url, logged_in = config.auth_token.is_some(), "starting");

    let auth = AuthState::new(config.auth_token.is_some());
    let tokens = Arc::new(StaticToken::new(config.auth_token.clone()));
    let (notifier, mut notices) = ChannelSink::new(config.notice_duration);
    let printer = tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            tracing::info!(notice = %notice.message, dismiss_at = %notice.dismiss_at, "notice");
            println!("! {}", notice.message);
        }
    });
    let api = HttpInventoryApi::new(&config, tokens).context("building HTTP client")?;

    let store = ItemStore::new(Arc::new(api), Arc::new(notifier), auth);
    store.load().await;

    let snapshot = store.snapshot();
    drop(store);
    printer.await.context("draining notices")?;

    let mut view = FridgeView::new();
    view.toggle_door();

    for shelf in view.shelves(&snapshot) {
        println!("[{}] {}", shelf.chamber.title(), shelf.title);
        print_items(&shelf.items);
    }

    println!("[Cart]");
    for (category, items) in snapshot.cart_by_category() {
        println!("  {} {}", category.icon(), category.title());
        print_items(&items);
    }

    Ok(())
}

fn print_items(items: &[&Item]) {
    if items.is_empty() {
        println!("    (empty)");
    }
    for item in items {
        println!("    {} {} x{}", item.icon(), item.name(), item.quantity());
    }
}

//! Renders the dashboard into a `TestBackend` while the price feed runs.

mod common;

use ratatui::{Terminal, backend::TestBackend};
use rust_decimal_macros::dec;

use privitrade::feed::{PriceFeed, SnapshotOrigin};
use privitrade::store::SelectionStore;
use privitrade::tui::{App, render};

use common::{NO_REPEAT, TableSource, snapshot, wait_for_state};

fn draw(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| render(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn switching_instrument_never_shows_previous_price() {
    let store = SelectionStore::with_default_catalog().unwrap();
    let source = TableSource::new(&[("BTC", snapshot(dec!(64000)))]);
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();
    wait_for_state(&mut rx, |s| s.is_live()).await;

    let mut app = App::new(store, feed.subscribe());
    let before = draw(&app);
    assert!(before.contains("Bitcoin"));
    assert!(before.contains("64,000"));

    app.select_instrument(1);
    let after = draw(&app);

    assert!(after.contains("Ethereum"));
    assert!(!after.contains("64,000"), "ETH header drawn with BTC price");
    assert!(!after.contains("64,001"));
}

#[tokio::test]
async fn placeholder_is_marked_until_feed_catches_up() {
    let store = SelectionStore::with_default_catalog().unwrap();
    let source = TableSource::new(&[
        ("BTC", snapshot(dec!(64000))),
        ("ETH", snapshot(dec!(3120))),
    ]);
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();
    wait_for_state(&mut rx, |s| s.is_live()).await;

    let mut app = App::new(store, feed.subscribe());
    app.select_instrument(1);
    assert_eq!(app.price_state().symbol, "ETH");
    assert_ne!(app.price_state().origin, SnapshotOrigin::Live);

    wait_for_state(&mut rx, |s| s.symbol == "ETH" && s.is_live()).await;
    let frame = draw(&app);

    assert!(frame.contains("3,120"));
    assert!(!frame.contains("[loading]"));
}

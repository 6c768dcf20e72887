//! Price feed synchronizer behavior: polling, fallback, cancellation and
//! stale-response handling.

mod common;

use std::time::Duration;

use rust_decimal_macros::dec;

use privitrade::PriviTradeError;
use privitrade::feed::{PriceFeed, SnapshotOrigin};
use privitrade::models::{Instrument, PriceSnapshot};
use privitrade::store::SelectionStore;

use common::{NO_REPEAT, TableSource, gated, next_fetch, snapshot, wait_for_state};

fn btc_eth_store() -> SelectionStore {
    SelectionStore::new(vec![
        Instrument::new("Bitcoin", "BTC", "/icons/btc.svg"),
        Instrument::new("Ethereum", "ETH", "/icons/eth.svg"),
    ])
    .unwrap()
}

#[tokio::test]
async fn publishes_placeholder_before_first_fetch() {
    let store = btc_eth_store();
    let (source, _requests) = gated();
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);

    let state = feed.current();
    assert_eq!(state.symbol, "BTC");
    assert_eq!(state.origin, SnapshotOrigin::Pending);
    assert_eq!(state.snapshot, PriceSnapshot::fallback());
    assert!(state.updated_at.is_none());
}

#[tokio::test]
async fn first_fetch_is_immediate() {
    let store = btc_eth_store();
    let source = TableSource::new(&[("BTC", snapshot(dec!(64000)))]);
    let feed = PriceFeed::spawn(&store, source.clone(), NO_REPEAT);

    let mut rx = feed.subscribe();
    let state = wait_for_state(&mut rx, |s| s.origin == SnapshotOrigin::Live).await;

    assert_eq!(state.symbol, "BTC");
    assert_eq!(state.snapshot, snapshot(dec!(64000)));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn failed_fetches_show_the_fixed_fallback() {
    let store = btc_eth_store();
    let source = TableSource::new(&[]);
    let feed = PriceFeed::spawn(&store, source, Duration::from_millis(10));

    let mut rx = feed.subscribe();
    let first = wait_for_state(&mut rx, |s| s.consecutive_failures >= 1).await;
    let second = wait_for_state(&mut rx, |s| s.consecutive_failures >= 2).await;

    assert_eq!(first.origin, SnapshotOrigin::Fallback);
    assert_eq!(second.origin, SnapshotOrigin::Fallback);
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(
        second.snapshot,
        PriceSnapshot {
            price: dec!(47382.51),
            price_change: dec!(2.34),
            mark_price: dec!(47385.12),
            index_price: dec!(47380.98),
            volume_24h: dec!(1234567890),
        }
    );
}

#[tokio::test]
async fn repeats_on_the_poll_period() {
    let store = btc_eth_store();
    let (source, mut requests) = gated();
    let feed = PriceFeed::spawn(&store, source, Duration::from_millis(10));
    let mut rx = feed.subscribe();

    let first = next_fetch(&mut requests).await;
    assert!(first.resolve(Ok(snapshot(dec!(100)))));
    wait_for_state(&mut rx, |s| s.snapshot == snapshot(dec!(100))).await;

    let second = next_fetch(&mut requests).await;
    assert_eq!(second.symbol, "BTC");
    assert!(second.resolve(Ok(snapshot(dec!(200)))));
    let state = wait_for_state(&mut rx, |s| s.snapshot.price == dec!(200)).await;

    // Replaced as a whole: no field survives from the first response.
    assert_eq!(state.snapshot, snapshot(dec!(200)));
}

#[tokio::test]
async fn selection_change_cancels_old_cycle_and_polls_new_instrument() {
    let store = btc_eth_store();
    let (source, mut requests) = gated();
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();

    let btc = next_fetch(&mut requests).await;
    assert_eq!(btc.symbol, "BTC");

    store.set_selected_index(1).unwrap();

    let eth = next_fetch(&mut requests).await;
    assert_eq!(eth.symbol, "ETH");

    // The BTC cycle was dropped, so nobody is listening for its answer.
    assert!(!btc.resolve(Ok(snapshot(dec!(64000)))));

    assert!(eth.resolve(Ok(snapshot(dec!(3100)))));
    let state = wait_for_state(&mut rx, |s| s.origin == SnapshotOrigin::Live).await;
    assert_eq!(state.symbol, "ETH");
    assert_eq!(state.generation, 1);
    assert_eq!(state.snapshot, snapshot(dec!(3100)));
}

#[tokio::test]
async fn late_response_never_overwrites_new_selection() {
    let store = btc_eth_store();
    let (source, mut requests) = gated();
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();

    let btc = next_fetch(&mut requests).await;
    store.set_selected_index(1).unwrap();
    let eth = next_fetch(&mut requests).await;

    eth.resolve(Ok(snapshot(dec!(3100))));
    wait_for_state(&mut rx, |s| s.symbol == "ETH" && s.is_live()).await;

    btc.resolve(Ok(snapshot(dec!(64000))));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let state = feed.current();
    assert_eq!(state.symbol, "ETH");
    assert_eq!(state.snapshot, snapshot(dec!(3100)));
}

#[tokio::test]
async fn switching_discards_previous_snapshot() {
    let store = btc_eth_store();
    let source = TableSource::new(&[("BTC", snapshot(dec!(64000)))]);
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();

    wait_for_state(&mut rx, |s| s.is_live()).await;
    store.set_selected_index(1).unwrap();

    // ETH has no price in the table, so it ends on the fallback rather
    // than keeping BTC's numbers.
    let state = wait_for_state(&mut rx, |s| {
        s.symbol == "ETH" && s.origin == SnapshotOrigin::Fallback
    })
    .await;
    assert_eq!(state.snapshot, PriceSnapshot::fallback());
    assert_eq!(state.consecutive_failures, 1);
}

#[tokio::test]
async fn reselecting_current_instrument_keeps_cycle() {
    let store = btc_eth_store();
    let (source, mut requests) = gated();
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);
    let mut rx = feed.subscribe();

    let btc = next_fetch(&mut requests).await;
    store.set_selected_index(0).unwrap();

    assert!(btc.resolve(Ok(snapshot(dec!(64000)))));
    let state = wait_for_state(&mut rx, |s| s.is_live()).await;
    assert_eq!(state.generation, 0);
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn failure_then_recovery() {
    let store = btc_eth_store();
    let (source, mut requests) = gated();
    let feed = PriceFeed::spawn(&store, source, Duration::from_millis(10));
    let mut rx = feed.subscribe();

    next_fetch(&mut requests)
        .await
        .resolve(Err(PriviTradeError::Io("connection reset".to_string())));
    wait_for_state(&mut rx, |s| s.origin == SnapshotOrigin::Fallback).await;

    next_fetch(&mut requests).await.resolve(Ok(snapshot(dec!(65000))));
    let state = wait_for_state(&mut rx, |s| s.is_live()).await;
    assert_eq!(state.consecutive_failures, 0);
    assert_eq!(state.snapshot, snapshot(dec!(65000)));
}

#[tokio::test]
async fn shutdown_stops_polling() {
    let store = btc_eth_store();
    let source = TableSource::new(&[("BTC", snapshot(dec!(64000)))]);
    let mut feed = PriceFeed::spawn(&store, source.clone(), Duration::from_millis(5));

    tokio::time::timeout(common::WAIT, async {
        while source.calls() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("feed never polled twice");

    feed.shutdown().await;
    assert!(!feed.is_running());

    let calls = source.calls();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(source.calls(), calls);
}

#[tokio::test]
async fn dropping_the_store_stops_the_feed() {
    let store = btc_eth_store();
    let (source, _requests) = gated();
    let feed = PriceFeed::spawn(&store, source, NO_REPEAT);

    drop(store);

    tokio::time::timeout(common::WAIT, async {
        while feed.is_running() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("feed kept running without a store");
}

use std::fs::File;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{info, warn};

use privitrade::config::{AppConfig, fetch_config};
use privitrade::feed::{HttpPriceSource, PriceFeed};
use privitrade::order_entry::{OrderExecutor, PaperExecutor};
use privitrade::store::SelectionStore;
use privitrade::tui::event::{spawn_event_reader, spawn_price_watcher, spawn_tick_timer, update};
use privitrade::tui::{Action, App, Tui, render, restore_terminal, setup_terminal};
use privitrade::{PriviTradeError, Result};

/// UI tick period; drives notice expiry.
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = fetch_config()?;
    init_tracing(&app_config)?;

    let store = SelectionStore::with_default_catalog()?;
    let poll_interval = app_config.api.poll_interval;
    let source = HttpPriceSource::new(&app_config.api.base_url, poll_interval)?;
    let mut feed = PriceFeed::spawn(&store, source, poll_interval);
    info!(
        base_url = %app_config.api.base_url,
        ?poll_interval,
        "Price feed started"
    );

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, App::new(store, feed.subscribe())).await;
    restore_terminal(&mut terminal)?;

    feed.shutdown().await;
    result
}

/// Sends tracing output to the configured log file, if any.
///
/// Nothing is written to the terminal; it belongs to the UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if let Some(path) = &config.log_file {
        let file = File::create(path).map_err(|e| {
            PriviTradeError::Io(format!(
                "failed to create log file {}: {e}",
                path.display()
            ))
        })?;
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Runs the event loop until the user quits.
async fn run(terminal: &mut Tui, mut app: App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);
    spawn_price_watcher(app.price.clone(), tx);

    let mut executor = PaperExecutor::new();

    draw(terminal, &app)?;
    while let Some(message) = rx.recv().await {
        if let Some(action) = update(&mut app, message) {
            handle_action(&mut app, action, &mut executor);
        }
        if app.should_quit {
            break;
        }
        draw(terminal, &app)?;
    }

    info!("Dashboard closed");
    Ok(())
}

fn draw(terminal: &mut Tui, app: &App) -> Result<()> {
    terminal
        .draw(|frame| render(frame, app))
        .map_err(|e| PriviTradeError::Io(format!("failed to draw: {e}")))?;
    Ok(())
}

fn handle_action<E: OrderExecutor>(app: &mut App, action: Action, executor: &mut E) {
    match action {
        Action::SubmitOrder => {
            let instrument = app.store.selected_instrument();
            match app.order.submit(&instrument, executor) {
                Ok(ticket) => app.show_info(format!(
                    "{} {} {} order submitted",
                    ticket.order_type.label(),
                    ticket.position.label(),
                    ticket.symbol
                )),
                Err(e) => {
                    warn!(symbol = %instrument.symbol, error = %e, "Order rejected");
                    app.show_error(e.to_string());
                }
            }
        }
    }
}

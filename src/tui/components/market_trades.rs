//! Recent market trades panel.
//!
//! The rows are a fixed sample; no trade feed exists yet.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
};

/// One printed trade.
struct Trade {
    size: &'static str,
    time: &'static str,
    price: &'static str,
    is_buy: bool,
}

const SAMPLE_TRADES: [Trade; 5] = [
    Trade { size: "0.00103012", time: "2/10 05:59", price: "97,075.4", is_buy: false },
    Trade { size: "0.00102960", time: "2/10 05:56", price: "97,125.0", is_buy: false },
    Trade { size: "0.00154341", time: "2/10 05:55", price: "97,187.1", is_buy: false },
    Trade { size: "0.00102778", time: "2/10 05:48", price: "97,199.5", is_buy: true },
    Trade { size: "0.00102830", time: "2/10 05:36", price: "97,149.9", is_buy: true },
];

/// Renders the trades table with size colored by aggressor side.
pub fn render(frame: &mut Frame, area: Rect) {
    let muted = Style::default().fg(Color::DarkGray);

    let header = Row::new(vec![
        Cell::from("SIZE"),
        Cell::from("TIME"),
        Cell::from(Line::from("PRICE").right_aligned()),
    ])
    .style(muted);

    let rows = SAMPLE_TRADES.iter().map(|trade| {
        let side = if trade.is_buy { Color::Green } else { Color::Red };
        Row::new(vec![
            Cell::from(trade.size).style(Style::default().fg(side)),
            Cell::from(trade.time).style(muted),
            Cell::from(Line::from(trade.price).right_aligned()),
        ])
    });

    let block = Block::default()
        .title(" Market Trades ")
        .title(Line::from(" 24H ").right_aligned())
        .borders(Borders::ALL)
        .border_style(muted);

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

//! Market overview header for the selected instrument.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::feed::SnapshotOrigin;
use crate::tui::app::App;
use crate::tui::format::{format_change, format_grouped};

/// Renders symbol, name, price, 24h change and market details.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let selection = app.selection();
    let instrument = selection.selected();
    let state = app.price_for(&selection);
    let snapshot = &state.snapshot;

    let change_color = if snapshot.is_up() {
        Color::Green
    } else {
        Color::Red
    };

    let mut header = vec![
        Span::styled(
            format!(" {} ", instrument.symbol),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            instrument.name.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    match state.origin {
        SnapshotOrigin::Live => {}
        SnapshotOrigin::Pending => header.push(Span::styled(
            "  [loading]",
            Style::default().fg(Color::DarkGray),
        )),
        SnapshotOrigin::Fallback => header.push(Span::styled(
            "  [sample data]",
            Style::default().fg(Color::Yellow),
        )),
    }

    let price_line = Line::from(vec![
        Span::styled(
            format!(" {} ", format_grouped(snapshot.price)),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_change(snapshot.price_change),
            Style::default().fg(change_color),
        ),
    ]);

    let label = Style::default().fg(Color::DarkGray);
    let details = Line::from(vec![
        Span::styled(" Mark Price ", label),
        Span::raw(format!("{}   ", format_grouped(snapshot.mark_price))),
        Span::styled("Index Price ", label),
        Span::raw(format!("{}   ", format_grouped(snapshot.index_price))),
        Span::styled("Volume (24h) ", label),
        Span::raw(format_grouped(snapshot.volume_24h)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let para = Paragraph::new(vec![Line::from(header), price_line, details]).block(block);
    frame.render_widget(para, area);
}

//! Instrument list.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Focus};

/// Renders the sidebar with the catalog and the current selection.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Sidebar;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(" PriviTrade ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selection = app.selection();
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Trades",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (i, instrument) in selection.instruments.iter().enumerate() {
        let is_selected = i == selection.selected_index;
        let style = if is_selected && is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let marker = if is_selected { "▸" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{marker} {} {:<6}", i + 1, instrument.symbol),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::feed::SnapshotOrigin;
use crate::tui::app::{App, NoticeKind};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.price_state();

    let feed_color = match state.origin {
        SnapshotOrigin::Live => Color::Green,
        SnapshotOrigin::Pending => Color::Gray,
        SnapshotOrigin::Fallback => Color::Yellow,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.mode.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            format!(" {} {} ", state.symbol, state.origin.label()),
            Style::default().fg(feed_color),
        ),
    ];

    if state.consecutive_failures > 0 {
        spans.push(Span::styled(
            format!("({} failed) ", state.consecutive_failures),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::raw("│"));

    if let Some(ref notice) = app.notice {
        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        spans.push(Span::styled(
            format!(" {} ", notice.message),
            Style::default().fg(color),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

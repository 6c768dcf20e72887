//! Order entry panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::order_entry::Position;
use crate::tui::app::{App, Focus, Mode};

/// Width of the label column in front of each field value.
const LABEL_WIDTH: usize = 12;

/// Width of the buying-power bar in cells.
const BAR_WIDTH: usize = 20;

/// Renders the long/short tabs, fields, slider and confirm button.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Order ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = app.order.draft();
    let symbol = app.selection().selected().symbol.clone();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = None;

    lines.push(position_tabs(app));
    lines.push(Line::from(""));

    for (focus, label, value, placeholder) in [
        (Focus::Price, "Price", draft.price_input.as_str(), ""),
        (
            Focus::CryptoAmount,
            symbol.as_str(),
            draft.crypto_amount.as_str(),
            symbol.as_str(),
        ),
        (Focus::UsdAmount, "USD", draft.usd_amount.as_str(), "USD"),
    ] {
        if app.focus == focus && app.mode == Mode::Insert {
            cursor_row = Some(lines.len());
        }
        lines.push(text_field(app, focus, label, value, placeholder));

        if focus == Focus::Price {
            lines.push(field_line(
                app,
                Focus::OrderType,
                "Order Type",
                Span::raw(format!("< {} >", draft.order_type.label())),
            ));
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(""));
    let filled = usize::from(draft.buying_power_percentage) * BAR_WIDTH / 100;
    lines.push(field_line(
        app,
        Focus::BuyingPower,
        "Buying Power",
        Span::styled(
            format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled)),
            Style::default().fg(Color::Cyan),
        ),
    ));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH + 2)),
        Span::styled(
            format!("{}  ≈ $-", app.order.buying_power_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(confirm_button(app));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(row) = cursor_row {
        let x = inner.x + (LABEL_WIDTH + 3 + app.editor.cursor_width()) as u16;
        let y = inner.y + row as u16;
        if y < inner.bottom() && x < inner.right() {
            frame.set_cursor_position((x, y));
        }
    }
}

/// Builds a `"▸ Label        value"` row, highlighted when focused.
fn field_line<'a>(app: &App, focus: Focus, label: &str, value: Span<'a>) -> Line<'a> {
    let is_focused = app.focus == focus;
    let marker = if is_focused { "▸" } else { " " };
    let label_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(format!("{marker} {label:<width$}", width = LABEL_WIDTH), label_style),
        value,
    ])
}

fn text_field<'a>(
    app: &App,
    focus: Focus,
    label: &str,
    value: &str,
    placeholder: &str,
) -> Line<'a> {
    let span = if value.is_empty() {
        Span::styled(format!("[{placeholder}]"), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(format!("[{value}]"))
    };
    field_line(app, focus, label, span)
}

fn position_tabs(app: &App) -> Line<'static> {
    let current = app.order.draft().position;
    let is_focused = app.focus == Focus::Position;

    let tab = |position: Position, active_bg: Color| {
        let mut style = if position == current {
            Style::default()
                .fg(Color::Black)
                .bg(active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if is_focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Span::styled(format!("  {}  ", position.label()), style)
    };

    let marker = if is_focused { "▸ " } else { "  " };
    Line::from(vec![
        Span::raw(marker),
        tab(Position::Long, Color::Green),
        Span::raw(" "),
        tab(Position::Short, Color::Red),
    ])
}

fn confirm_button(app: &App) -> Line<'static> {
    let bg = match app.order.draft().position {
        Position::Long => Color::Green,
        Position::Short => Color::Red,
    };
    let mut style = Style::default().fg(Color::Black).bg(bg);
    if app.focus == Focus::Confirm {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let label = if app.mode == Mode::Confirm {
        format!("  {}? [y/n]  ", app.order.confirm_label())
    } else {
        format!("  {}  ", app.order.confirm_label())
    };

    Line::from(vec![Span::raw("  "), Span::styled(label, style)])
}

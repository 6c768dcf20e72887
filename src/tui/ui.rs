//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Focus, Mode};
use super::components::{market_trades, order_form, overview, sidebar, status_bar};

/// Width of the instrument sidebar.
const SIDEBAR_WIDTH: u16 = 20;

/// Width of the market trades panel.
const TRADES_WIDTH: u16 = 36;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(76)])
        .split(frame.area());

    sidebar::render(frame, columns[0], app);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Overview
            Constraint::Min(16),   // Order form
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Keybindings help
        ])
        .split(columns[1]);

    overview::render(frame, main_layout[0], app);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(TRADES_WIDTH)])
        .split(main_layout[1]);
    order_form::render(frame, body[0], app);
    market_trades::render(frame, body[1]);
    status_bar::render(frame, main_layout[2], app);
    render_keybindings(frame, main_layout[3], app);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.focus) {
        (Mode::Insert, _) => "[Esc/Enter]done [←/→]move cursor",
        (Mode::Confirm, _) => "[y]submit [n]cancel",
        (Mode::Normal, Focus::Sidebar) => "[j/k]select instrument [1-9]jump [Tab]next field [q]quit",
        (Mode::Normal, Focus::BuyingPower) => "[h/l]±1 [H/L]±10 [Home/End]0/100 [Tab]next field [q]quit",
        (Mode::Normal, focus) if focus.is_text_field() => "[Enter/i]edit [Tab]next field [q]quit",
        (Mode::Normal, Focus::Confirm) => "[Enter]confirm [Tab]next field [q]quit",
        (Mode::Normal, _) => "[Space]toggle [Tab]next field [q]quit",
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

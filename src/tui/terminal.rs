//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::Result;
use crate::error::PriviTradeError;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn io_error(context: &str, e: impl std::fmt::Display) -> PriviTradeError {
    PriviTradeError::Io(format!("{context}: {e}"))
}

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns [`PriviTradeError::Io`] if stdout is not a TTY or terminal
/// initialization fails. Raw mode is undone before returning an error.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(PriviTradeError::Io(
            "the dashboard requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| io_error("failed to enable raw mode", e))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        io_error("failed to enter alternate screen", e)
    })?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        io_error("failed to create terminal", e)
    })
}

/// Restores the terminal to its original state.
///
/// Disables raw mode, returns to the main screen buffer and shows the
/// cursor again.
///
/// # Errors
///
/// Returns [`PriviTradeError::Io`] if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| io_error("failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| io_error("failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| io_error("failed to show cursor", e))?;
    Ok(())
}

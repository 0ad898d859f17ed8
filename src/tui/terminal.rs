//! Terminal lifecycle: raw mode and the alternate screen.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{Result, WickerError};

/// The concrete terminal type the UI draws into.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn term_err(context: &str, e: io::Error) -> WickerError {
    WickerError::Io(format!("{context}: {e}"))
}

/// Puts the terminal into raw mode on the alternate screen and hands back
/// the drawing handle. Refuses to start when stdout is not a TTY.
pub fn setup_terminal() -> Result<Tui> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Err(WickerError::Io(
            "an interactive terminal (TTY) is required".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| term_err("failed to enable raw mode", e))?;
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(term_err("failed to enter alternate screen", e));
    }

    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            Err(term_err("failed to create terminal", e))
        }
    }
}

/// Leaves the alternate screen and undoes raw mode.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| term_err("failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| term_err("failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| term_err("failed to restore cursor", e))?;
    Ok(())
}

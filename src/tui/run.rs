use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::activity::{load_records, to_heatmap_matrix, to_line_series};
use crate::cli::CommonArgs;

use super::events::handle_key_event;
use super::state::{ActivityViews, TuiState, ViewMode};
use super::views::draw_frame;

/// Raw mode and the alternate screen, held for as long as the guard lives.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
        match terminal {
            Ok(mut terminal) => {
                terminal.clear()?;
                Ok(Self { terminal })
            }
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
        debug!("terminal restored");
    }
}

pub fn run(common: &CommonArgs, view_mode: ViewMode) -> anyhow::Result<()> {
    let records = load_records(common, true)?;
    let views = ActivityViews {
        repository: common.repo.clone(),
        series: to_line_series(&records, &common.repo).context("Failed to build line series")?,
        matrix: to_heatmap_matrix(&records).context("Failed to build heatmap")?,
    };
    let mut state = TuiState::new(views.week_count(), view_mode);

    let mut guard = TerminalGuard::acquire().context("Failed to initialize terminal")?;
    let terminal = guard.terminal();

    loop {
        terminal.draw(|f| draw_frame(f, &views, &state))?;

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if handle_key_event(key_event, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

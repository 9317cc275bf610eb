//! Terminal User Interface
//!
//! Interactive terminal view of the live sensor readings with session
//! recording controls. One cooperative loop drives sensor refresh, buffer
//! capture, automatic flush and rendering, interleaved with a short
//! non-blocking input poll; flushes and file I/O run synchronously on this
//! thread, so a long write stalls input until it completes.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

mod app;
mod ui;

pub use app::App;

use crate::config::Config;
use crate::monitor::Monitor;

/// Run the TUI application
pub fn run(monitor: &mut Monitor, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let tick_rate = Duration::from_millis(config.general.update_interval_ms);
    let res = run_app(&mut terminal, &mut app, monitor, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // A session left active keeps its samples otherwise
    monitor.stop_recording();

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Main application loop
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    monitor: &mut Monitor,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();

    // First poll happens immediately rather than one tick in
    app.update(monitor);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up => app.scroll_up(),
                    KeyCode::Down => app.scroll_down(),
                    KeyCode::PageUp => app.page_up(),
                    KeyCode::PageDown => app.page_down(),
                    KeyCode::Home => app.scroll_home(),
                    KeyCode::End => app.scroll_end(),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.toggle_recording(monitor),
                    KeyCode::Char('f') | KeyCode::Char('F') => app.flush(monitor),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(),
                    MouseEventKind::ScrollDown => app.scroll_down(),
                    _ => {}
                },
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update(monitor);
            last_tick = Instant::now();
        }
    }
}

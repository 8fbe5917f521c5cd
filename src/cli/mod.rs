//! TUI front-end entry (Ratatui + Crossterm)
//! - Builds the REST client for the backend
//! - Sets up terminal

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub mod api;
pub mod state;
pub mod ui;
pub mod util;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

pub async fn run() -> Result<()> {
    let mut app = init_app()?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.refresh_entries().await.ok();

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key).await?;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.quit {
            break;
        }
    }

    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

pub fn init_app() -> Result<state::App> {
    // The base URL is injected into the client once here; nothing mutates
    // it afterwards.
    let base_url = std::env::var("FIRE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = api::Client::new(base_url)?;

    Ok(state::App::new(client))
}

// src/main.rs
mod anim;
mod app;
mod config;
mod data;
mod input;
mod list;
mod menu;
mod models;
mod observer;
mod scroll;
mod theme;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::App;
use crate::config::{Settings, init_config_file};
use crate::data::Showcase;

#[derive(Parser, Debug)]
#[command(name = "showreel", version, about = "Animated showcase reel for the terminal")]
struct Cli {
    /// Load records and menu entries from a TOML file
    #[arg(long, value_name = "FILE")]
    showcase: Option<String>,

    /// Scroll damping factor, 0.01 to 1.0
    #[arg(long)]
    damping: Option<f64>,

    /// Animation frame rate
    #[arg(long)]
    fps: Option<u64>,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    /// Append tracing output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = init_config_file()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut settings = Settings::new().context("loading configuration")?;
    if let Some(path) = cli.showcase {
        settings.showcase = Some(path);
    }
    if let Some(damping) = cli.damping {
        settings.damping = damping;
    }
    if let Some(fps) = cli.fps {
        settings.fps = fps;
    }
    if cli.no_mouse {
        settings.mouse = false;
    }
    if let Some(path) = cli.log_file {
        settings.log_file = Some(path);
    }
    settings.normalize();

    init_tracing(settings.log_file.as_deref())?;

    let showcase = match settings.showcase.as_deref() {
        Some(path) => Showcase::load(path)?,
        None => Showcase::builtin(),
    };
    tracing::info!(
        records = showcase.records.len(),
        menu = showcase.menu.len(),
        fps = settings.fps,
        damping = settings.damping,
        "starting"
    );

    let mouse = settings.mouse;
    let mut terminal = setup_terminal(mouse)?;
    let result = run(&mut terminal, settings, showcase);
    restore_terminal(&mut terminal, mouse)?;
    result
}

/// Tracing goes to a file or nowhere; stdout belongs to the UI.
fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let path = shellexpand::tilde(path).to_string();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Puts the terminal into TUI mode: raw input, alternate screen, and
/// mouse capture when enabled.
fn setup_terminal(mouse: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    if mouse {
        stdout.execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Puts the terminal back into shell mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    if mouse {
        terminal.backend_mut().execute(DisableMouseCapture)?;
    }
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: Settings,
    showcase: Showcase,
) -> Result<()> {
    let frame_budget = Duration::from_millis(1000 / settings.fps);
    let started = Instant::now();
    let mut app = App::new(settings, showcase, 0.0);
    let mut last_tick = Instant::now();

    loop {
        let now = started.elapsed().as_secs_f64();
        terminal.draw(|f| ui::draw(f, &mut app, now))?;

        let timeout = frame_budget.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    if !input::handle_key(key_event.code, &mut app, now) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => input::handle_mouse(mouse_event, &mut app, now),
                // The next draw re-measures the viewport.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= frame_budget {
            app.tick(started.elapsed().as_secs_f64());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

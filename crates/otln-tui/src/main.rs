//! otln TUI
//!
//! Terminal user interface for otln - building essay outlines from notes.
//!
//! ## Layout
//!
//! Board view: the topic board (one draggable line per topic) with the
//! currently displayed note at the bottom. Opening a topic shows its note
//! canvas with a drop-to-remove strip above it.
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Select topic line
//! - Enter: Open the selected topic
//! - Esc: Back to the board
//! - a: File the displayed note into the selected topic
//! - n/p: Cycle the pending notes
//! - t: New topic
//! - s: Save, e: Export
//! - Mouse drag: reorder topic lines and notes, drag a note onto the strip
//!   to send it back to the queue
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
            KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use tracing::info;
use tracing_subscriber::EnvFilter;

use otln_core::{storage, Config, Extent, Workspace};

use app::{App, InputMode, View};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let project: PathBuf = args
        .next()
        .map(PathBuf::from)
        .context("usage: otln-tui <project.otln> [note-file]")?;
    let notes: Option<PathBuf> = args.next().map(PathBuf::from);

    let mut config = Config::load()?;
    // Canvas units are terminal cells here, not pixels
    config.item_gap = 1.0;

    init_tui_logging(&config);

    // Load the project if it exists; otherwise start an empty session that
    // will be saved to the given path.
    let mut workspace = if project.exists() {
        let document = storage::load_project(&project)?;
        let width = config.canvas_width;
        Workspace::from_document(document, config, |_| Extent::new(width - 2.0, 1.0))
    } else {
        Workspace::new(config)
    };

    if let Some(notes) = notes {
        let count = workspace
            .import_notes(&notes)
            .with_context(|| format!("Failed to import notes from {}", notes.display()))?;
        info!("imported {} notes from {}", count, notes.display());
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(workspace, project);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key.code, key.modifiers);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.input_mode == InputMode::NewTopic {
        match code {
            KeyCode::Enter => app.commit_topic_input(),
            KeyCode::Esc => app.cancel_topic_input(),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Char(c) => app.input_buffer.push(c),
            _ => {}
        }
        return;
    }

    // Clear status message on any key press
    app.status_message = None;

    match code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Esc | KeyCode::Char('b') => app.back_to_board(),

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),

        KeyCode::Enter => {
            if app.view == View::Board {
                app.open_selected_topic();
            }
        }

        KeyCode::Char('n') | KeyCode::Right => app.next_note(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_note(),

        KeyCode::Char('a') => app.assign_to_selected(),
        KeyCode::Char('t') => {
            if app.view == View::Board {
                app.start_topic_input();
            }
        }

        KeyCode::Char('s') => app.save(),
        KeyCode::Char('e') => app.export(),

        KeyCode::Char('?') => {
            app.status_message = Some(
                "j/k:select  Enter:open  a:file  n/p:cycle  t:topic  s:save  e:export  q:quit"
                    .to_string(),
            );
        }

        _ => {}
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if the OTLN_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("OTLN_LOG") else {
        return;
    };

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    if config.ensure_data_dir().is_err() {
        return;
    }
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("otln_core={},otln_tui={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

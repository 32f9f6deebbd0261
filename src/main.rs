//! folio: scroll-tracking navigation for sectioned portfolio pages.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, ValueEnum};
use folio::app_state::{self, AppState};
use folio::error::FolioError;
use folio::{config, formats, input, logging, page, theme, ui};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Scroll-tracking navigation for sectioned portfolio pages", long_about = None)]
struct Args {
    /// Portfolio page, or a directory holding one
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Start in this theme instead of the saved one
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Reveal everything immediately instead of animating sections in
    #[arg(long)]
    no_animations: bool,
}

fn main() -> Result<(), FolioError> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        logging::init_tracing(path)?;
    }
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if args.no_animations {
        cfg.animations = false;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;
    let Some(document) = documents.first() else {
        eprintln!("No matching files found");
        return Ok(());
    };

    let format = formats::markdown::MarkdownFormat;
    let page = page::Page::load(document, &format, cfg.section_level)?;
    info!(path = %document.display(), sections = page.sections.len(), "loaded page");

    let store = theme::ThemeStore::open().unwrap_or_else(|err| {
        warn!(error = %err, "preferences unavailable, theme changes will not persist");
        theme::ThemeStore::ephemeral()
    });
    let initial = match args.theme {
        Some(ThemeArg::Light) => theme::Theme::Light,
        Some(ThemeArg::Dark) => theme::Theme::Dark,
        None => theme::initial_theme(store.saved_theme(), theme::system_prefers_dark()),
    };

    run_tui(page, &cfg, initial, store)
}

fn run_tui(
    page: page::Page,
    cfg: &config::Config,
    initial: theme::Theme,
    store: theme::ThemeStore,
) -> Result<(), FolioError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let start = Instant::now();
    let size = terminal::size()?;
    let mut app = AppState::new(page, cfg, initial, store, size, start.elapsed());

    let result = run_app(&mut terminal, &mut app, start);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    start: Instant,
) -> io::Result<()> {
    loop {
        app.tick(start.elapsed());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(app.poll_timeout(start.elapsed()))? {
            continue;
        }
        let now = start.elapsed();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.message = None;
                let flow = match app.current_view {
                    app_state::View::Page => handle_page_key(app, key, now),
                    app_state::View::Form => handle_form_key(app, key, now),
                };
                if flow == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse, now),
            Event::Resize(width, height) => app.resize(width, height, now),
            _ => {}
        }
    }
}

fn handle_page_key(app: &mut AppState, key: KeyEvent, now: Duration) -> Flow {
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_rows(-1, now),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_rows(1, now),
        KeyCode::PageUp => app.scroll_page(false, now),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_page(true, now),
        KeyCode::Home => app.scroll_to_edge(true, now),
        KeyCode::End => app.scroll_to_edge(false, now),
        KeyCode::Char('g') => {
            if app.scroll_top.visible {
                app.click_scroll_to_top(now);
            } else {
                app.message = Some("Already at the top".to_string());
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.activate_link(digit as usize - 1, now);
            }
        }
        KeyCode::Tab => app.focus_link(true),
        KeyCode::BackTab => app.focus_link(false),
        KeyCode::Enter => app.activate_link(app.focused_link, now),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('m') => app.toggle_menu(),
        KeyCode::Char('c') => app.open_form(),
        KeyCode::Esc => {
            app.escape();
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_form_key(app: &mut AppState, key: KeyEvent, now: Duration) -> Flow {
    match key.code {
        KeyCode::Esc => {
            app.escape();
        }
        KeyCode::Enter => app.form_enter(now),
        KeyCode::Tab => app.form.focus_next(),
        KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_submit(now);
        }
        KeyCode::Char(c) => app.form.input(c),
        _ => {}
    }
    Flow::Continue
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Duration) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_rows(-WHEEL_ROWS, now),
        MouseEventKind::ScrollDown => app.scroll_rows(WHEEL_ROWS, now),
        MouseEventKind::Down(MouseButton::Left) => app.click_at(mouse.column, mouse.row, now),
        MouseEventKind::Moved => app.hover_at(mouse.column, mouse.row),
        _ => {}
    }
}

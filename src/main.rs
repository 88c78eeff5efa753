//! focusmap: outline graphs and focus reading for markdown documents.
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use focusmap::formats::markdown::MarkdownFormat;
use focusmap::scheduler::IncrementalBuild;
use focusmap::section::collect_markers;
use focusmap::surface::LayoutDirection;
use focusmap::{app_state, config, input, outline, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "focusmap")]
#[command(about = "Outline graphs and block-by-block focus reading", long_about = None)]
struct Args {
    /// Write logs to this file (filtered by `RUST_LOG`)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the outline graph of a document as JSON
    Outline {
        /// Markdown document
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Viewport width in pixels, used to pick the layout direction
        #[arg(long, default_value_t = 1024)]
        width: u32,

        /// Label of the root node (defaults to the file name)
        #[arg(long)]
        root: Option<String>,
    },
    /// Read documents in the terminal with focus mode and outline
    Read {
        /// Files or directories to read
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// File extensions to match
        #[arg(long, short = 'e', value_name = "EXT")]
        ext: Vec<String>,
    },
}

#[derive(Serialize)]
struct OutlineOutput<'a> {
    direction: LayoutDirection,
    #[serde(flatten)]
    outline: &'a outline::Outline,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), matches!(args.command, Command::Read { .. }))?;
    let mut cfg = config::Config::load();

    match args.command {
        Command::Outline { path, width, root } => print_outline(&path, width, root, &cfg),
        Command::Read { paths, ext } => {
            // Override config with command line args
            if !ext.is_empty() {
                cfg.file_extensions = ext;
            }
            let documents = input::find_documents(paths, &cfg.file_extensions)?;
            if documents.is_empty() {
                eprintln!("No matching files found");
                return Ok(());
            }
            // Fail before entering the alternate screen if the first document is unusable.
            open(&documents[0], &cfg)?;
            run_tui(&documents, &cfg)
        }
    }
}

/// How the reader loop ended.
enum Exit {
    Quit,
    Next,
    Previous,
}

fn open(path: &Path, cfg: &config::Config) -> anyhow::Result<app_state::AppState> {
    let document = input::load_document(path, &MarkdownFormat)
        .with_context(|| format!("loading {}", path.display()))?;
    app_state::AppState::new(path.to_path_buf(), document, cfg).map_err(anyhow::Error::from)
}

/// Logs go to `log_file` when given; the TUI otherwise only reports errors, since writing
/// to stderr would corrupt the alternate screen.
fn init_logging(log_file: Option<&Path>, tui: bool) -> anyhow::Result<()> {
    let default = if tui && log_file.is_none() { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn print_outline(
    path: &Path,
    width: u32,
    root: Option<String>,
    cfg: &config::Config,
) -> anyhow::Result<()> {
    cfg.validate()?;
    let document = input::load_document(path, &MarkdownFormat)
        .with_context(|| format!("loading {}", path.display()))?;
    let markers = collect_markers(&document)
        .into_iter()
        .map(|(_, marker)| marker)
        .collect();
    let root = root.or_else(|| input::document_title(path));
    let mut build =
        IncrementalBuild::new(cfg.outline_options(), markers, root.as_deref(), cfg.chunk_size)?;
    build.run_to_completion()?;

    let output = OutlineOutput {
        direction: LayoutDirection::for_width(width, cfg.narrow_width),
        outline: build.outline(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_tui(documents: &[PathBuf], cfg: &config::Config) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = read_documents(&mut terminal, documents, cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
    }
    Ok(())
}

fn read_documents<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    documents: &[PathBuf],
    cfg: &config::Config,
) -> anyhow::Result<()> {
    let mut index = 0;
    loop {
        let mut app = open(&documents[index], cfg)?;
        if documents.len() > 1 {
            app.message = Some(format!("{}/{}", index + 1, documents.len()));
        }
        match run_app(terminal, &mut app)? {
            Exit::Quit => return Ok(()),
            Exit::Next => index = (index + 1) % documents.len(),
            Exit::Previous => index = (index + documents.len() - 1) % documents.len(),
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<Exit> {
    loop {
        let size = terminal.size()?;
        // One title row above the page, the help bar below.
        let page_rows = size.height.saturating_sub(ui::HELP_HEIGHT + 1);
        app.resize(size.width, usize::from(page_rows));
        terminal.draw(|f| ui::draw(f, app))?;

        // Keep building the outline between keystrokes.
        let timeout = if app.outline.is_processing() {
            Duration::ZERO
        } else {
            Duration::from_millis(250)
        };
        if !event::poll(timeout)? {
            app.tick();
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let page = isize::try_from(app.viewport_rows).unwrap_or(isize::MAX);
        match app.current_view {
            app_state::View::Reader => match key.code {
                KeyCode::Char('q') => return Ok(Exit::Quit),
                KeyCode::Char('f') => app.toggle_focus(),
                KeyCode::Char('j') | KeyCode::Down => {
                    if app.navigator.is_active() {
                        if app.step_next().is_none() {
                            app.message = Some("End of document".to_string());
                        }
                    } else {
                        app.scroll_by(1);
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if app.navigator.is_active() {
                        if app.step_previous().is_none() {
                            app.message = Some("Start of document".to_string());
                        }
                    } else {
                        app.scroll_by(-1);
                    }
                }
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(page),
                KeyCode::PageUp => app.scroll_by(-page),
                KeyCode::Tab => app.open_outline(),
                KeyCode::Char('n') => return Ok(Exit::Next),
                KeyCode::Char('p') => return Ok(Exit::Previous),
                _ => {}
            },
            app_state::View::Outline => match key.code {
                KeyCode::Char('q') => return Ok(Exit::Quit),
                KeyCode::Up | KeyCode::Char('k') => app.move_outline_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => app.move_outline_cursor(1),
                KeyCode::Enter => app.activate_selected(Instant::now()),
                KeyCode::Esc | KeyCode::Tab => app.close_outline(),
                _ => {}
            },
        }
        app.tick();
    }
}

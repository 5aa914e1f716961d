//! Lernkarten - German learning flashcard TUI
//!
//! A terminal shell for a flashcard app: a home screen whose single
//! button navigates to the (work-in-progress) cards screen. Also ships
//! an `analyze` subcommand that maps source-file dependencies of an
//! app project tree.

mod analyze;
mod config;
mod nav;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use analyze::ProjectAnalyzer;
use config::Config;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "lernkarten")]
#[command(author, version, about = "German learning flashcard TUI", long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map source-file dependencies of a project tree and report unused files
    Analyze {
        /// Project root to analyze
        path: PathBuf,

        /// Where to write the dependency graph JSON
        #[arg(long, default_value = "dependency_graph.json")]
        graph: PathBuf,

        /// Where to write the analysis log
        #[arg(long, default_value = "project_analysis.log")]
        log_file: PathBuf,
    },
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(Command::Analyze {
        path,
        graph,
        log_file,
    }) = args.command
    {
        return run_analyze(&path, &graph, &log_file);
    }

    // Load config
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path).unwrap_or_default();

    run_tui(config)
}

fn run_analyze(path: &Path, graph: &Path, log_file: &Path) -> Result<()> {
    init_logging(log_file)?;

    if !path.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    let mut analyzer = ProjectAnalyzer::new(path.to_path_buf());
    analyzer.analyze()?;
    analyzer.export_graph(graph)?;
    log::info!("Dependency graph saved to {}", graph.display());

    Ok(())
}

/// Log to the terminal and to the analysis log file.
fn init_logging(log_file: &Path) -> Result<()> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            log_config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, log_config, File::create(log_file)?),
    ])?;

    Ok(())
}

fn run_tui(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}

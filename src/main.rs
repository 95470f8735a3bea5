// Algoscope: step through classic algorithms frame by frame

use std::io;
use std::process;

use algoscope::cli::{self, Cli, Command, OutputFormat, RunArgs};
use algoscope::logging::init_logging;
use algoscope::playback::PlaybackController;
use algoscope::ui::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::error;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    if let Err(e) = init_logging(&args.log_level, args.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    match args.command {
        Command::List => {
            print!("{}", cli::render_catalog());
            Ok(())
        }
        Command::Run(run) => run_algorithm(&run),
    }
}

fn run_algorithm(run: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = match run.prepare() {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "cannot start run");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match run.format {
        OutputFormat::Text => {
            print!("{}", cli::render_text(&session.trace));
            return Ok(());
        }
        OutputFormat::Json => {
            println!("{}", cli::render_json(&session.trace)?);
            return Ok(());
        }
        OutputFormat::Tui => {}
    }

    let playback = PlaybackController::with_config(session.trace, session.config)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(playback, run.algorithm.info(), session.scene);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

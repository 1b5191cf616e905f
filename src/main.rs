// algoviz: step-by-step algorithm and data structure visualizer

use std::fs::File;
use std::io;
use std::sync::Mutex;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{filter as tracing_filter, layer::SubscriberExt};

use algoviz::config::{Cli, Config};
use algoviz::headless;
use algoviz::session::Session;
use algoviz::ui::App;

// Configure logger. The TUI owns the terminal, so without a log file it stays silent.
fn set_tracing_subscriber(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let targets_filter =
        tracing_filter::Targets::new().with_targets([("algoviz", config.log_level)]);
    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        let subscriber = tracing_subscriber::registry()
            .with(targets_filter)
            .with(file_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else if config.headless {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_line_number(true)
            .with_writer(io::stderr);
        let subscriber = tracing_subscriber::registry()
            .with(targets_filter)
            .with(stderr_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match cli.get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    set_tracing_subscriber(&config)?;

    if config.headless {
        let stdout = io::stdout();
        headless::run_trace(&config, &mut stdout.lock())?;
        return Ok(());
    }

    let session = Session::new(&config)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
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

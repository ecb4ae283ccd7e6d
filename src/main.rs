use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use todoers::config::{AppConfig, Cli};
use todoers::container::AppContainer;
use todoers::data::TaskDatabase;
use todoers::logging;
use todoers::ui::{run_app, App};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve(Cli::parse()).context("loading configuration")?;
    logging::init(&config.log_file, &config.log_level).context("opening log file")?;
    info!(?config, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let _guard = runtime.enter();

    let database = TaskDatabase::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let container = AppContainer::new(&database);
    let mut app = App::new(container.use_cases(), config.start_route);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    runtime.block_on(app.shutdown());

    if let Err(err) = result {
        error!(error = %err, "ui loop failed");
        eprintln!("{:?}", err);
    }
    info!("bye");
    Ok(())
}

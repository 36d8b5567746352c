use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyflap::core::{GameConfig, FRAME_MS, LOG_FILE};
use skyflap::leaderboard::{import_legacy, JsonFileStore};
use skyflap::session::{GameSession, TickEvent};
use skyflap::ui::{map_key, render_game, UiAction};
use skyflap::utils::{build_info, logging, persistence};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "skyflap", about = "Flappy-bird with bosses, in your terminal")]
struct Args {
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Game config JSON (defaults to ~/.skyflap/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve games over WebSocket instead of playing locally
    #[arg(long, value_name = "PORT", num_args = 0..=1, default_missing_value = "3000")]
    serve: Option<u16>,

    /// Seed an empty leaderboard from an older leaderboard.json and exit
    #[arg(long, value_name = "FILE")]
    import_legacy: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::load_default(),
    };
    let store = JsonFileStore::default_location().context("locating the data directory")?;

    if let Some(path) = &args.import_legacy {
        logging::init_stderr();
        let imported = import_legacy(&store, path, config.max_leaderboard_entries)
            .with_context(|| format!("importing {}", path.display()))?;
        println!("Imported {} entries into {}", imported, store.path().display());
        return Ok(());
    }

    if let Some(port) = args.serve {
        logging::init_stderr();
        return serve(port, config, store);
    }

    let log_path = persistence::data_path(LOG_FILE)?;
    logging::init_file(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Starting skyflap (seed {})", seed);
    let session = GameSession::new(config, store, seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut session: GameSession,
) -> anyhow::Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|f| render_game(f, f.size(), &snapshot))?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key, session.state) {
                    Some(UiAction::Quit) => break,
                    Some(UiAction::Game(input)) => session.handle_input(input),
                    None => {}
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let events = session.tick(elapsed.as_millis() as u64);
            for event in events.iter() {
                match event {
                    TickEvent::NameSubmitted { name, rank } => {
                        tracing::info!("{} entered the board at rank {:?}", name, rank)
                    }
                    other => tracing::trace!("{:?}", other),
                }
            }
        }
    }

    tracing::info!("Quit with high score {}", session.high_score);
    Ok(())
}

#[cfg(feature = "web")]
fn serve(port: u16, config: GameConfig, store: JsonFileStore) -> anyhow::Result<()> {
    use skyflap::web::{start_web_server, SessionRegistry};
    use std::sync::Arc;

    let registry = Arc::new(SessionRegistry::new(config, Arc::new(store)));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting the async runtime")?;
    runtime.block_on(start_web_server(port, registry))?;
    Ok(())
}

#[cfg(not(feature = "web"))]
fn serve(_port: u16, _config: GameConfig, _store: JsonFileStore) -> anyhow::Result<()> {
    anyhow::bail!("skyflap was built without the `web` feature; rebuild with --features web")
}

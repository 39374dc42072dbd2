//! Terminal UI for Strictly Tiles

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use strictly_tiles::{
    AcceptAll, GameSession, GameState, Identity, LocalReferee, Referee, TilesConfig, WordList,
    WordValidator,
};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use app::App;
use input::{PlacementDebouncer, map_key};

const TICK: Duration = Duration::from_millis(50);

/// Run a pass-and-play game against the local referee.
pub async fn run_play(config: TilesConfig) -> Result<()> {
    // Log to a file so the alternate screen stays clean
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Strictly Tiles TUI");

    let validator: Box<dyn WordValidator> = match config.dictionary() {
        Some(path) => Box::new(WordList::from_file(path)?),
        None => Box::new(AcceptAll),
    };
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let referee = Referee::new("local", config.players(), &mut rng, validator);
    let (sender, mut states) = LocalReferee::spawn(referee);

    let identity = config
        .identity()
        .clone()
        .map_or(Identity::HotSeat, Identity::Fixed);
    let mut session = GameSession::new(GameState::default(), identity)
        .with_merge_options(config.merge_options());
    if let Some(seed) = config.seed() {
        session = session.with_seed(*seed);
    }
    let mut app = App::new(session, sender);
    if let Some(json) = states.recv().await {
        app.on_state(&json);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut app, &mut states, config.debounce()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Draw, read keys, apply commands, fold in published states.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    states: &mut mpsc::UnboundedReceiver<String>,
    debounce: Duration,
) -> Result<()> {
    let mut debouncer = PlacementDebouncer::new(debounce);

    loop {
        while let Ok(json) = states.try_recv() {
            app.on_state(&json);
        }

        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit() {
            return Ok(());
        }

        let timeout = debouncer
            .deadline()
            .map_or(TICK, |d| d.saturating_duration_since(Instant::now()).min(TICK));
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && let Some(command) = map_key(key)
        {
            for ready in debouncer.push(command, Instant::now()) {
                app.handle_command(ready).await;
            }
        }

        if let Some(ready) = debouncer.poll(Instant::now()) {
            app.handle_command(ready).await;
        }
    }
}

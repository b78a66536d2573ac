use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{FRAME_INTERVAL_MS, THEMES, Theme, theme_by_name};
use grid_snake::engine::GameEngine;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::score::{HighScoreStore, JsonFileStore, MemoryStore};
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Color theme.
    #[arg(long, default_value = "classic", value_parser = ["classic", "ocean", "neon"])]
    theme: String,

    /// High-score file to use instead of the per-user default.
    #[arg(long = "scores-file", value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save", conflicts_with = "scores_file")]
    no_save: bool,

    /// Log file to write instead of the per-user default.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(error) = logging::init(&log_path) {
        eprintln!(
            "Logging disabled, could not open {}: {error}",
            log_path.display()
        );
    }

    let theme = theme_by_name(&cli.theme).unwrap_or(&THEMES[0]);
    log::info!("Starting grid-snake with theme {}", theme.name);

    install_panic_hook();

    if cli.no_save {
        log::info!("High score persistence disabled");
        return play(GameEngine::new(MemoryStore::default()), theme);
    }

    let store = match cli.scores_file {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::at_default_location(),
    };
    log::info!("High score file: {}", store.path().display());
    play(GameEngine::new(store), theme)
}

fn play<S: HighScoreStore>(engine: GameEngine<S>, theme: &Theme) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let result = run(session.terminal_mut(), engine, theme);
    drop(session);

    if let Err(error) = &result {
        log::error!("Terminal error: {error}");
    }
    log::info!("Exiting");
    result
}

fn run<S: HighScoreStore>(
    terminal: &mut AppTerminal,
    mut engine: GameEngine<S>,
    theme: &Theme,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    loop {
        terminal.draw(|frame| renderer::render(frame, engine.state(), theme))?;

        if let Some(game_input) = input.poll_input(frame_interval)? {
            if game_input == GameInput::Quit {
                break;
            }

            engine.handle_input(game_input, Instant::now());
        }

        engine.update(Instant::now());
    }

    Ok(())
}

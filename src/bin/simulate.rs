//! Play seeded games end to end and print how they finished.
//!
//! ```bash
//! RUST_LOG=rust_snl=debug cargo run --features cli --bin simulate -- --players 4 --games 3
//! ```

use std::path::PathBuf;

use clap::Parser;
use rust_snl::{BoardDefinition, ChipColor, Dice, PlayerId, Session, SessionConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "simulate", version, about = "Simulate Snakes and Ladders games")]
struct Cli {
    /// Number of players per game (1-9).
    #[arg(short, long, default_value_t = 3)]
    players: usize,

    /// Number of games to play.
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Master seed; each game forks its own dice.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// JSON board definition. Defaults to the built-in board.
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// Give up on a game after this many rolls.
    #[arg(long, default_value_t = 10_000)]
    max_rolls: u32,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Tracing to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.players == 0 || cli.players > ChipColor::ALL.len() {
        return Err(format!("--players must be between 1 and {}", ChipColor::ALL.len()).into());
    }

    let mut config = SessionConfig::new().with_min_players(cli.players);
    if let Some(path) = &cli.board {
        let json = std::fs::read_to_string(path)?;
        config = config.with_board(BoardDefinition::from_json(&json)?, path.display().to_string());
    }

    let mut session = Session::new(config)?;
    let mut master = Dice::new(cli.seed);

    for game in 1..=cli.games {
        let mut dice = master.fork();
        for (i, color) in ChipColor::ALL.into_iter().take(cli.players).enumerate() {
            session.select_color(PlayerId::new(i as i64 + 1), format!("Bot {}", i + 1), color)?;
        }
        session.start()?;

        let summary = loop {
            let Some(current) = session.current_player().map(|p| p.id) else {
                return Err("session lost track of the current player".into());
            };
            if session.engine().rolls() >= cli.max_rolls {
                session.abort();
                break None;
            }
            let report = session.roll(current, dice.roll())?;
            session.take_events();
            if let Some(summary) = report.summary {
                break Some(summary);
            }
        };

        match summary {
            Some(summary) => {
                let winners: Vec<String> = summary.winners.iter().map(|p| p.to_string()).collect();
                let loser = summary
                    .loser
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "game {}: {} rolls, winners [{}], loser {}",
                    game,
                    summary.rolls,
                    winners.join(", "),
                    loser
                );
            }
            None => {
                println!("game {}: abandoned after {} rolls", game, cli.max_rolls);
                // Roster survives an abort; clear it for the next game.
                for i in 0..cli.players {
                    session.leave(PlayerId::new(i as i64 + 1))?;
                }
            }
        }
    }

    Ok(())
}

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use grid_2048::config::{EngineConfig, SessionConfig};
use grid_2048::protocol::{self, Response};
use grid_2048::session::Session;
use grid_2048::sim::{self, Summary};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Sliding-tile merge puzzle engine")]
struct Args {
    /// Grid edge length
    #[arg(long, default_value_t = 4, global = true)]
    size: usize,

    /// Seed for tile spawns (entropy when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Serve one game over JSON lines on stdin/stdout
    Play {
        /// Move lock hold time reported to clients, in milliseconds
        #[arg(long, default_value_t = 120)]
        settle_ms: u64,
        /// Sleep for the settle time after each accepted move and settle automatically
        #[arg(long)]
        auto_settle: bool,
    },
    /// Play random-policy games in parallel and print aggregate stats
    Simulate {
        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: u64,
        /// Per-game cap on moves
        #[arg(long)]
        max_moves: Option<u64>,
        /// Suppress the progress bar
        #[arg(long)]
        quiet: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let engine = EngineConfig { size: args.size, seed: args.seed };

    let result = match args.cmd {
        Cmd::Play { settle_ms, auto_settle } => {
            let config = SessionConfig { engine, settle_delay: Duration::from_millis(settle_ms), ..Default::default() };
            run_play(config, auto_settle)
        }
        Cmd::Simulate { games, max_moves, quiet, json } => run_simulate(engine, games, max_moves, quiet, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_play(config: SessionConfig, auto_settle: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    info!("serving {}x{} game", session.grid().size(), session.grid().size());

    writeln!(stdout, "{}", Response::state(&session).to_line())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(response) = protocol::handle_line(&mut session, &line) else { continue };
        writeln!(stdout, "{}", response.to_line())?;
        stdout.flush()?;

        if auto_settle && matches!(response, Response::MoveResult { .. }) {
            thread::sleep(session.settle_delay());
            session.settle();
            writeln!(stdout, "{}", Response::state(&session).to_line())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_simulate(
    engine: EngineConfig,
    games: u64,
    max_moves: Option<u64>,
    quiet: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    engine.validate()?;
    let base_seed = engine.seed.unwrap_or_else(rand::random);
    info!("simulating {games} games on {}x{} from seed {base_seed}", engine.size, engine.size);

    let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(games) };
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise} | {msg}")?);
    let results = sim::simulate(games, base_seed, engine.size, max_moves, |g| {
        pb.inc(1);
        pb.set_message(format!("last score: {}", g.score));
    })?;
    pb.finish_and_clear();

    let summary = Summary::from_games(&results);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Games: {}, mean score: {:.1}, max score: {}, mean moves: {:.1}, highest tile: {}",
            summary.games, summary.mean_score, summary.max_score, summary.mean_moves, summary.highest_tile
        );
        for (tile, count) in &summary.tile_histogram {
            println!("{tile:>7}: {count}");
        }
    }
    Ok(())
}

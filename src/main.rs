//! Tank Arena headless runner
//!
//! Drives the simulation with the autopilot at a fixed timestep and keeps the
//! high score file up to date. Useful for soak runs and balance checks:
//!
//! ```text
//! RUST_LOG=info tank-arena --frames 36000 --seed 42
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use tank_arena::consts::*;
use tank_arena::highscores::{HIGH_SCORE_FILE, HighScores};
use tank_arena::sim::{GameEvent, GamePhase, GameState, InputEvent, TickInput, tick};
use tank_arena::tuning::Tuning;

/// Environment variable naming a JSON tuning file
const TUNING_ENV: &str = "TANK_ARENA_TUNING";
/// Default run length (five minutes of play)
const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

#[derive(Parser, Debug)]
#[command(name = "tank-arena")]
#[command(about = "Headless Tank Arena runner driven by the autopilot")]
#[command(version)]
struct Options {
    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
}

impl Options {
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs())
        })
    }
}

/// Runner holding the session and persistence glue
struct Runner {
    state: GameState,
    games_played: u32,
}

impl Runner {
    fn new(seed: u64) -> Self {
        let tuning = match std::env::var(TUNING_ENV) {
            Ok(path) => Tuning::load_or_default(path),
            Err(_) => Tuning::default(),
        };
        let high_scores = HighScores::load(HIGH_SCORE_FILE).unwrap_or_else(|e| {
            log::warn!("{e}; starting with an empty leaderboard");
            HighScores::new()
        });

        Self {
            state: GameState::new(seed, tuning).with_high_scores(high_scores),
            games_played: 0,
        }
    }

    /// Run one frame: pick menu/game-over inputs, tick, handle events
    fn step(&mut self) {
        let events = match self.state.phase {
            GamePhase::Menu => vec![InputEvent::Confirm],
            GamePhase::Instructions => vec![InputEvent::Escape],
            GamePhase::GameOver => vec![InputEvent::Space],
            GamePhase::Playing | GamePhase::Paused => Vec::new(),
        };
        let input = TickInput {
            events,
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut self.state, &input, SIM_DT);

        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreRecorded { score, rank } => {
                    self.games_played += 1;
                    log::info!("Game {} finished: score {score}, rank {rank:?}", self.games_played);
                    if let Err(e) = self.state.high_scores.save(HIGH_SCORE_FILE) {
                        log::error!("{e}");
                    }
                }
                GameEvent::LevelStarted { level } => log::debug!("Level {level} started"),
                _ => {}
            }
        }
    }
}

fn main() {
    env_logger::init();
    let options = Options::parse();
    let seed = options.seed();
    log::info!(
        "Tank Arena (headless) starting: {} frames, seed {}",
        options.frames,
        seed
    );

    let mut runner = Runner::new(seed);
    for _ in 0..options.frames {
        runner.step();
        if runner.state.quit_requested {
            break;
        }
    }

    let hud = runner.state.hud();
    log::info!(
        "Stopped after {} games: level {}, score {}, best {:?}",
        runner.games_played,
        hud.level,
        hud.score,
        runner.state.high_scores.top_score()
    );
}

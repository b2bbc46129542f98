//! Flick Hoops headless demo
//!
//! Drives a session with a seeded bot at a fixed 60 Hz tick until the game
//! ends, standing in for the presentation layer's gestures and physics.
//!
//! Usage: `flick-hoops [seed] [settings.json]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use flick_hoops::sim::{Frame, GameEvent, GamePhase};
use flick_hoops::{Command, Session, Settings};

/// Fixed presentation frame rate
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many simulated seconds
const MAX_SECONDS: f32 = 600.0;

/// What the bot's imaginary physics decided for the current shot
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Bucket { hoop: usize, bank: bool },
    Miss,
    AirBall,
}

/// Stand-in for a player plus physics engine
struct Bot {
    rng: Pcg32,
    /// Seconds until the current shot resolves
    flight: f32,
    outcome: Option<Outcome>,
}

impl Bot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            flight: 0.0,
            outcome: None,
        }
    }

    /// Produce this frame's commands
    fn commands(&mut self, session: &Session) -> Vec<Command> {
        let state = session.state();
        match state.phase {
            GamePhase::Idle => {
                let origin = state.ball.pos;
                let pull = Vec2::new(
                    self.rng.random_range(-120.0..120.0),
                    self.rng.random_range(-260.0..-120.0),
                );
                self.flight = self.rng.random_range(0.6..1.8);
                self.outcome = Some(self.pick_outcome(state.hoops.len()));
                vec![
                    Command::BeginDrag(origin),
                    Command::UpdateDrag(origin + pull / 2.0),
                    Command::UpdateDrag(origin + pull),
                    Command::EndDrag(origin + pull),
                ]
            }
            GamePhase::Shoot => {
                self.flight -= FRAME_DT;
                if self.flight > 0.0 {
                    return Vec::new();
                }
                match self.outcome.take() {
                    Some(Outcome::Bucket { hoop, bank }) => {
                        let mut commands = Vec::new();
                        if bank {
                            commands.push(Command::WallContact);
                        }
                        commands.push(Command::BallInHoop(hoop));
                        commands
                    }
                    Some(Outcome::Miss) => vec![Command::BallBelowBoundary],
                    // Let the shot clock run out
                    Some(Outcome::AirBall) | None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    fn pick_outcome(&mut self, hoops: usize) -> Outcome {
        let roll: f32 = self.rng.random();
        if roll < 0.55 && hoops > 0 {
            // Lower hoops are easier to hit
            let hoop = if self.rng.random_bool(0.7) {
                0
            } else {
                self.rng.random_range(0..hoops)
            };
            Outcome::Bucket {
                hoop,
                bank: self.rng.random_bool(0.2),
            }
        } else if roll < 0.9 {
            Outcome::Miss
        } else {
            Outcome::AirBall
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("Starting demo with seed {seed}, {} layout", settings.layout.as_str());

    let mut session = Session::new(settings, seed);
    let mut bot = Bot::new(seed);
    session.apply(Command::Start(Frame::from_size(390.0, 844.0)));

    let mut elapsed = 0.0;
    while session.phase() != GamePhase::GameOver && elapsed < MAX_SECONDS {
        for command in bot.commands(&session) {
            session.apply(command);
        }
        session.apply(Command::Tick(FRAME_DT));
        elapsed += FRAME_DT;

        for event in session.drain_events() {
            match event {
                GameEvent::ScoreChanged {
                    points,
                    streak,
                    awarded,
                    bank_shot,
                } if awarded > 0 => {
                    log::info!(
                        "+{awarded}{} -> {points} points, streak x{streak}",
                        if bank_shot { " bank shot" } else { "" }
                    );
                }
                GameEvent::LivesChanged(lives) => log::info!("Lives: {lives}"),
                GameEvent::GameOver {
                    points,
                    best_streak,
                } => {
                    log::info!(
                        "Game over after {elapsed:.1}s: {points} points, best streak {best_streak}"
                    );
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    let bests = session.bests();
    log::info!(
        "Session bests: {} points, streak {}",
        bests.points,
        bests.streak
    );

    match session.snapshot_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}

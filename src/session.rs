//! Session lifecycle controller
//!
//! The single owner of the game board. The presentation layer calls the
//! command methods (or [`Session::apply`]) and drains notifications with
//! [`Session::drain_events`]. Each game-over notification that passes through
//! updates the session's best points and best streak.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Frame, GameBoard, GameEvent, GamePhase, GameState};

/// Commands accepted from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Load a fresh game on this frame
    Start(Frame),
    BeginDrag(Vec2),
    UpdateDrag(Vec2),
    EndDrag(Vec2),
    WallContact,
    BallBelowBoundary,
    BallInHoop(usize),
    Pause,
    Resume,
    Restart,
    /// Abort the game and clear the board
    Cleanup,
    /// Advance time by this many seconds
    Tick(f32),
}

/// Personal bests across the games of one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBests {
    /// Games that reached game over
    pub games_finished: u32,
    pub points: u64,
    pub streak: u32,
}

impl SessionBests {
    /// Fold in a finished game; true if it set a new points best
    fn finish_game(&mut self, points: u64, best_streak: u32) -> bool {
        self.games_finished += 1;
        self.streak = self.streak.max(best_streak);
        if points > self.points {
            self.points = points;
            return true;
        }
        false
    }
}

/// One player's session: the board plus everything that outlives a game
#[derive(Debug)]
pub struct Session {
    board: GameBoard,
    bests: SessionBests,
    /// Games started this session
    runs: u32,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            board: GameBoard::new(settings, seed, Frame::from_size(0.0, 0.0)),
            bests: SessionBests::default(),
            runs: 0,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        self.board.state()
    }

    pub fn phase(&self) -> GamePhase {
        self.board.phase()
    }

    pub fn bests(&self) -> SessionBests {
        self.bests
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Take all notifications produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the current game state for the presentation to mirror
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.board.state())
    }

    /// Dispatch a command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start(frame) => self.start(frame),
            Command::BeginDrag(at) => self.begin_drag(at),
            Command::UpdateDrag(to) => self.update_drag(to),
            Command::EndDrag(at) => self.end_drag(at),
            Command::WallContact => self.report_wall_contact(),
            Command::BallBelowBoundary => self.report_ball_below_boundary(),
            Command::BallInHoop(index) => self.report_ball_in_hoop(index),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
            Command::Cleanup => self.cleanup(),
            Command::Tick(dt) => self.tick(dt),
        }
    }

    // === Lifecycle ===

    /// Load a new game on `frame`, abandoning any game in progress
    pub fn start(&mut self, frame: Frame) {
        self.runs += 1;
        self.board.load(frame);
        self.collect();
    }

    /// Reset the ledger and reload after the exit animation
    pub fn restart(&mut self) {
        if self.runs == 0 {
            log::debug!("Ignoring restart before the first start");
            return;
        }
        self.runs += 1;
        self.board.restart();
        self.collect();
    }

    pub fn pause(&mut self) {
        self.board.pause();
        self.collect();
    }

    pub fn resume(&mut self) {
        self.board.resume();
        self.collect();
    }

    /// Abort the game and clear the board
    pub fn cleanup(&mut self) {
        self.board.cleanup();
        self.collect();
    }

    /// Advance time; fires due continuations
    pub fn tick(&mut self, dt: f32) {
        self.board.advance(dt);
        self.collect();
    }

    // === Gestures and physics reports ===

    pub fn begin_drag(&mut self, at: Vec2) {
        self.board.begin_drag(at);
        self.collect();
    }

    pub fn update_drag(&mut self, to: Vec2) {
        self.board.update_drag(to);
        self.collect();
    }

    pub fn end_drag(&mut self, at: Vec2) {
        self.board.end_drag(at);
        self.collect();
    }

    pub fn report_wall_contact(&mut self) {
        self.board.report_wall_contact();
        self.collect();
    }

    pub fn report_ball_below_boundary(&mut self) {
        self.board.report_ball_below_boundary();
        self.collect();
    }

    pub fn report_ball_in_hoop(&mut self, index: usize) {
        self.board.report_ball_in_hoop(index);
        self.collect();
    }

    /// Move board notifications to the session queue, tracking bests
    fn collect(&mut self) {
        for event in self.board.drain_events() {
            if let GameEvent::GameOver {
                points,
                best_streak,
            } = event
            {
                if self.bests.finish_game(points, best_streak) {
                    log::info!("Run {} set a new session best: {points} points", self.runs);
                }
            }
            self.events.push(event);
        }
    }
}

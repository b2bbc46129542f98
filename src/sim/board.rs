//! Round and game state machine
//!
//! `GameBoard` owns the phase, ball, hoops, ledger and timers. The
//! presentation forwards gestures and physics reports in; every call queues
//! `GameEvent`s which the owner drains. Events that make no sense in the
//! current phase are ignored (debug log only).

use glam::Vec2;

use super::layout::HoopLayout;
use super::ledger::Ledger;
use super::state::{Ball, Cue, Entrance, Frame, GameEvent, GamePhase, GameState, Hoop};
use super::timer::{TimerHandle, Timers};
use super::trajectory::trajectory;
use crate::consts::*;
use crate::settings::Settings;

/// Delayed transitions scheduled by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Shot clock ran out while the ball was in flight
    ShotClock,
    /// Air-ball fade finished, count the miss
    AirBall,
    /// Entrance or respawn animation finished
    Settle,
    /// Restart exit animation finished, load the new game
    Reload,
}

/// The game state machine
#[derive(Debug, Clone)]
pub struct GameBoard {
    state: GameState,
    settings: Settings,
    layout: HoopLayout,
    timers: Timers<Continuation>,
    /// Round timer, only while a shot is in flight
    shot_clock: Option<TimerHandle>,
    /// At most one delayed continuation at a time
    continuation: Option<(TimerHandle, Continuation)>,
    events: Vec<GameEvent>,
}

impl GameBoard {
    /// Create an unloaded board. Call [`GameBoard::load`] to start playing.
    pub fn new(settings: Settings, seed: u64, frame: Frame) -> Self {
        let settings = settings.sanitized();
        Self {
            state: GameState::new(seed, frame, settings.ball_style),
            layout: HoopLayout::new(settings.layout, seed),
            settings,
            timers: Timers::new(),
            shot_clock: None,
            continuation: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn ledger(&self) -> &Ledger {
        &self.state.ledger
    }

    pub fn hoops(&self) -> &[Hoop] {
        &self.state.hoops
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pending delayed continuation, if any
    pub fn pending_continuation(&self) -> Option<Continuation> {
        self.continuation
            .filter(|(handle, _)| self.timers.is_pending(*handle))
            .map(|(_, continuation)| continuation)
    }

    /// Seconds left on the shot clock while a shot is in flight
    pub fn shot_clock_remaining(&self) -> Option<f32> {
        self.shot_clock.and_then(|h| self.timers.remaining(h))
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Lifecycle ===

    /// Start a fresh game on `frame`
    pub fn load(&mut self, frame: Frame) {
        self.cancel_all();
        self.state.frame = frame;
        self.state.ledger.reset();
        self.state.round = 0;
        self.state.drag_origin = None;
        self.spawn_round();
        log::info!(
            "Game loaded: {} hoops, seed {}, {:?} layout",
            self.state.hoops.len(),
            self.state.seed,
            self.layout.policy()
        );
    }

    /// Throw away the current game and load a new one after the exit animation
    pub fn restart(&mut self) {
        self.cancel_all();
        self.state.drag_origin = None;
        self.clear_hoops();
        self.state.ledger.reset();
        self.state.round = 0;
        self.push_score(0, false);
        self.events
            .push(GameEvent::LivesChanged(self.state.ledger.lives()));
        self.set_phase(GamePhase::Loading);
        self.schedule_continuation(self.settings.restart_delay, Continuation::Reload);
        log::info!("Restarting game");
    }

    /// Clear the board and go inactive (abort game / return home)
    pub fn cleanup(&mut self) {
        self.cancel_all();
        self.state.drag_origin = None;
        self.clear_hoops();
        self.set_phase(GamePhase::Inactive);
        log::info!("Game board cleaned up");
    }

    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Idle {
            return self.ignored("pause");
        }
        self.set_phase(GamePhase::Pause);
    }

    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Pause {
            return self.ignored("resume");
        }
        self.set_phase(GamePhase::Idle);
    }

    /// Advance time by `dt` seconds and run any due continuations.
    /// Time stands still while paused.
    pub fn advance(&mut self, dt: f32) {
        if self.state.phase == GamePhase::Pause {
            return;
        }
        self.timers.advance(dt);
        while let Some((handle, continuation)) = self.timers.pop_due() {
            self.fire(handle, continuation);
        }
    }

    // === Gestures ===

    pub fn begin_drag(&mut self, at: Vec2) {
        if self.state.phase != GamePhase::Idle {
            return self.ignored("begin_drag");
        }
        if !self.state.ball.contains(at) {
            log::debug!("Drag started off the ball at {at}");
            return;
        }
        self.state.drag_origin = Some(at);
        self.set_phase(GamePhase::Aim);
        self.events.push(GameEvent::Cue(Cue::Drag));
    }

    pub fn update_drag(&mut self, to: Vec2) {
        let Some(origin) = self.state.drag_origin.filter(|_| self.state.phase == GamePhase::Aim)
        else {
            return self.ignored("update_drag");
        };
        let velocity = (origin - to) / PREVIEW_DRAG_DIVISOR;
        let preview = trajectory(self.state.ball.pos, velocity).to_vec();
        self.events.push(GameEvent::AimChanged { velocity, preview });
    }

    pub fn end_drag(&mut self, at: Vec2) {
        let Some(origin) = self.state.drag_origin.filter(|_| self.state.phase == GamePhase::Aim)
        else {
            return self.ignored("end_drag");
        };
        self.state.drag_origin = None;

        if self.state.ball.contains(at) {
            // Released on the ball, cancel the aim
            self.set_phase(GamePhase::Idle);
            return;
        }

        let impulse = (origin - at) / SHOT_DRAG_DIVISOR;
        self.set_phase(GamePhase::Shoot);
        self.events.push(GameEvent::Cue(Cue::Release));
        self.events.push(GameEvent::BallLaunched { impulse });
        self.cancel_shot_clock();
        self.shot_clock = Some(
            self.timers
                .schedule(self.settings.shot_clock, Continuation::ShotClock),
        );
        log::debug!("Shot launched with impulse {impulse}");
    }

    // === Physics reports ===

    pub fn report_wall_contact(&mut self) {
        if self.state.phase != GamePhase::Shoot {
            return self.ignored("report_wall_contact");
        }
        self.state.ledger.mark_bank_shot();
    }

    pub fn report_ball_in_hoop(&mut self, index: usize) {
        if self.state.phase != GamePhase::Shoot {
            return self.ignored("report_ball_in_hoop");
        }
        if index >= self.state.hoops.len() {
            log::debug!(
                "Ignoring ball in hoop {index}, only {} hoops",
                self.state.hoops.len()
            );
            return;
        }
        self.advance_round(index);
    }

    pub fn report_ball_below_boundary(&mut self) {
        if self.state.phase != GamePhase::Shoot {
            return self.ignored("report_ball_below_boundary");
        }
        self.handle_miss();
    }

    // === Transitions ===

    /// Score: remove hoops up to and including `index`, award, refill
    fn advance_round(&mut self, index: usize) {
        self.set_phase(GamePhase::Bucket);
        self.cancel_shot_clock();
        self.cancel_continuation();
        self.events.push(GameEvent::Cue(Cue::Score));

        let frame = self.state.frame;
        let removed = (index + 1).min(MAX_HOOPS).min(self.state.hoops.len());
        let scored_x = self.state.hoops[index].pos.x;
        self.state.hoops.drain(..removed);

        let bank_shot = self.state.ledger.take_bank_shot();
        let awarded = self.state.ledger.record_score(removed, bank_shot);
        self.push_score(awarded, bank_shot);
        self.state.round += 1;
        log::info!(
            "Round {} cleared: {} hoop(s), +{} points{}",
            self.state.round,
            removed,
            awarded,
            if bank_shot { " (bank shot)" } else { "" }
        );

        // Survivors drop to the lowest slots, new hoops fill the top
        for (slot, hoop) in self.state.hoops.iter_mut().enumerate() {
            hoop.pos.y = frame.slot_y(slot);
        }
        let below = self.state.hoops.last().map(|h| h.alignment);
        let added = self.layout.generate(
            &frame,
            self.state.hoops.len(),
            removed,
            self.settings.dynamic_chance_for_round(self.state.round),
            below,
        );
        self.state.hoops.extend(added.iter().cloned());

        let entrance = Entrance::for_count(&frame, removed);
        self.events.push(GameEvent::HoopsChanged {
            added,
            removed,
            hoops: self.state.hoops.clone(),
            entrance,
        });

        let ball = &mut self.state.ball;
        ball.pos = Vec2::new(
            frame.clamp_x(scored_x, BALL_SIZE / 2.0, 0.0, 0.0),
            ball.rest_y,
        );
        self.events.push(GameEvent::BallMoved {
            to: ball.pos,
            duration: entrance.duration,
            fade_in: 0.0,
        });

        self.set_phase(GamePhase::Idle);
        let settle = entrance.finish_time(self.state.hoops.len());
        self.schedule_continuation(settle, Continuation::Settle);
    }

    /// Miss: lose a life, respawn the ball or end the game
    fn handle_miss(&mut self) {
        self.set_phase(GamePhase::Miss);
        self.cancel_shot_clock();
        self.cancel_continuation();
        self.events.push(GameEvent::Cue(Cue::LifeLost));

        let lives = self.state.ledger.record_miss();
        self.events.push(GameEvent::LivesChanged(lives));
        self.push_score(0, false);

        if lives == 0 {
            self.clear_hoops();
            self.set_phase(GamePhase::GameOver);
            self.events.push(GameEvent::Cue(Cue::GameOver));
            self.events.push(GameEvent::GameOver {
                points: self.state.ledger.points(),
                best_streak: self.state.ledger.best_streak(),
            });
            log::info!(
                "Game over: {} points, best streak {}",
                self.state.ledger.points(),
                self.state.ledger.best_streak()
            );
            return;
        }

        let ball = &mut self.state.ball;
        ball.pos = ball.rest_pos();
        self.events.push(GameEvent::BallMoved {
            to: ball.pos,
            duration: 0.0,
            fade_in: RESPAWN_FADE,
        });
        self.set_phase(GamePhase::Idle);
        self.schedule_continuation(RESPAWN_FADE, Continuation::Settle);
        log::debug!("Shot missed, {lives} lives left");
    }

    fn fire(&mut self, handle: TimerHandle, continuation: Continuation) {
        if continuation == Continuation::ShotClock {
            if self.shot_clock != Some(handle) {
                return;
            }
            self.shot_clock = None;
            if self.state.phase == GamePhase::Shoot {
                log::debug!("Shot clock expired, air ball");
                self.events.push(GameEvent::AirBall {
                    fade_out: AIR_BALL_FADE,
                });
                self.schedule_continuation(AIR_BALL_FADE, Continuation::AirBall);
            }
            return;
        }

        if self.continuation.map(|(h, _)| h) != Some(handle) {
            return;
        }
        self.continuation = None;

        match continuation {
            Continuation::AirBall if self.state.phase == GamePhase::Shoot => self.handle_miss(),
            Continuation::Settle => self.events.push(GameEvent::Settled),
            Continuation::Reload if self.state.phase == GamePhase::Loading => {
                self.spawn_round();
                log::info!("New game ready");
            }
            other => log::debug!("Dropping {other:?} in {:?}", self.state.phase),
        }
    }

    /// Fresh ball and hoop layout for round 0, then idle
    fn spawn_round(&mut self) {
        let frame = self.state.frame;
        self.state.ball = Ball::new(&frame, self.settings.ball_style);
        self.state.hoops = self.layout.generate(
            &frame,
            0,
            self.settings.hoop_count,
            self.settings.dynamic_chance_for_round(0),
            None,
        );

        let entrance = Entrance::for_count(&frame, 1);
        self.events.push(GameEvent::BallMoved {
            to: self.state.ball.pos,
            duration: ENTRANCE_PER_HOOP,
            fade_in: 0.0,
        });
        self.events.push(GameEvent::HoopsChanged {
            added: self.state.hoops.clone(),
            removed: 0,
            hoops: self.state.hoops.clone(),
            entrance,
        });
        self.push_score(0, false);
        self.events
            .push(GameEvent::LivesChanged(self.state.ledger.lives()));
        self.set_phase(GamePhase::Idle);
        let settle = entrance.finish_time(self.state.hoops.len());
        self.schedule_continuation(settle, Continuation::Settle);
    }

    // === Helpers ===

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase == phase {
            return;
        }
        log::debug!("Phase {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
        self.events.push(GameEvent::StateChanged(phase));
    }

    fn ignored(&self, what: &str) {
        log::debug!("Ignoring {what} in {:?}", self.state.phase);
    }

    fn push_score(&mut self, awarded: u64, bank_shot: bool) {
        self.events.push(GameEvent::ScoreChanged {
            points: self.state.ledger.points(),
            streak: self.state.ledger.streak(),
            awarded,
            bank_shot,
        });
    }

    fn clear_hoops(&mut self) {
        let removed = self.state.hoops.len();
        if removed == 0 {
            return;
        }
        self.state.hoops.clear();
        self.events.push(GameEvent::HoopsChanged {
            added: Vec::new(),
            removed,
            hoops: Vec::new(),
            entrance: Entrance::for_count(&self.state.frame, removed),
        });
    }

    fn schedule_continuation(&mut self, delay: f32, continuation: Continuation) {
        self.cancel_continuation();
        let handle = self.timers.schedule(delay, continuation);
        self.continuation = Some((handle, continuation));
    }

    fn cancel_continuation(&mut self) {
        if let Some((handle, _)) = self.continuation.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_shot_clock(&mut self) {
        if let Some(handle) = self.shot_clock.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_all(&mut self) {
        self.shot_clock = None;
        self.continuation = None;
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LayoutPolicy;

    fn frame() -> Frame {
        Frame::from_size(390.0, 844.0)
    }

    fn loaded(settings: Settings) -> GameBoard {
        let mut board = GameBoard::new(settings, 42, frame());
        board.load(frame());
        board.drain_events();
        board
    }

    fn board() -> GameBoard {
        loaded(Settings::default())
    }

    fn shoot(board: &mut GameBoard) {
        let at = board.ball().pos;
        board.begin_drag(at);
        board.end_drag(at - Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_load_starts_idle_with_hoops() {
        let mut board = GameBoard::new(Settings::default(), 1, frame());
        assert_eq!(board.phase(), GamePhase::Inactive);
        board.load(frame());
        assert_eq!(board.phase(), GamePhase::Idle);
        assert_eq!(board.hoops().len(), MAX_HOOPS);
        assert_eq!(board.ledger().lives(), MAX_LIVES);
        let events = board.drain_events();
        assert!(events.contains(&GameEvent::StateChanged(GamePhase::Idle)));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::HoopsChanged { removed: 0, added, .. } if added.len() == 3))
        );
    }

    #[test]
    fn test_drag_must_start_on_ball() {
        let mut board = board();
        let ball = board.ball().pos;
        board.begin_drag(ball + Vec2::new(200.0, 0.0));
        assert_eq!(board.phase(), GamePhase::Idle);
        board.begin_drag(ball + Vec2::new(10.0, 10.0));
        assert_eq!(board.phase(), GamePhase::Aim);
        assert!(board.drain_events().contains(&GameEvent::Cue(Cue::Drag)));
    }

    #[test]
    fn test_drag_move_previews_trajectory() {
        let mut board = board();
        let ball = board.ball().pos;
        board.begin_drag(ball);
        board.drain_events();
        board.update_drag(ball - Vec2::new(13.0, 26.0));
        assert_eq!(board.phase(), GamePhase::Aim);
        match board.drain_events().as_slice() {
            [GameEvent::AimChanged { velocity, preview }] => {
                assert!((velocity.x - 10.0).abs() < 1e-4);
                assert!((velocity.y - 20.0).abs() < 1e-4);
                assert_eq!(preview.len(), TRAJECTORY_POINTS);
                assert_eq!(preview[0].pos, ball);
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn test_release_on_ball_cancels_aim() {
        let mut board = board();
        let ball = board.ball().pos;
        board.begin_drag(ball);
        board.end_drag(ball + Vec2::new(5.0, 5.0));
        assert_eq!(board.phase(), GamePhase::Idle);
        assert!(board.shot_clock_remaining().is_none());
        assert!(board.state().drag_origin.is_none());
    }

    #[test]
    fn test_release_off_ball_shoots() {
        let mut board = board();
        shoot(&mut board);
        assert_eq!(board.phase(), GamePhase::Shoot);
        assert_eq!(
            board.shot_clock_remaining(),
            Some(Settings::default().shot_clock)
        );
        let impulse = board.drain_events().into_iter().find_map(|e| match e {
            GameEvent::BallLaunched { impulse } => Some(impulse),
            _ => None,
        });
        let impulse = impulse.expect("launch event");
        assert!((impulse.x - 100.0 / SHOT_DRAG_DIVISOR).abs() < 1e-4);
        assert!((impulse.y - 50.0 / SHOT_DRAG_DIVISOR).abs() < 1e-4);
    }

    #[test]
    fn test_combo_removes_all_hoops_up_to_match() {
        let mut board = board();
        shoot(&mut board);
        board.report_ball_in_hoop(2);
        assert_eq!(board.phase(), GamePhase::Idle);
        assert_eq!(board.hoops().len(), 3);
        assert_eq!(board.ledger().points(), 3);
        assert_eq!(board.ledger().streak(), 1);
        assert_eq!(board.state().round, 1);

        let events = board.drain_events();
        assert!(events.contains(&GameEvent::StateChanged(GamePhase::Bucket)));
        let entrance = events.iter().find_map(|e| match e {
            GameEvent::HoopsChanged {
                removed: 3,
                added,
                entrance,
                ..
            } if added.len() == 3 => Some(*entrance),
            _ => None,
        });
        assert_eq!(entrance, Some(Entrance::for_count(&frame(), 3)));
        assert!(entrance.is_some_and(|e| e.from_y == frame().spawn_y()));
    }

    #[test]
    fn test_survivors_drop_to_lowest_slots() {
        let mut board = board();
        let top = board.hoops()[2].clone();
        shoot(&mut board);
        board.report_ball_in_hoop(1);
        let hoops = board.hoops();
        assert_eq!(hoops.len(), 3);
        assert_eq!(hoops[0].pos.x, top.pos.x);
        assert_eq!(hoops[0].alignment, top.alignment);
        assert_eq!(hoops[0].pos.y, frame().slot_y(0));
        assert_eq!(hoops[2].pos.y, frame().slot_y(2));
        assert_ne!(hoops[1].alignment, hoops[0].alignment);
    }

    #[test]
    fn test_ball_returns_to_rest_under_scored_hoop() {
        let mut board = board();
        let scored_x = board.hoops()[0].pos.x;
        shoot(&mut board);
        board.report_ball_in_hoop(0);
        let ball = board.ball();
        assert_eq!(ball.pos, Vec2::new(scored_x, ball.rest_y));
    }

    #[test]
    fn test_bank_shot_doubles_award_once() {
        let mut board = board();
        shoot(&mut board);
        board.report_wall_contact();
        board.report_wall_contact();
        assert!(board.ledger().is_bank_shot());
        board.report_ball_in_hoop(0);
        assert_eq!(board.ledger().points(), BANK_SHOT_MULTIPLIER);
        assert!(!board.ledger().is_bank_shot());

        // Next shot without a wall touch gets no bonus (streak x2)
        shoot(&mut board);
        board.report_ball_in_hoop(0);
        assert_eq!(board.ledger().points(), BANK_SHOT_MULTIPLIER + 2);
    }

    #[test]
    fn test_wall_contact_outside_shot_ignored() {
        let mut board = board();
        board.report_wall_contact();
        assert!(!board.ledger().is_bank_shot());
    }

    #[test]
    fn test_hoop_index_out_of_range_ignored() {
        let mut board = loaded(Settings {
            hoop_count: 1,
            ..Settings::default()
        });
        shoot(&mut board);
        board.report_ball_in_hoop(1);
        assert_eq!(board.phase(), GamePhase::Shoot);
        assert_eq!(board.ledger().points(), 0);
    }

    #[test]
    fn test_misses_until_game_over() {
        let mut board = board();
        for expected in [2, 1] {
            shoot(&mut board);
            board.report_ball_below_boundary();
            assert_eq!(board.ledger().lives(), expected);
            assert_eq!(board.phase(), GamePhase::Idle);
            assert_eq!(board.hoops().len(), 3);
        }
        shoot(&mut board);
        board.report_ball_below_boundary();
        assert_eq!(board.ledger().lives(), 0);
        assert_eq!(board.phase(), GamePhase::GameOver);
        assert!(board.hoops().is_empty());
        assert!(board.drain_events().iter().any(|e| matches!(e, GameEvent::GameOver { .. })));

        let ball = board.ball().pos;
        board.begin_drag(ball);
        assert_eq!(board.phase(), GamePhase::GameOver);
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_miss_respawns_ball_with_fade() {
        let mut board = board();
        let rest = board.ball().pos;
        shoot(&mut board);
        board.report_ball_below_boundary();
        let events = board.drain_events();
        assert!(events.contains(&GameEvent::BallMoved {
            to: rest,
            duration: 0.0,
            fade_in: RESPAWN_FADE,
        }));
        assert_eq!(board.pending_continuation(), Some(Continuation::Settle));
        board.advance(RESPAWN_FADE);
        assert!(board.drain_events().contains(&GameEvent::Settled));
    }

    #[test]
    fn test_air_ball_counts_as_miss_after_fade() {
        let mut board = board();
        shoot(&mut board);
        board.advance(board.settings().shot_clock);
        assert_eq!(board.phase(), GamePhase::Shoot);
        assert_eq!(board.pending_continuation(), Some(Continuation::AirBall));
        assert!(
            board
                .drain_events()
                .contains(&GameEvent::AirBall { fade_out: AIR_BALL_FADE })
        );
        board.advance(AIR_BALL_FADE);
        assert_eq!(board.phase(), GamePhase::Idle);
        assert_eq!(board.ledger().lives(), MAX_LIVES - 1);
    }

    #[test]
    fn test_score_during_air_ball_fade_cancels_miss() {
        let mut board = board();
        shoot(&mut board);
        board.advance(board.settings().shot_clock);
        board.report_ball_in_hoop(0);
        board.advance(30.0);
        assert_eq!(board.ledger().lives(), MAX_LIVES);
        assert_eq!(board.ledger().points(), 1);
        assert_eq!(board.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_boundary_during_air_ball_fade_misses_once() {
        let mut board = board();
        shoot(&mut board);
        board.advance(board.settings().shot_clock);
        board.report_ball_below_boundary();
        board.advance(30.0);
        assert_eq!(board.ledger().lives(), MAX_LIVES - 1);
    }

    #[test]
    fn test_pause_freezes_timers() {
        let mut board = board();
        assert_eq!(board.pending_continuation(), Some(Continuation::Settle));
        board.pause();
        assert_eq!(board.phase(), GamePhase::Pause);
        board.advance(60.0);
        assert!(!board.drain_events().contains(&GameEvent::Settled));

        let ball = board.ball().pos;
        board.begin_drag(ball);
        assert_eq!(board.phase(), GamePhase::Pause);

        board.resume();
        assert_eq!(board.phase(), GamePhase::Idle);
        board.advance(2.0);
        assert!(board.drain_events().contains(&GameEvent::Settled));
    }

    #[test]
    fn test_pause_only_from_idle() {
        let mut board = board();
        shoot(&mut board);
        board.pause();
        assert_eq!(board.phase(), GamePhase::Shoot);
        board.resume();
        assert_eq!(board.phase(), GamePhase::Shoot);
    }

    #[test]
    fn test_restart_mid_shot_reloads_cleanly() {
        let mut board = board();
        shoot(&mut board);
        board.report_wall_contact();
        board.restart();
        assert_eq!(board.phase(), GamePhase::Loading);
        assert!(board.hoops().is_empty());
        assert!(board.shot_clock_remaining().is_none());
        assert_eq!(board.pending_continuation(), Some(Continuation::Reload));

        board.advance(board.settings().restart_delay);
        assert_eq!(board.phase(), GamePhase::Idle);
        assert_eq!(board.hoops().len(), 3);
        assert_eq!(*board.ledger(), Ledger::new());

        // The cancelled shot clock must not come back
        board.advance(60.0);
        assert_eq!(board.phase(), GamePhase::Idle);
        assert_eq!(board.ledger().lives(), MAX_LIVES);
    }

    #[test]
    fn test_second_restart_cancels_first_reload() {
        let mut board = board();
        board.restart();
        board.advance(0.5);
        board.restart();
        board.advance(0.6);
        assert_eq!(board.phase(), GamePhase::Loading);
        board.advance(0.4);
        assert_eq!(board.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_cleanup_drops_pending_reload() {
        let mut board = board();
        board.restart();
        board.cleanup();
        assert_eq!(board.phase(), GamePhase::Inactive);
        board.advance(10.0);
        assert_eq!(board.phase(), GamePhase::Inactive);
        assert!(board.hoops().is_empty());
    }

    #[test]
    fn test_narrow_frame_keeps_reduced_hoop_count() {
        let narrow = Frame::from_size(200.0, 800.0);
        let mut board = GameBoard::new(Settings::default(), 9, narrow);
        board.load(narrow);
        assert_eq!(board.hoops().len(), 2);
        for index in [1, 0, 1] {
            shoot(&mut board);
            board.report_ball_in_hoop(index);
            assert_eq!(board.hoops().len(), 2);
            assert!(board.hoops()[1].pos.y > board.hoops()[0].pos.y);
            assert!(board.hoops().iter().all(|h| {
                h.pos.x >= HOOP_SIZE / 2.0 && h.pos.x <= 200.0 - HOOP_SIZE / 2.0
            }));
        }
    }

    #[test]
    fn test_cycling_layout_is_reproducible() {
        let settings = Settings {
            layout: LayoutPolicy::Cycling,
            ..Settings::default()
        };
        let a = loaded(settings.clone());
        let b = loaded(settings);
        assert_eq!(a.hoops(), b.hoops());
        assert!(a.hoops().iter().all(|h| !h.is_dynamic));
    }
}

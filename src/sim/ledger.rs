//! Scoring and lives bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Points, lives, winning streak and the bank-shot flag for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    points: u64,
    lives: u8,
    streak: u32,
    best_streak: u32,
    /// Rounds cleared this game
    rounds: u32,
    is_bank_shot: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            points: 0,
            lives: MAX_LIVES,
            streak: 0,
            best_streak: 0,
            rounds: 0,
            is_bank_shot: false,
        }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_bank_shot(&self) -> bool {
        self.is_bank_shot
    }

    /// Out of lives; the ledger ignores further records until reset
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Multiplier shown next to the score (x1 with no streak)
    pub fn streak_multiplier(&self) -> u32 {
        self.streak.clamp(1, MAX_STREAK_MULTIPLIER)
    }

    /// Ball touched a wall during the current shot
    pub fn mark_bank_shot(&mut self) {
        if !self.is_game_over() {
            self.is_bank_shot = true;
        }
    }

    /// Read and clear the bank-shot flag
    pub fn take_bank_shot(&mut self) -> bool {
        std::mem::take(&mut self.is_bank_shot)
    }

    /// Award a scored shot that cleared `hoops_cleared` hoops.
    ///
    /// Award = `POINTS_PER_HOOP * hoops * streak multiplier`, doubled by
    /// `BANK_SHOT_MULTIPLIER` for bank shots. The streak is incremented
    /// before the multiplier is taken. Returns the points awarded.
    pub fn record_score(&mut self, hoops_cleared: usize, is_bank_shot: bool) -> u64 {
        if self.is_game_over() {
            return 0;
        }
        let hoops = hoops_cleared.clamp(1, MAX_HOOPS) as u64;

        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        self.rounds += 1;

        let bonus = if is_bank_shot { BANK_SHOT_MULTIPLIER } else { 1 };
        let award = POINTS_PER_HOOP * hoops * u64::from(self.streak_multiplier()) * bonus;
        self.points += award;
        self.is_bank_shot = false;
        award
    }

    /// Lose a life. Returns the lives left.
    pub fn record_miss(&mut self) -> u8 {
        if self.is_game_over() {
            return 0;
        }
        self.lives = self.lives.saturating_sub(1);
        self.streak = 0;
        self.is_bank_shot = false;
        self.lives
    }

    /// Fresh ledger for a new game
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

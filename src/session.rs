//! Session flow: estimate, fly, settle the score, move on
//!
//! A session walks a list of levels. Before each attempt the player estimates
//! their time, which fixes the expected points; after the attempt the outcome
//! settles into the running total. Clearing a level advances the session,
//! failing repeats it.

use crate::score::{expected_points, level_outcome, ScoreState, ScoringConfig};

/// What settling one attempt did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    /// Points applied for this attempt (level delta plus crash deductions)
    pub delta: i64,
    /// New running total
    pub total: i64,
    /// Whether the session moved to the next level
    pub advanced: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: ScoringConfig,
    score: ScoreState,
    level_index: usize,
}

impl Session {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            score: ScoreState::default(),
            level_index: 0,
        }
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Lock in the estimate for the upcoming attempt; returns the expected
    /// points it is worth
    pub fn begin_level(&mut self, par_secs: f64, estimate_secs: f64) -> i64 {
        self.score.par_time = par_secs;
        self.score.expected = expected_points(estimate_secs, par_secs, &self.config);
        self.score.collisions = 0;
        log::info!(
            "level {}: estimated {estimate_secs}s against par {par_secs}s, worth {}",
            self.level_index + 1,
            self.score.expected
        );
        self.score.expected
    }

    /// Settle a finished attempt into the running total
    pub fn finish_level(&mut self, cleared: bool, collisions: u32) -> LevelResult {
        self.score.collisions = collisions;
        let prior = self.score.total;
        self.score.total = level_outcome(
            cleared,
            self.score.expected,
            collisions,
            &self.config,
            prior,
        );

        if cleared {
            self.level_index += 1;
        }
        LevelResult {
            delta: self.score.total - prior,
            total: self.score.total,
            advanced: cleared,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig {
            par_time_points: 1000,
            zero_point_time_factor: 2.0,
            collision_penalty: 100,
        }
    }

    #[test]
    fn test_cleared_level_advances_and_pays() {
        let mut session = Session::new(config());
        let expected = session.begin_level(100.0, 100.0);
        assert_eq!(expected, 1000);

        let result = session.finish_level(true, 2);
        assert_eq!(
            result,
            LevelResult {
                delta: 800,
                total: 800,
                advanced: true
            }
        );
        assert_eq!(session.level_index(), 1);
    }

    #[test]
    fn test_failed_level_repeats_and_costs_half() {
        let mut session = Session::new(config());
        session.begin_level(100.0, 100.0);
        session.finish_level(true, 0);
        assert_eq!(session.score().total, 1000);

        session.begin_level(100.0, 100.0);
        let result = session.finish_level(false, 0);
        assert_eq!(result.delta, -500);
        assert_eq!(result.total, 500);
        assert!(!result.advanced);
        assert_eq!(session.level_index(), 1);
    }

    #[test]
    fn test_total_can_go_negative() {
        let mut session = Session::new(config());
        session.begin_level(100.0, 100.0);
        let result = session.finish_level(false, 4);
        assert_eq!(result.total, -900);
    }

    #[test]
    fn test_new_level_resets_per_level_state() {
        let mut session = Session::new(config());
        session.begin_level(100.0, 150.0);
        session.finish_level(true, 3);

        session.begin_level(80.0, 80.0);
        assert_eq!(session.score().collisions, 0);
        assert_eq!(session.score().par_time, 80.0);
        assert_eq!(session.score().expected, 1000);
    }
}

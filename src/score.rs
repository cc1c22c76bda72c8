//! Time-estimation scoring
//!
//! The reward for a level is a line through two anchor points: estimating
//! exactly the par time earns the full par reward, estimating at the
//! zero-point factor times par earns nothing. Finishing applies that reward
//! (or half of it as a penalty on failure) plus a per-crash deduction.
//!
//! All rounding reproduces JavaScript `Math.round` (half toward +infinity),
//! which differs from `f64::round` on negative .5 boundaries.

use serde::{Deserialize, Serialize};

use crate::consts::{COLLISION_PENALTY, PAR_TIME_POINTS, ZERO_POINT_TIME_FACTOR};

/// Tunable scoring parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reward for estimating exactly the par time
    pub par_time_points: i64,
    /// Estimating at this multiple of par earns zero
    pub zero_point_time_factor: f64,
    /// Points deducted per crash
    pub collision_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            par_time_points: PAR_TIME_POINTS,
            zero_point_time_factor: ZERO_POINT_TIME_FACTOR,
            collision_penalty: COLLISION_PENALTY,
        }
    }
}

/// Score bookkeeping across a session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Running total; deliberately unclamped, may go negative
    pub total: i64,
    /// Expected points for the level in progress
    pub expected: i64,
    /// Crashes in the level in progress
    pub collisions: u32,
    /// Par time of the level in progress, seconds
    pub par_time: f64,
}

/// Round half toward +infinity, like JavaScript's `Math.round`.
///
/// `f64::round` rounds half away from zero, which disagrees on negative .5
/// values: Math.round(-500.5) is -500, (-500.5f64).round() is -501.
#[inline]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Expected points for an estimate against a par time.
///
/// Linear through (par, par_time_points) and (factor * par, 0), rounded
/// JS-style and floored at zero. Degenerate configurations (non-positive par,
/// factor not above 1) earn nothing.
pub fn expected_points(estimate_secs: f64, par_secs: f64, cfg: &ScoringConfig) -> i64 {
    if par_secs <= 0.0 || cfg.zero_point_time_factor <= 1.0 {
        log::warn!(
            "degenerate scoring anchors (par={par_secs}, factor={})",
            cfg.zero_point_time_factor
        );
        return 0;
    }

    let slope =
        -(cfg.par_time_points as f64) / (par_secs * (cfg.zero_point_time_factor - 1.0));
    let offset = -slope * cfg.zero_point_time_factor * par_secs;

    round_half_up(slope * estimate_secs + offset).max(0)
}

/// Point delta and new total for a finished level.
///
/// Success pays the expected points, failure costs half of them; every crash
/// costs the collision penalty either way. The total is not floored.
pub fn level_outcome(
    successful: bool,
    expected: i64,
    collisions: u32,
    cfg: &ScoringConfig,
    prior_total: i64,
) -> i64 {
    let level_delta = if successful {
        expected
    } else {
        round_half_up(-(expected as f64) / 2.0)
    };
    let collision_delta = -(collisions as i64) * cfg.collision_penalty;

    prior_total + level_delta + collision_delta
}

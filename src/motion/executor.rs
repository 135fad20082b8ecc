//! Ramp execution bookkeeping.
//!
//! The ramp phase drives a free-running square wave whose frequency changes
//! every tick, so the number of pulses actually sent is only known as an
//! estimate (`freq * dt` summed over ticks). [`RampExecutor`] keeps that
//! estimate and, once the ramp ends, works out the exact-count burst that
//! lands the axis on its target.

use core::time::Duration;

use super::profile::VelocityProfile;

/// Upper bound for the fixed burst frequency, in Hz.
pub const MAX_BURST_FREQUENCY_HZ: u32 = 50_000;

/// Exact-count split of a finished ramp.
///
/// `ramp_steps + burst_steps` always equals the move's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    /// Steps credited to the variable-frequency ramp (rounded estimate).
    pub ramp_steps: u32,
    /// Steps still owed, to be sent as one fixed burst.
    pub burst_steps: u32,
    /// Frequency for the burst: the last frequency the ramp reached.
    pub burst_frequency: u32,
}

/// Runtime state during one ramp.
#[derive(Debug, Clone)]
pub struct RampExecutor {
    /// The envelope being followed.
    profile: VelocityProfile,

    /// Total steps to move (absolute value).
    total_steps: u32,

    /// Control-loop tick, used to look one tick ahead.
    tick: Duration,

    /// Estimated steps emitted so far.
    steps_done: f32,

    /// Frequency currently driven, in Hz.
    current_hz: u32,
}

impl RampExecutor {
    /// Create a new executor for a move of `total_steps`.
    pub fn new(profile: VelocityProfile, total_steps: u32, tick: Duration) -> Self {
        Self {
            current_hz: profile.f_min.max(1),
            profile,
            total_steps,
            tick,
            steps_done: 0.0,
        }
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Estimated steps emitted so far.
    #[inline]
    pub fn steps_done(&self) -> f32 {
        self.steps_done
    }

    /// Frequency currently driven, in Hz.
    #[inline]
    pub fn current_frequency(&self) -> u32 {
        self.current_hz
    }

    /// Check whether the ramp should stop.
    ///
    /// The ramp ends once one more tick at the current frequency would reach
    /// the total, leaving the remainder to the exact burst.
    #[inline]
    pub fn is_complete(&self) -> bool {
        let lookahead = self.current_hz as f32 * self.tick.as_secs_f32();
        self.steps_done + lookahead >= self.total_steps as f32
    }

    /// Sample the profile at the current estimated progress.
    ///
    /// The returned frequency becomes the one credited by the next [`advance`](Self::advance).
    pub fn next_frequency(&mut self) -> u32 {
        self.current_hz = self
            .profile
            .frequency_at(self.steps_done, i64::from(self.total_steps));
        self.current_hz
    }

    /// Credit `elapsed` wall-clock time at the current frequency.
    pub fn advance(&mut self, elapsed: Duration) {
        self.steps_done += self.current_hz as f32 * elapsed.as_secs_f32();
    }

    /// Split the move into ramp steps and the burst still owed.
    pub fn correction(&self) -> Correction {
        let estimated = libm::roundf(self.steps_done).max(0.0) as u32;
        let ramp_steps = estimated.min(self.total_steps);
        Correction {
            ramp_steps,
            burst_steps: self.total_steps - ramp_steps,
            burst_frequency: self.current_hz.clamp(1, MAX_BURST_FREQUENCY_HZ),
        }
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total_steps == 0 {
            1.0
        } else {
            (self.steps_done / self.total_steps as f32).min(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(2);

    fn run(total: u32, profile: VelocityProfile, dt: impl Fn(u32) -> Duration) -> RampExecutor {
        let mut ramp = RampExecutor::new(profile, total, TICK);
        let mut tick = 0;
        while !ramp.is_complete() {
            ramp.next_frequency();
            ramp.advance(dt(tick));
            tick += 1;
        }
        ramp
    }

    #[test]
    fn test_exact_count_law() {
        let profile = VelocityProfile::new(50, 400);
        for total in [1u32, 17, 4096] {
            let ramp = run(total, profile, |_| TICK);
            let c = ramp.correction();
            assert_eq!(c.ramp_steps + c.burst_steps, total, "total = {}", total);
        }
    }

    #[test]
    fn test_exact_count_law_with_jitter() {
        let profile = VelocityProfile::new(500, 40_000);
        for total in [1u32, 17, 4096] {
            // Oversleeping ticks make the ramp overshoot its estimate.
            let ramp = run(total, profile, |i| TICK * (1 + i % 5));
            let c = ramp.correction();
            assert_eq!(c.ramp_steps + c.burst_steps, total, "total = {}", total);
            assert!(c.ramp_steps <= total);
        }
    }

    #[test]
    fn test_burst_reuses_last_frequency() {
        let profile = VelocityProfile::new(50, 400);
        let ramp = run(17, profile, |_| TICK);
        let c = ramp.correction();
        assert_eq!(c.burst_frequency, ramp.current_frequency());
        assert!(c.burst_frequency >= 50 && c.burst_frequency <= 400);
    }

    #[test]
    fn test_single_step_move() {
        let profile = VelocityProfile::new(50, 400);
        let ramp = run(1, profile, |_| TICK);
        let c = ramp.correction();
        assert_eq!(c.ramp_steps + c.burst_steps, 1);
    }

    #[test]
    fn test_aborted_ramp_owes_remainder() {
        let profile = VelocityProfile::new(50, 400);
        let mut ramp = RampExecutor::new(profile, 4096, TICK);
        for _ in 0..10 {
            ramp.next_frequency();
            ramp.advance(TICK);
        }

        assert!(!ramp.is_complete());
        let c = ramp.correction();
        assert!(c.ramp_steps < 10);
        assert_eq!(c.burst_steps, 4096 - c.ramp_steps);
        assert!(ramp.progress() < 0.01);
    }

    #[test]
    fn test_zero_length_ramp() {
        let ramp = RampExecutor::new(VelocityProfile::new(50, 400), 0, TICK);
        assert!(ramp.is_complete());
        assert_eq!(ramp.correction().burst_steps, 0);
        assert_eq!(ramp.progress(), 1.0);
    }
}

//! Playback clock
//!
//! The clock only knows about time: it is advanced by the caller through [`Playback::tick()`]
//! with the real time elapsed since the previous frame, and everything else is derived from
//! `time / duration`.  Playback does not loop, reaching the end pauses it.
//!
//! Inputs are never rejected, they are clamped into their valid range (or ignored when NaN).
//!

use tracing::{debug, trace};

/// Default duration of a playback in seconds
pub const DEFAULT_DURATION: f64 = 30.;
/// Shortest allowed duration in seconds
pub const MIN_DURATION: f64 = 1.;
pub const DEFAULT_SPEED: f64 = 1.;
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 5.;

/// What a call to `tick()` did.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tick {
    /// Paused or nothing to add
    Idle,
    /// Time moved forward
    Advanced,
    /// Time reached the end and playback is now paused
    Finished,
}

/// Playback state, only mutated through the transitions below.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    playing: bool,
    time: f64,
    duration: f64,
    speed: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Playback {
    /// Paused at 0, normal speed.  `duration` is clamped like in `set_duration()`.
    ///
    pub fn new(duration: f64) -> Self {
        let mut pb = Self {
            playing: false,
            time: 0.,
            duration: DEFAULT_DURATION,
            speed: DEFAULT_SPEED,
        };
        pb.set_duration(duration);
        pb
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current time in seconds, within `[0, duration]`
    ///
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Fraction of the playback done, within `[0, 1]`
    ///
    #[inline]
    pub fn progress(&self) -> f64 {
        self.time / self.duration
    }

    /// Is the time cursor at the end?
    ///
    #[inline]
    pub fn at_end(&self) -> bool {
        self.time >= self.duration
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Keep the current time
    ///
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pause and rewind to 0.
    ///
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.;
    }

    /// Same as `stop()` as far as the clock goes, see [`Replay::reset()`](crate::Replay::reset)
    /// for the pose.
    ///
    pub fn reset(&mut self) {
        self.stop();
    }

    /// Move the cursor to `time`, clamped into `[0, duration]`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn seek(&mut self, time: f64) {
        if time.is_nan() {
            return;
        }
        self.time = time.clamp(0., self.duration);
        trace!("now at {}", self.time);
    }

    /// Set the speed multiplier, clamped into `[MIN_SPEED, MAX_SPEED]`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            return;
        }
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        trace!("speed is {}", self.speed);
    }

    /// Set the duration to at least `MIN_DURATION`, keeping the time cursor inside it.
    ///
    #[tracing::instrument(skip(self))]
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            return;
        }
        self.duration = duration.max(MIN_DURATION);
        self.time = self.time.min(self.duration);
        trace!("duration is {}", self.duration);
    }

    /// Advance the clock by `delta` real seconds times the speed multiplier.
    ///
    /// Nothing happens when paused or when `delta` is not a positive finite number.
    ///
    pub fn tick(&mut self, delta: f64) -> Tick {
        if !self.playing || !delta.is_finite() || delta <= 0. {
            return Tick::Idle;
        }

        self.time = (self.time + delta * self.speed).min(self.duration);
        if self.at_end() {
            debug!("end of playback at {}", self.time);
            self.playing = false;
            return Tick::Finished;
        }
        Tick::Advanced
    }
}

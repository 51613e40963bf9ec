//! Replay session
//!
//! A `Replay` owns the playback clock and the path built from the current waypoints, and hands
//! out one [`Frame`] per call to [`Replay::advance()`].  Whatever schedules frames (a timer, a
//! render loop, a test with synthetic time) calls `advance()` with the elapsed time and stops
//! calling it once the clock is no longer playing; [`Replay::run()`] is such a loop, driven by a
//! fixed step.
//!

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{EngineError, GeoPoint, Path, Playback, SampledPose, Tick};

/// Everything a renderer needs for one frame.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Playback time in seconds
    pub time: f64,
    /// Fraction of the path travelled
    pub progress: f64,
    pub playing: bool,
    /// Index of the waypoint the vehicle is leaving, 0 without a pose
    pub waypoint: usize,
    /// `None` when the path has nothing to travel along
    pub pose: Option<SampledPose>,
}

/// One playback session over one path.
///
#[derive(Clone, Debug, Default)]
pub struct Replay {
    playback: Playback,
    path: Path,
    /// Set by `reset()`, no pose until the clock is moved again
    cleared: bool,
}

impl Replay {
    pub fn new<T: AsRef<GeoPoint>>(waypoints: &[T], playback: Playback) -> Self {
        Self {
            playback,
            path: Path::build(waypoints),
            cleared: false,
        }
    }

    /// Replace the waypoints, the clock is left as is.
    ///
    #[tracing::instrument(skip_all)]
    pub fn set_waypoints<T: AsRef<GeoPoint>>(&mut self, waypoints: &[T]) {
        self.path = Path::build(waypoints);
        trace!("path rebuilt, {} segments", self.path.len());
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn play(&mut self) {
        self.cleared = false;
        self.playback.play();
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn stop(&mut self) {
        self.cleared = false;
        self.playback.stop();
    }

    /// Like `stop()`, and also drop the pose: heading is 0 and there is no pose until the next
    /// `play()` or `seek()`.
    ///
    pub fn reset(&mut self) {
        self.playback.reset();
        self.cleared = true;
    }

    /// Was the session reset and not moved since?
    ///
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn seek(&mut self, time: f64) {
        if !time.is_nan() {
            self.cleared = false;
        }
        self.playback.seek(time);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.playback.set_speed(speed);
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.playback.set_duration(duration);
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.playback.progress()
    }

    /// Current pose, recomputed from the clock.  `None` after `reset()`.
    ///
    #[inline]
    pub fn pose(&self) -> Option<SampledPose> {
        if self.cleared {
            return None;
        }
        self.path.sample(self.playback.progress())
    }

    /// Heading of the current pose, 0 when there is none.
    ///
    pub fn heading(&self) -> f64 {
        self.pose().map_or(0., |p| p.heading)
    }

    /// Waypoint being left, 0 when there is no pose.
    ///
    pub fn current_waypoint_index(&self) -> usize {
        self.pose().map_or(0, |p| p.segment)
    }

    /// Snapshot of the current state.
    ///
    pub fn frame(&self) -> Frame {
        let pose = self.pose();
        Frame {
            time: self.playback.time(),
            progress: self.playback.progress(),
            playing: self.playback.is_playing(),
            waypoint: pose.map_or(0, |p| p.segment),
            pose,
        }
    }

    /// Move the clock by `delta` seconds of real time and return the new frame.
    ///
    pub fn advance(&mut self, delta: f64) -> Frame {
        match self.playback.tick(delta) {
            Tick::Idle => (),
            Tick::Advanced => self.cleared = false,
            Tick::Finished => {
                self.cleared = false;
                debug!("replay finished");
            }
        }
        self.frame()
    }

    /// Drive the replay with a fixed `step` of real time until the clock stops playing, handing
    /// every frame to `sink`.  The clock must have been started with `play()`, otherwise
    /// nothing is emitted.
    ///
    /// Returns the number of frames emitted.
    ///
    #[tracing::instrument(skip(self, sink))]
    pub fn run<F>(&mut self, step: f64, mut sink: F) -> Result<usize, EngineError>
    where
        F: FnMut(&Frame),
    {
        self.try_run(step, |f| {
            sink(f);
            Ok::<(), EngineError>(())
        })
    }

    /// Same as [`Replay::run()`] with a sink that can fail, the first error stops the replay
    /// and is returned.
    ///
    #[tracing::instrument(skip(self, sink))]
    pub fn try_run<F, E>(&mut self, step: f64, mut sink: F) -> Result<usize, E>
    where
        F: FnMut(&Frame) -> Result<(), E>,
        E: From<EngineError>,
    {
        if !step.is_finite() || step <= 0. {
            return Err(EngineError::BadStep(step).into());
        }

        let mut count = 0;
        while self.playback.is_playing() {
            let frame = self.advance(step);
            sink(&frame)?;
            count += 1;
        }
        info!("{count} frames");
        Ok(count)
    }
}

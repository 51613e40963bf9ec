//! Configuration for `pathctl`.
//!
//! ```hcl
//! version = 1
//!
//! cruise_speed = 15.0
//!
//! playback {
//!   duration = 30.0
//!   speed    = 1.0
//!   fps      = 30
//! }
//! ```
//!
//! Every field but `version` can be left out.
//!

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use waypath_common::{ConfigError, ConfigFile, Versioned, TAG};
use waypath_engine::{DEFAULT_CRUISE_SPEED, DEFAULT_DURATION, DEFAULT_SPEED};

use crate::Status;

/// Default configuration filename
pub const CONFIG: &str = "pathctl.hcl";

/// Config version
const CVERSION: usize = 1;

/// Default frame rate
pub const DEFAULT_FPS: u32 = 30;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PathctlConfig {
    /// Version of the file format
    pub version: usize,
    /// Speed in m/s for waypoints without one
    #[serde(default = "default_cruise")]
    pub cruise_speed: f64,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_cruise() -> f64 {
    DEFAULT_CRUISE_SPEED
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            speed: DEFAULT_SPEED,
            fps: DEFAULT_FPS,
        }
    }
}

impl Default for PathctlConfig {
    fn default() -> Self {
        Self {
            version: CVERSION,
            cruise_speed: DEFAULT_CRUISE_SPEED,
            playback: PlaybackConfig::default(),
        }
    }
}

impl Versioned for PathctlConfig {
    const CURRENT: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}

impl PathctlConfig {
    /// Load either the given file or the default one, built-in values if there is none.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Self, Status> {
        let cfg = ConfigFile::<PathctlConfig>::load(TAG, CONFIG, fname).map_err(|e| match e {
            ConfigError::NotFound(f) => Status::MissingConfig(f),
            ConfigError::BadFileVersion(found, _) => Status::BadFileVersion(found),
            e => Status::BadConfig(e.to_string()),
        })?;
        if let Some(src) = cfg.source() {
            debug!("config read from {src:?}");
        }
        Ok(cfg.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    fn cfg_file(s: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{s}").unwrap();
        f
    }

    #[test]
    fn test_config_full() {
        let f = cfg_file(
            r##"
version = 1
cruise_speed = 12.5
playback {
  duration = 60.0
  speed    = 2.0
  fps      = 10
}
"##,
        );
        let cfg = PathctlConfig::load(Some(f.path())).unwrap();
        assert_eq!(12.5, cfg.cruise_speed);
        assert_eq!(60., cfg.playback.duration);
        assert_eq!(2., cfg.playback.speed);
        assert_eq!(10, cfg.playback.fps);
    }

    #[test]
    fn test_config_partial() {
        let f = cfg_file("version = 1\nplayback {\n  fps = 5\n}\n");
        let cfg = PathctlConfig::load(Some(f.path())).unwrap();
        assert_eq!(DEFAULT_CRUISE_SPEED, cfg.cruise_speed);
        assert_eq!(DEFAULT_DURATION, cfg.playback.duration);
        assert_eq!(5, cfg.playback.fps);
    }

    #[rstest]
    #[case("version = 2\n")]
    #[case("version = 0\n")]
    fn test_config_bad_version(#[case] s: &str) {
        let f = cfg_file(s);
        let r = PathctlConfig::load(Some(f.path()));
        assert!(matches!(r, Err(Status::BadFileVersion(_))));
    }

    #[test]
    fn test_config_missing_explicit() {
        let r = PathctlConfig::load(Some(Path::new("/nonexistent/pathctl.hcl")));
        assert!(matches!(r, Err(Status::MissingConfig(_))));
    }

    #[test]
    fn test_config_garbage() {
        let f = cfg_file("version = = 1\n");
        let r = PathctlConfig::load(Some(f.path()));
        assert!(matches!(r, Err(Status::BadConfig(_))));
    }
}

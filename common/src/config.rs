//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the different
//! `waypath` tools.  The engine is configuration-struct neutral: it stores the base directory and
//! `load()` reads either the file given on the command line or the default one, falling back to
//! `T::default()` when there is no default file at all.
//!
//! The inner configuration is available with `.inner()` or `.into_inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{makepath, Versioned};

/// Main name for the directory base
pub const TAG: &str = "waypath";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown config file {0}")]
    NotFound(String),
    #[error("Can not read {0}: {1}")]
    Unreadable(String, String),
    #[error("Bad config file: {0}")]
    Parse(String),
    #[error("Bad config file version {0}, need {1}")]
    BadFileVersion(usize, usize),
}

/// A loaded configuration with where it came from.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// File actually read, `None` for built-in defaults
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = makepath!(base.home_dir(), ".config", tag);

                #[cfg(windows)]
                let base = makepath!(base.data_local_dir(), tag);

                base
            }
            None => {
                warn!("No home directory, using current one");
                makepath!(".", tag)
            }
        };
        debug!("base = {basedir:?}");
        ConfigFile {
            tag: String::from(tag),
            basedir,
            source: None,
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file named `name`
    ///
    pub fn default_file(&self, name: &str) -> PathBuf {
        self.config_path().join(name)
    }

    /// Project tag
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Load the configuration and return it in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - `name` in the default basedir (based on $HOME or $LOCALAPPDATA)
    /// - `T::default()` if there is no such file
    ///
    #[tracing::instrument]
    pub fn load(tag: &str, name: &str, fname: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = ConfigFile::<T>::new(tag);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::NotFound(fname.display().to_string()));
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file(name);
                if !def.exists() {
                    debug!("no {def:?}, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?} from {:?}", cfg.config_path());

        let data = fs::read_to_string(&fname)
            .map_err(|e| ConfigError::Unreadable(fname.display().to_string(), e.to_string()))?;
        cfg.inner = Self::parse(&data)?;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// Parse a configuration from an HCL string and check its version.
    ///
    pub fn parse(data: &str) -> Result<T, ConfigError> {
        debug!("string data = {data}");

        let inner: T = hcl::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::CURRENT {
            return Err(ConfigError::BadFileVersion(inner.version(), T::CURRENT));
        }
        Ok(inner)
    }

    /// File the configuration was read from, if any
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Bar {
        version: usize,
        name: String,
        #[serde(default)]
        speed: f64,
    }

    impl Default for Bar {
        fn default() -> Self {
            Bar {
                version: Self::CURRENT,
                name: "default".to_string(),
                speed: 1.,
            }
        }
    }

    impl Versioned for Bar {
        const CURRENT: usize = 2;

        fn version(&self) -> usize {
            self.version
        }
    }

    #[test]
    fn test_config_parse() {
        let b = ConfigFile::<Bar>::parse("version = 2\nname = \"foo\"\nspeed = 2.5\n").unwrap();
        assert_eq!("foo", b.name);
        assert_eq!(2.5, b.speed);
    }

    #[rstest]
    #[case("version = 1\nname = \"foo\"\n", 1)]
    #[case("version = 3\nname = \"foo\"\n", 3)]
    fn test_config_bad_version(#[case] data: &str, #[case] found: usize) {
        let r = ConfigFile::<Bar>::parse(data);
        assert!(matches!(r, Err(ConfigError::BadFileVersion(v, 2)) if v == found));
    }

    #[test]
    fn test_config_bad_syntax() {
        let r = ConfigFile::<Bar>::parse("version = \n");
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_load_explicit() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "version = 2\nname = \"from file\"").unwrap();

        let cfg = ConfigFile::<Bar>::load(TAG, "bar.hcl", Some(f.path())).unwrap();
        assert_eq!("from file", cfg.inner().name);
        assert_eq!(Some(f.path()), cfg.source());
    }

    #[test]
    fn test_config_load_explicit_missing() {
        let r = ConfigFile::<Bar>::load(TAG, "bar.hcl", Some(Path::new("/nonexistent/bar.hcl")));
        assert!(matches!(r, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_default_missing() {
        let cfg = ConfigFile::<Bar>::load(TAG, "no-such-file-ever.hcl", None).unwrap();
        assert_eq!(Bar::default(), cfg.into_inner());
    }

    #[test]
    fn test_config_paths() {
        let cfg = ConfigFile::<Bar>::load(TAG, "no-such-file-ever.hcl", None).unwrap();
        assert_eq!(TAG, cfg.tag());
        assert!(cfg.config_path().ends_with(TAG));
        assert!(cfg.default_file("x.hcl").ends_with("x.hcl"));
        assert_eq!(None, cfg.source());
    }

    #[test]
    fn test_makepath() {
        let p: PathBuf = makepath!("a", "b", "c.hcl");
        assert_eq!(Path::new("a/b/c.hcl"), p);
    }
}

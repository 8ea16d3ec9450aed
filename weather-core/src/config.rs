use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::WeatherError;

/// Name of the key holding the WeatherAPI.com credential.
pub const API_KEY_VAR: &str = "WEATHER_API";

/// Default location of the dotenv file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".env";

/// Credentials read from a local dotenv file.
#[derive(Clone)]
pub struct Config {
    api_key: String,
}

impl Config {
    /// Build a config from an already known key. Empty keys are rejected.
    pub fn new(api_key: impl Into<String>) -> Option<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() { None } else { Some(Self { api_key }) }
    }

    /// Load the dotenv file at `path` and extract the API key.
    ///
    /// The process environment is left untouched: the file is parsed into
    /// pairs and only `WEATHER_API` is picked out of it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WeatherError> {
        let path = path.as_ref();
        let config_file = |source| WeatherError::ConfigFile { path: path.to_path_buf(), source };

        let mut api_key = None;
        for item in dotenv::from_path_iter(path).map_err(config_file)? {
            let (key, value) = item.map_err(config_file)?;
            if key == API_KEY_VAR {
                api_key = Some(value);
            }
        }

        tracing::debug!(path = %path.display(), found = api_key.is_some(), "loaded config file");

        api_key
            .and_then(Self::new)
            .ok_or_else(|| WeatherError::MissingApiKey { path: path.to_path_buf() })
    }

    /// Path of the default config file.
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").field("api_key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_api_key_from_file() {
        let file = env_file("# credentials\nOTHER=1\nWEATHER_API=abc123\n");
        let cfg = Config::load(file.path()).expect("config should load");
        assert_eq!(cfg.api_key(), "abc123");
    }

    #[test]
    fn quoted_values_are_unquoted() {
        let file = env_file("WEATHER_API=\"quoted-key\"\n");
        let cfg = Config::load(file.path()).expect("config should load");
        assert_eq!(cfg.api_key(), "quoted-key");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Config::load(dir.path().join(".env")).unwrap_err();
        assert!(matches!(err, WeatherError::ConfigFile { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn absent_key_is_rejected() {
        let file = env_file("SOMETHING_ELSE=value\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey { .. }));
    }

    #[test]
    fn empty_key_is_rejected() {
        let file = env_file("WEATHER_API=\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey { .. }));

        assert!(Config::new("   ").is_none());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg = Config::new("secret").expect("non-empty key");
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("secret"));
    }
}

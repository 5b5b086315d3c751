use std::path::{Path, PathBuf};

use cartarm_core::{CartGeometry, RawParameters};

#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    Io(PathBuf, std::io::Error),
    /// Configuration file is not valid TOML.
    Parse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, error) => write!(f, "{}: i/o error: {}", path.display(), error),
            Self::Parse(path, error) => write!(f, "{}: parse error: {}", path.display(), error),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Viewer configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cart dimensions.
    pub geometry: CartGeometry,
    /// Initial slider positions.
    pub parameters: RawParameters,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Load the first configuration file that exists.
    ///
    /// Returns the default configuration if none of the paths exist.
    pub fn try_from_file<P: AsRef<Path>>(paths: Vec<P>) -> Result<Self, ConfigError> {
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

            log::debug!("Using configuration {}", path.display());

            return Self::from_toml(path, &content);
        }

        Ok(Self::default())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Axle: {:.2}; Mast: {:.2}; Wheel radius: {:.2}; Initial: a={} b={} c={} d={} e={}",
            self.geometry.axle_length,
            self.geometry.mast_length,
            self.geometry.wheel_radius,
            self.parameters.a,
            self.parameters.b,
            self.parameters.c,
            self.parameters.d,
            self.parameters.e,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            Path::new("cartarm.toml"),
            r#"
            [geometry]
            mast_length = 0.5

            [parameters]
            c = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.geometry.mast_length, 0.5);
        assert_eq!(config.geometry.axle_length, 0.4);
        assert_eq!(config.parameters.c, 90);
        assert_eq!(config.parameters.b, 60);
    }

    #[test]
    fn test_empty() {
        let config = Config::from_toml(Path::new("cartarm.toml"), "").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml(Path::new("cartarm.toml"), "[geometry\n");

        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_missing_files() {
        let config = Config::try_from_file(vec!["/nonexistent/cartarm.toml"]).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("cartarm-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[parameters]\na = -100\n").unwrap();

        let config = Config::try_from_file(vec![
            Path::new("/nonexistent/cartarm.toml"),
            path.as_path(),
        ]);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().parameters.a, -100);
    }
}

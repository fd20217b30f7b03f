use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while loading a TOML configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read from disk.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for the expected shape.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Reads and deserializes a TOML file into `T`.
///
/// # Arguments
/// * `path` - Location of the TOML file.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigFileError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        months: Vec<u32>,
    }

    #[test]
    fn loads_valid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"spy\"\nmonths = [10, 4]").unwrap();

        let sample: Sample = load_toml(file.path()).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "spy".into(),
                months: vec![10, 4]
            }
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_toml::<Sample>(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        let err = load_toml::<Sample>(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

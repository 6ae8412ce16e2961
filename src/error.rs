use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FillError>;

#[derive(Error, Debug)]
pub enum FillError {
    // Filesystem errors carry the path that failed; the cause stays in `source`
    #[error("IO error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FillError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FillError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for FillError {
    fn from(err: config::ConfigError) -> Self {
        FillError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn missing_template() -> FillError {
        FillError::io(
            "missing/template.sql",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        )
    }

    #[test]
    fn test_io_error_names_path() {
        let err = missing_template();
        assert_eq!(err.to_string(), "IO error on missing/template.sql");
        assert_eq!(err.source().map(|s| s.to_string()), Some("not found".to_string()));
    }

    #[test]
    fn test_error_chain_prints_cause_once() {
        let err = anyhow::Error::new(missing_template()).context("Failed to generate scripts");
        let chain = format!("{:#}", err);
        assert_eq!(
            chain,
            "Failed to generate scripts: IO error on missing/template.sql: not found"
        );
        assert_eq!(chain.matches("not found").count(), 1);
    }
}

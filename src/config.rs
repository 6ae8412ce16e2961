use crate::aggregate::ClientInvocation;
use crate::generator::Options;
use crate::{FillError, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for introns-db-fill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

/// Input template and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub template: PathBuf,
    pub output_dir: PathBuf,
    /// Aggregate file names; relative names live in `output_dir`
    pub client_script: PathBuf,
    pub create_script: PathBuf,
    pub drop_script: PathBuf,
}

/// Database client written into the bootstrap shell script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub command: String,
    pub user: String,
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("iterative_create_database.sql"),
            output_dir: PathBuf::from("iterative_creations"),
            client_script: PathBuf::from("create_all_tables.sh"),
            create_script: PathBuf::from("create_databases.sql"),
            drop_script: PathBuf::from("drop_databases.sql"),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let client = ClientInvocation::default();
        Self {
            command: client.command,
            user: client.user,
            password: client.password,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(), // pretty, compact, json
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (INTRONS_*, then MYSQL_USER / MYSQL_PWD)
    /// 2. config.toml file (if exists)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let dir = std::env::current_dir().map_err(|e| FillError::io(".", e))?;
        Self::load_from_dir(&dir)
    }

    /// Load configuration from a specific directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_file = dir.join("config.toml");
        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        // INTRONS_PATHS__OUTPUT_DIR -> paths.output_dir
        builder = builder.add_source(
            Environment::with_prefix("INTRONS")
                .prefix_separator("_")
                .separator("__"),
        );

        let mut result: Config = builder.build()?.try_deserialize()?;
        result.merge_env_vars();

        Ok(result)
    }

    /// Variables the mysql client itself understands
    fn merge_env_vars(&mut self) {
        if let Ok(user) = std::env::var("MYSQL_USER") {
            self.client.user = user;
        }
        if let Ok(password) = std::env::var("MYSQL_PWD") {
            self.client.password = password;
        }
    }

    /// Generation options with aggregate paths resolved against the output directory
    pub fn options(&self) -> Options {
        let output_dir = self.paths.output_dir.clone();
        Options {
            client_script: output_dir.join(&self.paths.client_script),
            create_script: output_dir.join(&self.paths.create_script),
            drop_script: output_dir.join(&self.paths.drop_script),
            output_dir,
            client: ClientInvocation {
                command: self.client.command.clone(),
                user: self.client.user.clone(),
                password: self.client.password.clone(),
            },
        }
    }
}

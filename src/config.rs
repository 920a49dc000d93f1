use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};
use validator::{Validate, ValidationError};

pub const DEFAULT_INVENTORY_URL: &str = "https://prism.gutools.co.uk";
pub const PLACEHOLDER: &str = "TODO";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("File {0} not found")]
    FileNotFound(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Validation errors: {0}")]
    ValidationError(String),

    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}

/// Values written into generated modules where the real infrastructure
/// identifiers still have to be filled in by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Placeholders {
    #[validate(length(min = 1))]
    pub artifact_bucket: String,

    #[validate(length(min = 1))]
    pub private_config_bucket: String,

    #[validate(length(min = 1))]
    pub log_stream: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        return Self {
            artifact_bucket: PLACEHOLDER.to_string(),
            private_config_bucket: PLACEHOLDER.to_string(),
            log_stream: PLACEHOLDER.to_string(),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    #[validate(url)]
    pub inventory_url: String,

    #[validate(length(min = 1), custom = "validate_account_names")]
    pub accounts_to_migrate: Vec<String>,

    #[validate]
    pub placeholders: Placeholders,

    /// When set, every generated module is written to `<output_dir>/<Name>.ts`
    /// instead of standard output.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            inventory_url: DEFAULT_INVENTORY_URL.to_string(),
            accounts_to_migrate: vec![String::from("deploy-tools")],
            placeholders: Placeholders::default(),
            output_dir: None,
        };
    }
}

impl Config {
    pub fn should_migrate(&self, account_name: &str) -> bool {
        self.accounts_to_migrate
            .iter()
            .any(|name| name == account_name)
    }
}

pub fn parse(path: &PathBuf) -> Result<Config, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(raw_contents) => Ok(raw_contents),
        Err(error) => match error.kind() {
            io::ErrorKind::NotFound => Err(Error::FileNotFound(path.display().to_string())),
            _ => Err(Error::Unknown(error.to_string())),
        },
    }?;

    let config: Config = match serde_yaml::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(error) => Err(Error::ParsingError(error.to_string())),
    }?;

    match config.validate() {
        Ok(_) => (),
        Err(error) => return Err(Error::ValidationError(error.to_string())),
    }

    return Ok(config);
}

/// Like [`parse`], but a missing file falls back to [`Config::default`].
pub fn load(path: &PathBuf) -> Result<Config, Error> {
    match parse(path) {
        Err(Error::FileNotFound(location)) => {
            tracing::debug!(%location, "no config file, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}

fn validate_account_names(names: &Vec<String>) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(ValidationError::new(
            "Account names to migrate must not be blank",
        ));
    }

    return Ok(());
}

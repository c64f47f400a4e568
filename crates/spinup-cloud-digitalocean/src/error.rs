//! DigitalOcean provider error types

use spinup_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("DIGITALOCEAN_TOKEN is not set. Create a personal access token and export it first")]
    MissingToken,

    #[error("Invalid droplet id '{0}' (droplet ids are numeric)")]
    InvalidDropletId(String),

    #[error("SSH key not found: {0}")]
    SshKeyNotFound(String),

    #[error("Droplet not found: {0}")]
    DropletNotFound(u64),

    #[error("DigitalOcean API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;

impl From<DigitalOceanError> for CloudError {
    fn from(err: DigitalOceanError) -> Self {
        let message = err.to_string();
        match err {
            DigitalOceanError::MissingToken => CloudError::Configuration(message),
            DigitalOceanError::InvalidDropletId(_) => CloudError::Validation(message),
            DigitalOceanError::SshKeyNotFound(_) | DigitalOceanError::DropletNotFound(_) => {
                CloudError::NotFound(message)
            }
            DigitalOceanError::Http(_) => CloudError::Transport(message),
            DigitalOceanError::Api { .. } | DigitalOceanError::Json(_) => CloudError::Api(message),
        }
    }
}

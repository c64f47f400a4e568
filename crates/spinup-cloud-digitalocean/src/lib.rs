//! DigitalOcean provider for spinup
//!
//! This crate implements the ComputeProvider trait against the DigitalOcean
//! REST API v2, managing droplets and resolving account SSH keys.
//!
//! # Requirements
//!
//! - `DIGITALOCEAN_TOKEN` env var holding a personal access token with
//!   read/write scope
//!
//! # Example
//!
//! ```ignore
//! use spinup_cloud::{ComputeProvider, CreateRequest};
//! use spinup_cloud_digitalocean::DigitalOceanProvider;
//!
//! let provider = DigitalOceanProvider::from_env()?;
//!
//! let instance = provider
//!     .create(&CreateRequest {
//!         name: "test-1".into(),
//!         region: "nyc1".into(),
//!         image: "ubuntu-22-04-x64".into(),
//!         size: "s-1vcpu-1gb".into(),
//!         ssh_key: "ops".into(),
//!     })
//!     .await?;
//!
//! provider.delete(&instance.id).await?;
//! ```

pub mod api;
pub mod error;
pub mod provider;

pub use api::{CreateDropletRequest, DigitalOceanConfig, Droplet, DropletsApi, SshKey};
pub use error::{DigitalOceanError, Result};
pub use provider::DigitalOceanProvider;

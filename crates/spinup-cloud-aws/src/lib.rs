//! AWS EC2 provider for spinup
//!
//! This crate implements the ComputeProvider trait on top of `aws-sdk-ec2`:
//! `RunInstances` + `CreateTags` for creation, `DescribeInstances` for
//! reads, and `TerminateInstances` followed by a poll to a terminal state
//! for deletion.
//!
//! # Requirements
//!
//! Credentials and region come from the standard AWS chain (environment,
//! shared config/credentials files, instance metadata).
//!
//! # Example
//!
//! ```ignore
//! use spinup_cloud::ComputeProvider;
//! use spinup_cloud_aws::AwsProvider;
//!
//! let provider = AwsProvider::from_env(Some("us-east-1".into())).await;
//! let instance = provider.describe("i-0abc123").await?;
//! ```

pub mod error;
pub mod provider;

pub use error::{AwsError, Result};
pub use provider::AwsProvider;

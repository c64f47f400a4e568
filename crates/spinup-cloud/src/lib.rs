//! spinup cloud abstraction
//!
//! This crate defines the provider abstraction shared by all spinup cloud
//! backends: the [`ComputeProvider`] trait, the [`Instance`] descriptor, the
//! shared error taxonomy, and the bounded polling loop used to wait for
//! asynchronous remote state transitions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   spinup CLI                     │
//! │              (spinup create / rm)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                spinup-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │         Provider Abstraction              │   │
//! │  │  trait ComputeProvider { ... }            │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │  Instance    │  │  Poll Loop   │             │
//! │  └──────────────┘  └──────────────┘             │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ digitalocean  │ │      aws      │
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod error;
pub mod instance;
pub mod poll;
pub mod provider;

// Re-exports
pub use error::{CloudError, Result};
pub use instance::{CreateRequest, Instance, InstanceState};
pub use poll::{PollConfig, PollInterval, poll_until_ready, wait_for_network};
pub use provider::ComputeProvider;

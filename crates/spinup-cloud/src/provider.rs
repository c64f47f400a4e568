//! Compute provider trait definition

use crate::error::Result;
use crate::instance::{CreateRequest, Instance};
use async_trait::async_trait;

/// Cloud compute provider abstraction
///
/// All backends (DigitalOcean, AWS, ...) implement this trait to expose the
/// same capability set: create one instance, read its current descriptor,
/// delete it by id. Adding a provider means implementing these three
/// operations, nothing else.
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// Provider name as it appears on the command line (e.g. "digitalocean")
    fn name(&self) -> &str;

    /// Create one instance and return its descriptor with the assigned id.
    ///
    /// Validates that every request parameter is non-empty before issuing
    /// any remote call. The returned descriptor usually has no public
    /// address yet; use [`wait_for_network`](crate::wait_for_network) to
    /// poll until one is assigned.
    async fn create(&self, request: &CreateRequest) -> Result<Instance>;

    /// Read the current descriptor for an instance.
    ///
    /// The id is validated against the vendor's id format (numeric for
    /// DigitalOcean, instance-id string for AWS) before any remote call.
    async fn describe(&self, id: &str) -> Result<Instance>;

    /// Delete/terminate an instance.
    ///
    /// Returns once the vendor has acknowledged the deletion. For AWS this
    /// includes waiting for the instance to settle in a terminal state.
    async fn delete(&self, id: &str) -> Result<()>;
}

//! AWS provider error types

use aws_sdk_ec2::error::{DisplayErrorContext, SdkError};
use spinup_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Invalid instance id '{0}'")]
    InvalidInstanceId(String),

    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    #[error("EC2 returned no instance for the request")]
    EmptyReservation,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("EC2 API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AwsError>;

/// Fold an SDK error into the provider taxonomy. Dispatch and timeout
/// failures never reached the service; everything else did.
pub(crate) fn from_sdk<E, R>(err: SdkError<E, R>) -> AwsError
where
    SdkError<E, R>: std::error::Error,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => AwsError::Transport(message),
        _ => AwsError::Api(message),
    }
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        let message = err.to_string();
        match err {
            AwsError::InvalidInstanceId(_) => CloudError::Validation(message),
            AwsError::InstanceNotFound(_) => CloudError::NotFound(message),
            AwsError::Transport(_) => CloudError::Transport(message),
            AwsError::EmptyReservation | AwsError::Api(_) => CloudError::Api(message),
        }
    }
}

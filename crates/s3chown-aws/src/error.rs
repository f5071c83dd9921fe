//! Mapping of AWS SDK errors into store errors.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

/// Extracts the S3 error code and message from an AWS SDK error.
///
/// For service errors (S3 API responses), returns the S3 error code
/// (e.g. "AccessDenied") and the human-readable message from the response.
/// For other error types (network, timeout, construction failure), returns
/// "N/A" as the code and the full error description as the message.
pub(crate) fn sdk_error_details<E, R>(err: &SdkError<E, R>) -> (String, String)
where
    E: std::fmt::Display + ProvideErrorMetadata,
    R: std::fmt::Debug,
{
    if let Some(service_err) = err.as_service_error() {
        (
            service_err.code().unwrap_or("unknown").to_owned(),
            service_err.message().unwrap_or("no message").to_owned(),
        )
    } else {
        ("N/A".to_owned(), err.to_string())
    }
}

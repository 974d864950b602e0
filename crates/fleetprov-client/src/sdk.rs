//! Shared glue between the AWS SDK and the fleetprov error type.

use fleetprov_core::ProvisionError;

/// Flatten an SDK error and its source chain into a [`ProvisionError::Service`].
///
/// The SDK's top-level `Display` output ("dispatch failure", "service
/// error") hides the interesting part, so the full chain is appended.
pub(crate) fn sdk_error(
    operation: &'static str,
    err: impl std::error::Error + 'static,
) -> ProvisionError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ProvisionError::service(operation, message)
}

use crate::domain::envelope::ErrorCode;
use crate::particle::{ControlError, DiscoverError, ParticleClientError};
use std::time::Duration;
use thiserror::Error;

/// Every way a single invocation can fail.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("the device cloud did not answer within {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("unable to reach the device cloud: {0}")]
    TransportError(reqwest::Error),
    #[error("the device cloud sent a malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported namespace '{0}'")]
    UnsupportedNamespace(String),
    #[error("unsupported operation '{0}'")]
    UnsupportedOperation(String),
    #[error("unable to connect to the device cloud: {0}")]
    DependentServiceUnavailable(ParticleClientError),
}

impl BridgeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::UnsupportedNamespace(_) | BridgeError::UnsupportedOperation(_) => ErrorCode::UnsupportedOperation,
            BridgeError::InvalidInput(_) => ErrorCode::UnexpectedInformationReceived,
            BridgeError::Timeout(_)
            | BridgeError::TransportError(_)
            | BridgeError::MalformedResponse(_)
            | BridgeError::DependentServiceUnavailable(_) => ErrorCode::DependentServiceUnavailable,
        }
    }
}

impl From<ParticleClientError> for BridgeError {
    fn from(error: ParticleClientError) -> Self {
        match error {
            ParticleClientError::Timeout(limit) => BridgeError::Timeout(limit),
            ParticleClientError::Transport(e) => BridgeError::TransportError(e),
            ParticleClientError::MalformedResponse(reason) => BridgeError::MalformedResponse(reason),
        }
    }
}

impl From<DiscoverError> for BridgeError {
    fn from(error: DiscoverError) -> Self {
        match error {
            DiscoverError::Client(e) => e.into(),
            DiscoverError::MalformedDeviceList(e) | DiscoverError::MalformedDescriptor(e) => BridgeError::MalformedResponse(e.to_string()),
        }
    }
}

impl From<ControlError> for BridgeError {
    fn from(error: ControlError) -> Self {
        match error {
            ControlError::InvalidApplianceId(e) => BridgeError::InvalidInput(e.to_string()),
            ControlError::Unavailable(e) => BridgeError::DependentServiceUnavailable(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appliance::ApplianceIdError;
    use pretty_assertions::assert_eq;
    use std::error::Error;

    #[test]
    fn client_errors_map_one_to_one() {
        let error: BridgeError = ParticleClientError::Timeout(Duration::from_millis(3000)).into();
        assert!(matches!(error, BridgeError::Timeout(d) if d == Duration::from_millis(3000)));

        let error: BridgeError = ParticleClientError::MalformedResponse("nope".to_string()).into();
        assert!(matches!(error, BridgeError::MalformedResponse(reason) if reason == "nope"));
    }

    #[test]
    fn control_errors_map_to_input_or_unavailable() {
        let error: BridgeError = ControlError::InvalidApplianceId(ApplianceIdError::InvalidPart("".to_string())).into();
        assert_eq!(error.code(), ErrorCode::UnexpectedInformationReceived);

        let error: BridgeError = ControlError::Unavailable(ParticleClientError::Timeout(Duration::from_millis(2000))).into();
        assert!(matches!(error, BridgeError::DependentServiceUnavailable(ParticleClientError::Timeout(_))));
        assert_eq!(error.code(), ErrorCode::DependentServiceUnavailable);
    }

    #[test]
    fn dependency_failures_print_their_cause_once() {
        let error: BridgeError = ControlError::Unavailable(ParticleClientError::Timeout(Duration::from_millis(2000))).into();

        assert_eq!(error.to_string(), "unable to connect to the device cloud: no response within 2000 ms");
        assert!(error.source().is_none());
    }

    #[test]
    fn routing_errors_are_unsupported_operations() {
        assert_eq!(BridgeError::UnsupportedNamespace("Foo".to_string()).code(), ErrorCode::UnsupportedOperation);
        assert_eq!(BridgeError::UnsupportedOperation("Bar".to_string()).code(), ErrorCode::UnsupportedOperation);
    }
}

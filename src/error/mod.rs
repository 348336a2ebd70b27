//! Error definitions
//!
//! This module provides the error types surfaced by settlement assertions.

use std::any::Any;
use std::error::Error as StdError;

use parking_lot::Mutex;
use thiserror::Error;

/// Message carried by [`SettlementError::DidNotReject`].
pub const DID_NOT_REJECT: &str = "Did not reject promise as expected";

/// Why a settlement assertion did not hold.
///
/// There are two kinds of failure:
///
/// - the subject settled the wrong way ([`DidNotReject`](Self::DidNotReject)
///   from `expect_failure`, [`Rejected`](Self::Rejected) from
///   `expect_success`)
/// - the validator raised ([`Validator`](Self::Validator))
#[derive(Error, Debug)]
pub enum SettlementError<E> {
    /// The subject fulfilled when it was expected to reject.
    ///
    /// The fulfillment value is discarded.
    #[error("{}", DID_NOT_REJECT)]
    DidNotReject,

    /// The subject rejected when it was expected to fulfill.
    ///
    /// Carries the subject's own reason, displayed as-is.
    #[error("{0}")]
    Rejected(E),

    /// The validator raised while inspecting the settled value or reason.
    #[error("{0}")]
    Validator(ValidationError),
}

impl<E> SettlementError<E> {
    /// Create a validator failure.
    #[must_use]
    pub fn validator(error: ValidationError) -> Self {
        Self::Validator(error)
    }

    /// Returns `true` if the subject settled in the opposite state.
    #[must_use]
    pub fn is_wrong_settlement(&self) -> bool {
        matches!(self, Self::DidNotReject | Self::Rejected(_))
    }

    /// Returns `true` if the validator raised.
    #[must_use]
    pub fn is_validator_failure(&self) -> bool {
        matches!(self, Self::Validator(_))
    }

    /// The subject's rejection reason, if that is why the assertion failed.
    #[must_use]
    pub fn rejection(&self) -> Option<&E> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// Take the subject's rejection reason out of the error.
    #[must_use]
    pub fn into_rejection(self) -> Option<E> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// The validator's error, if that is why the assertion failed.
    #[must_use]
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validator(error) => Some(error),
            _ => None,
        }
    }

    /// Take the validator's error out of the error.
    #[must_use]
    pub fn into_validation_error(self) -> Option<ValidationError> {
        match self {
            Self::Validator(error) => Some(error),
            _ => None,
        }
    }
}

/// Error raised by a validator.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The validator returned an error. Displayed exactly as the original.
    #[error("{0}")]
    Failed(Box<dyn StdError + Send + Sync>),

    /// The validator panicked, typically through `assert!` or `assert_eq!`.
    ///
    /// Holds the panic message and the original payload, which can be taken
    /// back with [`take_panic`](Self::take_panic) or
    /// [`into_panic`](Self::into_panic).
    #[error("{message}")]
    Panicked {
        /// The payload's text, or `"validator panicked"` when it is not a string.
        message: String,
        /// The payload passed to `panic!` or `panic_any`. `None` once taken.
        payload: Mutex<Option<Box<dyn Any + Send>>>,
    },

    /// The validator returned `false`.
    #[error("validator rejected the settled value")]
    Rejected,
}

impl ValidationError {
    /// Create a failure from any error-like value.
    #[must_use]
    pub fn failed(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Failed(error.into())
    }

    /// Create a panic failure from a payload caught with `catch_unwind`.
    #[must_use]
    pub fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            "validator panicked".to_string()
        };
        Self::Panicked {
            message,
            payload: Mutex::new(Some(payload)),
        }
    }

    /// The panic message, if the validator panicked.
    #[must_use]
    pub fn panic_message(&self) -> Option<&str> {
        match self {
            Self::Panicked { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Take the panic payload, leaving `None` behind.
    ///
    /// Pass it to [`std::panic::resume_unwind`] to re-raise the panic, or
    /// downcast it to recover a value given to `panic_any`.
    #[must_use]
    pub fn take_panic(&self) -> Option<Box<dyn Any + Send>> {
        match self {
            Self::Panicked { payload, .. } => payload.lock().take(),
            _ => None,
        }
    }

    /// Consume the error and return the panic payload, if any.
    #[must_use]
    pub fn into_panic(self) -> Option<Box<dyn Any + Send>> {
        match self {
            Self::Panicked { payload, .. } => payload.into_inner(),
            _ => None,
        }
    }

    /// Borrow the validator's original error as a concrete type.
    ///
    /// Returns `None` for panics, for `false` verdicts, and when the error
    /// is of another type.
    #[must_use]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        match self {
            Self::Failed(source) => source.downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// Output of a settlement assertion.
pub type SettleResult<E> = std::result::Result<(), SettlementError<E>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Error)]
    #[error("disk on fire")]
    struct DiskOnFire;

    #[test]
    fn test_did_not_reject_message() {
        let err: SettlementError<String> = SettlementError::DidNotReject;
        assert_eq!(err.to_string(), DID_NOT_REJECT);
        assert!(err.is_wrong_settlement());
        assert!(!err.is_validator_failure());
    }

    #[test]
    fn test_rejected_displays_reason_unchanged() {
        let err = SettlementError::Rejected(DiskOnFire);
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(err.rejection(), Some(&DiskOnFire));
        assert_eq!(err.into_rejection(), Some(DiskOnFire));
    }

    #[test]
    fn test_validator_error_is_forwarded() {
        let err: SettlementError<String> =
            SettlementError::validator(ValidationError::failed(DiskOnFire));
        assert_eq!(err.to_string(), "disk on fire");
        assert!(err.is_validator_failure());
        assert!(err.rejection().is_none());

        let source = err.validation_error().unwrap();
        assert_eq!(source.downcast_ref::<DiskOnFire>(), Some(&DiskOnFire));
    }

    #[test]
    fn test_downcast_misses_other_kinds() {
        assert!(ValidationError::panicked(Box::new("boom"))
            .downcast_ref::<DiskOnFire>()
            .is_none());
        assert!(ValidationError::Rejected.downcast_ref::<DiskOnFire>().is_none());
        assert!(ValidationError::failed("plain text")
            .downcast_ref::<DiskOnFire>()
            .is_none());
    }

    #[test]
    fn test_panicked_displays_message() {
        let err = ValidationError::panicked(Box::new(String::from(
            "assertion `left == right` failed",
        )));
        assert_eq!(err.to_string(), "assertion `left == right` failed");
        assert_eq!(
            err.panic_message(),
            Some("assertion `left == right` failed")
        );
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Custom(u32);

    #[test]
    fn test_panicked_keeps_foreign_payload() {
        let err = ValidationError::panicked(Box::new(Custom(7)));
        assert_eq!(err.to_string(), "validator panicked");

        let payload = err.into_panic().unwrap();
        assert_eq!(payload.downcast_ref::<Custom>(), Some(&Custom(7)));
    }

    #[test]
    fn test_take_panic_only_once() {
        let err = ValidationError::panicked(Box::new(Custom(1)));

        let payload = err.take_panic().unwrap();
        assert_eq!(*payload.downcast::<Custom>().unwrap(), Custom(1));
        assert!(err.take_panic().is_none());
        assert_eq!(err.panic_message(), Some("validator panicked"));
    }

    #[test]
    fn test_resume_unwind_reraises_payload() {
        let err = ValidationError::panicked(Box::new(Custom(3)));
        let payload = err.into_panic().unwrap();

        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || std::panic::resume_unwind(payload)));
        let reraised = caught.unwrap_err();
        assert_eq!(reraised.downcast_ref::<Custom>(), Some(&Custom(3)));
    }

    #[test]
    fn test_panic_accessors_miss_other_kinds() {
        let err = ValidationError::failed(DiskOnFire);
        assert!(err.panic_message().is_none());
        assert!(err.take_panic().is_none());
        assert!(err.into_panic().is_none());
    }

    #[test]
    fn test_into_validation_error() {
        let err: SettlementError<String> =
            SettlementError::validator(ValidationError::panicked(Box::new(Custom(2))));
        let payload = err.into_validation_error().and_then(ValidationError::into_panic);
        assert_eq!(
            payload.unwrap().downcast_ref::<Custom>(),
            Some(&Custom(2))
        );

        let err: SettlementError<String> = SettlementError::DidNotReject;
        assert!(err.into_validation_error().is_none());
    }
}

//! Validators and the verdicts they return.

use std::error::Error as StdError;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::ValidationError;

/// A value a validator may return.
///
/// - `()` passes. Fail by panicking, e.g. with `assert_eq!`.
/// - `bool` passes on `true`.
/// - `Result<(), E>` passes on `Ok`. The error is kept as-is.
///
/// A panicking validator is caught and reported as
/// [`ValidationError::Panicked`], with the original payload kept. The panic
/// hook still runs first, so the usual "thread ... panicked at" message and
/// any backtrace are printed. Return `false` or an `Err` for a quiet failure.
pub trait Verdict {
    /// Turn the validator's return value into a pass or a failure.
    ///
    /// # Errors
    ///
    /// Returns the failure the validator reported.
    fn into_verdict(self) -> Result<(), ValidationError>;
}

impl Verdict for () {
    fn into_verdict(self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Verdict for bool {
    fn into_verdict(self) -> Result<(), ValidationError> {
        if self {
            Ok(())
        } else {
            Err(ValidationError::Rejected)
        }
    }
}

impl<E> Verdict for Result<(), E>
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    fn into_verdict(self) -> Result<(), ValidationError> {
        self.map_err(ValidationError::failed)
    }
}

/// A check run once against a settled value or reason.
///
/// Implemented for [`NoValidator`] and for every `FnOnce(&A) -> impl Verdict`.
pub trait Validator<A: ?Sized> {
    /// Run the check.
    ///
    /// # Errors
    ///
    /// Returns the validator's failure, including a captured panic.
    fn validate(self, settled: &A) -> Result<(), ValidationError>;
}

/// The absent validator: every settled value passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoValidator;

impl<A: ?Sized> Validator<A> for NoValidator {
    fn validate(self, _settled: &A) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<A, F, R> Validator<A> for F
where
    A: ?Sized,
    F: FnOnce(&A) -> R,
    R: Verdict,
{
    fn validate(self, settled: &A) -> Result<(), ValidationError> {
        match catch_unwind(AssertUnwindSafe(|| self(settled))) {
            Ok(verdict) => verdict.into_verdict(),
            Err(panic) => Err(ValidationError::panicked(panic)),
        }
    }
}

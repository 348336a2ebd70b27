//! Assert how a future settles.
//!
//! A *subject* is any future resolving to a `Result`: `Ok` means it
//! fulfilled, `Err` means it rejected. The helpers here wrap a subject in a
//! new future, the *outcome*, which resolves to `Ok(())` when the assertion
//! holds and to a [`SettlementError`](crate::error::SettlementError) when it
//! does not.
//!
//! - [`expect_failure`] / [`expect_failure_with`] - the subject must reject
//! - [`expect_success`] / [`expect_success_with`] - the subject must fulfill
//! - [`SettleExt`] - the same operations as methods on the subject
//!
//! Building an outcome never polls the subject. Nothing happens until the
//! outcome is awaited, and an outcome whose subject never settles never
//! settles either.
//!
//! # Example
//!
//! ```rust
//! use testkit_settle::settle::{expect_failure_with, expect_success};
//!
//! # futures::executor::block_on(async {
//! let rejected = async { Err::<(), _>("connection refused") };
//! expect_failure_with(rejected, |reason: &&str| assert_eq!(*reason, "connection refused"))
//!     .await
//!     .unwrap();
//!
//! expect_success(async { Ok::<_, ()>(42) }).await.unwrap();
//! # });
//! ```

mod failure;
mod success;
mod verdict;

use futures_core::TryFuture;

pub use failure::ExpectFailure;
pub use success::ExpectSuccess;
pub use verdict::{NoValidator, Validator, Verdict};

/// Expect `subject` to reject.
///
/// The outcome fulfills as soon as the subject rejects, whatever the reason.
/// If the subject fulfills, the outcome rejects with
/// [`SettlementError::DidNotReject`](crate::error::SettlementError::DidNotReject).
///
/// # Example
///
/// ```rust
/// use testkit_settle::settle::expect_failure;
///
/// # futures::executor::block_on(async {
/// expect_failure(async { Err::<(), _>(()) }).await.unwrap();
///
/// let err = expect_failure(async { Ok::<_, &str>(1) }).await.unwrap_err();
/// assert_eq!(err.to_string(), "Did not reject promise as expected");
/// # });
/// ```
pub fn expect_failure<F>(subject: F) -> ExpectFailure<F, NoValidator>
where
    F: TryFuture,
{
    tracing::trace!(operation = "expect_failure", "outcome created");
    ExpectFailure::new(subject, NoValidator)
}

/// Expect `subject` to reject with a reason `validator` accepts.
///
/// The validator runs once, after the subject rejects and before the outcome
/// settles. It is never run when the subject fulfills. If it raises, the
/// outcome rejects with its error unchanged; see [`Verdict`] for the ways a
/// validator can raise.
///
/// A panicking validator still triggers the panic hook, which prints the
/// panic message before the outcome settles. Return `bool` or `Result` from
/// the validator to fail without that output.
///
/// # Example
///
/// ```rust
/// use testkit_settle::settle::expect_failure_with;
/// use std::io;
///
/// # futures::executor::block_on(async {
/// let subject = async { Err::<(), _>(io::Error::other("Promise was rejected")) };
/// expect_failure_with(subject, |err: &io::Error| {
///     assert_eq!(err.to_string(), "Promise was rejected");
/// })
/// .await
/// .unwrap();
/// # });
/// ```
pub fn expect_failure_with<F, V, R>(subject: F, validator: V) -> ExpectFailure<F, V>
where
    F: TryFuture,
    V: FnOnce(&F::Error) -> R,
    R: Verdict,
{
    tracing::trace!(operation = "expect_failure", "outcome created with validator");
    ExpectFailure::new(subject, validator)
}

/// Expect `subject` to fulfill.
///
/// If the subject rejects, the outcome rejects with the subject's own reason
/// in [`SettlementError::Rejected`](crate::error::SettlementError::Rejected).
///
/// # Example
///
/// ```rust
/// use testkit_settle::settle::expect_success;
///
/// # futures::executor::block_on(async {
/// expect_success(async { Ok::<_, ()>(()) }).await.unwrap();
///
/// let err = expect_success(async { Err::<(), _>("timed out") }).await.unwrap_err();
/// assert_eq!(err.into_rejection(), Some("timed out"));
/// # });
/// ```
pub fn expect_success<F>(subject: F) -> ExpectSuccess<F, NoValidator>
where
    F: TryFuture,
{
    tracing::trace!(operation = "expect_success", "outcome created");
    ExpectSuccess::new(subject, NoValidator)
}

/// Expect `subject` to fulfill with a value `validator` accepts.
///
/// The validator runs once, after the subject fulfills and before the outcome
/// settles. It is never run when the subject rejects.
///
/// As with [`expect_failure_with`], a panicking validator is reported through
/// the outcome but the panic hook still prints it.
///
/// # Example
///
/// ```rust
/// use testkit_settle::settle::expect_success_with;
///
/// # futures::executor::block_on(async {
/// let err = expect_success_with(async { Ok::<_, ()>(true) }, |value: &bool| {
///     assert_eq!(*value, false);
/// })
/// .await
/// .unwrap_err();
/// assert!(err.is_validator_failure());
/// # });
/// ```
pub fn expect_success_with<F, V, R>(subject: F, validator: V) -> ExpectSuccess<F, V>
where
    F: TryFuture,
    V: FnOnce(&F::Ok) -> R,
    R: Verdict,
{
    tracing::trace!(operation = "expect_success", "outcome created with validator");
    ExpectSuccess::new(subject, validator)
}

/// Settlement assertions as methods on any subject.
///
/// # Example
///
/// ```rust
/// use testkit_settle::settle::SettleExt;
///
/// # futures::executor::block_on(async {
/// async { Err::<(), _>("refused") }.expect_failure().await.unwrap();
/// async { Ok::<_, ()>(3) }
///     .expect_success_with(|n: &i32| *n == 3)
///     .await
///     .unwrap();
/// # });
/// ```
pub trait SettleExt: TryFuture + Sized {
    /// See [`expect_failure`].
    fn expect_failure(self) -> ExpectFailure<Self, NoValidator> {
        expect_failure(self)
    }

    /// See [`expect_failure_with`].
    fn expect_failure_with<V, R>(self, validator: V) -> ExpectFailure<Self, V>
    where
        V: FnOnce(&Self::Error) -> R,
        R: Verdict,
    {
        expect_failure_with(self, validator)
    }

    /// See [`expect_success`].
    fn expect_success(self) -> ExpectSuccess<Self, NoValidator> {
        expect_success(self)
    }

    /// See [`expect_success_with`].
    fn expect_success_with<V, R>(self, validator: V) -> ExpectSuccess<Self, V>
    where
        V: FnOnce(&Self::Ok) -> R,
        R: Verdict,
    {
        expect_success_with(self, validator)
    }
}

impl<F: TryFuture> SettleExt for F {}

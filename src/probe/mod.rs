//! Probing futures that resolve to a `Result`, without an executor.
//!
//! - [`poll_settlement`] - Poll once and report how the future settled
//! - [`assert_fulfilled!`] - Assert a future fulfills immediately
//! - [`assert_rejected!`] - Assert a future rejects immediately
//! - [`settle_after_polls`] - A subject that settles after N polls
//!
//! # Example
//!
//! ```rust
//! use testkit_settle::{assert_fulfilled, assert_rejected};
//! use testkit_settle::settle::{expect_failure, expect_success};
//!
//! assert_fulfilled!(expect_failure(async { Err::<(), _>("refused") }));
//!
//! let err = assert_rejected!(expect_success(async { Err::<(), _>("refused") }));
//! assert_eq!(err.into_rejection(), Some("refused"));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

/// How a future resolving to a `Result` stood after one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement<T, E> {
    /// Resolved to `Ok`.
    Fulfilled(T),
    /// Resolved to `Err`.
    Rejected(E),
    /// Not settled yet.
    Pending,
}

impl<T, E> Settlement<T, E> {
    /// Returns `true` if the future fulfilled.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Returns `true` if the future rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns `true` if the future has not settled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Convert to the settled `Result`, or `None` while pending.
    #[must_use]
    pub fn settled(self) -> Option<Result<T, E>> {
        match self {
            Self::Fulfilled(value) => Some(Ok(value)),
            Self::Rejected(reason) => Some(Err(reason)),
            Self::Pending => None,
        }
    }
}

impl<T, E> From<Poll<Result<T, E>>> for Settlement<T, E> {
    fn from(poll: Poll<Result<T, E>>) -> Self {
        match poll {
            Poll::Ready(Ok(value)) => Self::Fulfilled(value),
            Poll::Ready(Err(reason)) => Self::Rejected(reason),
            Poll::Pending => Self::Pending,
        }
    }
}

/// Poll a future once and report how it settled.
///
/// # Example
///
/// ```rust
/// use testkit_settle::probe::{poll_settlement, Settlement};
///
/// let settled = poll_settlement(async { Err::<(), _>(7) });
/// assert_eq!(settled, Settlement::Rejected(7));
/// ```
pub fn poll_settlement<F, T, E>(future: F) -> Settlement<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let mut cx = Context::from_waker(Waker::noop());
    let mut pinned = Box::pin(future);
    pinned.as_mut().poll(&mut cx).into()
}

/// Assert that a future fulfills on its first poll, returning the value.
///
/// # Panics
///
/// Panics if the future rejects or is still pending.
///
/// # Example
///
/// ```rust
/// use testkit_settle::assert_fulfilled;
///
/// let value = assert_fulfilled!(async { Ok::<_, ()>(42) });
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_fulfilled {
    ($future:expr) => {{
        match $crate::probe::poll_settlement($future) {
            $crate::probe::Settlement::Fulfilled(value) => value,
            $crate::probe::Settlement::Rejected(reason) => {
                panic!(
                    "assertion failed: expected future to fulfill, but it rejected with {:?}",
                    reason
                );
            }
            $crate::probe::Settlement::Pending => {
                panic!("assertion failed: expected future to fulfill, but it was Pending");
            }
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::probe::poll_settlement($future) {
            $crate::probe::Settlement::Fulfilled(value) => value,
            $crate::probe::Settlement::Rejected(reason) => {
                panic!(
                    "assertion failed: expected future to fulfill, but it rejected with {:?}: {}",
                    reason,
                    format_args!($($arg)+)
                );
            }
            $crate::probe::Settlement::Pending => {
                panic!(
                    "assertion failed: expected future to fulfill, but it was Pending: {}",
                    format_args!($($arg)+)
                );
            }
        }
    }};
}

/// Assert that a future rejects on its first poll, returning the reason.
///
/// # Panics
///
/// Panics if the future fulfills or is still pending.
///
/// # Example
///
/// ```rust
/// use testkit_settle::assert_rejected;
///
/// let reason = assert_rejected!(async { Err::<(), _>("nope") });
/// assert_eq!(reason, "nope");
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($future:expr) => {{
        match $crate::probe::poll_settlement($future) {
            $crate::probe::Settlement::Rejected(reason) => reason,
            $crate::probe::Settlement::Fulfilled(value) => {
                panic!(
                    "assertion failed: expected future to reject, but it fulfilled with {:?}",
                    value
                );
            }
            $crate::probe::Settlement::Pending => {
                panic!("assertion failed: expected future to reject, but it was Pending");
            }
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::probe::poll_settlement($future) {
            $crate::probe::Settlement::Rejected(reason) => reason,
            $crate::probe::Settlement::Fulfilled(value) => {
                panic!(
                    "assertion failed: expected future to reject, but it fulfilled with {:?}: {}",
                    value,
                    format_args!($($arg)+)
                );
            }
            $crate::probe::Settlement::Pending => {
                panic!(
                    "assertion failed: expected future to reject, but it was Pending: {}",
                    format_args!($($arg)+)
                );
            }
        }
    }};
}

/// Create a subject that settles with `result` after being polled N times.
///
/// The first `polls_until_settled` polls return `Pending` and wake the task
/// again; the next one settles.
///
/// # Example
///
/// ```rust
/// use testkit_settle::probe::{poll_settlement, settle_after_polls};
///
/// let subject = settle_after_polls(1, Ok::<_, ()>("done"));
/// assert!(poll_settlement(subject).is_pending());
/// ```
pub fn settle_after_polls<T, E>(
    polls_until_settled: usize,
    result: Result<T, E>,
) -> SettleAfterPolls<T, E> {
    SettleAfterPolls {
        remaining: polls_until_settled,
        result: Some(result),
    }
}

/// A subject that settles after a certain number of polls.
#[derive(Debug)]
pub struct SettleAfterPolls<T, E> {
    remaining: usize,
    result: Option<Result<T, E>>,
}

impl<T, E> Unpin for SettleAfterPolls<T, E> {}

impl<T, E> Future for SettleAfterPolls<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.remaining == 0 {
            Poll::Ready(self.result.take().expect("polled after completion"))
        } else {
            self.remaining -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

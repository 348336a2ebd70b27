use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_core::TryFuture;
use pin_project_lite::pin_project;

use super::verdict::Validator;
use crate::error::{SettleResult, SettlementError};

pin_project! {
    /// Future for [`expect_failure`](super::expect_failure) and
    /// [`expect_failure_with`](super::expect_failure_with).
    ///
    /// Resolves to `Ok(())` once the subject rejects and the validator, if
    /// any, accepts the reason.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct ExpectFailure<F, V> {
        #[pin]
        subject: F,
        validator: Option<V>,
        settled: bool,
    }
}

impl<F, V> ExpectFailure<F, V> {
    pub(super) fn new(subject: F, validator: V) -> Self {
        Self {
            subject,
            validator: Some(validator),
            settled: false,
        }
    }
}

impl<F, V> Future for ExpectFailure<F, V>
where
    F: TryFuture,
    V: Validator<F::Error>,
{
    type Output = SettleResult<F::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        assert!(!*this.settled, "`ExpectFailure` polled after completion");

        let settlement = ready!(this.subject.try_poll(cx));
        *this.settled = true;

        let Err(reason) = settlement else {
            tracing::debug!(
                operation = "expect_failure",
                "subject fulfilled, expected a rejection"
            );
            return Poll::Ready(Err(SettlementError::DidNotReject));
        };

        tracing::debug!(operation = "expect_failure", "subject rejected");
        let Some(validator) = this.validator.take() else {
            return Poll::Ready(Ok(()));
        };

        Poll::Ready(validator.validate(&reason).map_err(|err| {
            tracing::debug!(operation = "expect_failure", %err, "validator raised");
            SettlementError::validator(err)
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ValidationError;
    use crate::probe::{poll_settlement, settle_after_polls, Settlement};
    use crate::settle::{expect_failure, expect_failure_with, NoValidator};

    #[test]
    fn test_fulfilled_subject_skips_validator() {
        let calls = AtomicUsize::new(0);
        let outcome = expect_failure_with(async { Ok::<_, ()>(5) }, |_: &()| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        assert!(matches!(
            poll_settlement(outcome),
            Settlement::Rejected(SettlementError::DidNotReject)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_waits_for_deferred_subject() {
        let mut outcome = Box::pin(expect_failure(settle_after_polls(2, Err::<(), _>("late"))));
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);

        assert!(outcome.as_mut().poll(&mut cx).is_pending());
        assert!(outcome.as_mut().poll(&mut cx).is_pending());
        assert!(matches!(outcome.as_mut().poll(&mut cx), Poll::Ready(Ok(()))));
    }

    #[test]
    fn test_validator_runs_after_settlement() {
        let calls = AtomicUsize::new(0);
        let mut outcome = Box::pin(expect_failure_with(
            settle_after_polls(1, Err::<(), _>(9)),
            |reason: &i32| {
                calls.fetch_add(1, Ordering::SeqCst);
                *reason == 9
            },
        ));
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);

        assert!(outcome.as_mut().poll(&mut cx).is_pending());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(matches!(outcome.as_mut().poll(&mut cx), Poll::Ready(Ok(()))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_false_verdict_rejects() {
        let outcome = expect_failure_with(async { Err::<(), _>(3) }, |reason: &i32| *reason > 10);

        assert!(matches!(
            poll_settlement(outcome),
            Settlement::Rejected(SettlementError::Validator(ValidationError::Rejected))
        ));
    }

    #[test]
    fn test_explicit_no_validator() {
        let outcome = ExpectFailure::new(async { Err::<(), _>("gone") }, NoValidator);
        assert!(matches!(poll_settlement(outcome), Settlement::Fulfilled(())));
    }

    #[test]
    #[should_panic(expected = "polled after completion")]
    fn test_poll_after_completion_panics() {
        let mut outcome = Box::pin(expect_failure(async { Err::<(), _>(()) }));
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);

        assert!(outcome.as_mut().poll(&mut cx).is_ready());
        let _ = outcome.as_mut().poll(&mut cx);
    }
}

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_core::TryFuture;
use pin_project_lite::pin_project;

use super::verdict::Validator;
use crate::error::{SettleResult, SettlementError};

pin_project! {
    /// Future for [`expect_success`](super::expect_success) and
    /// [`expect_success_with`](super::expect_success_with).
    ///
    /// Resolves to `Ok(())` once the subject fulfills and the validator, if
    /// any, accepts the value. A rejected subject surfaces its own reason
    /// through [`SettlementError::Rejected`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct ExpectSuccess<F, V> {
        #[pin]
        subject: F,
        validator: Option<V>,
        settled: bool,
    }
}

impl<F, V> ExpectSuccess<F, V> {
    pub(super) fn new(subject: F, validator: V) -> Self {
        Self {
            subject,
            validator: Some(validator),
            settled: false,
        }
    }
}

impl<F, V> Future for ExpectSuccess<F, V>
where
    F: TryFuture,
    V: Validator<F::Ok>,
{
    type Output = SettleResult<F::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        assert!(!*this.settled, "`ExpectSuccess` polled after completion");

        let settlement = ready!(this.subject.try_poll(cx));
        *this.settled = true;

        let value = match settlement {
            Ok(value) => value,
            Err(reason) => {
                tracing::debug!(
                    operation = "expect_success",
                    "subject rejected, expected a fulfillment"
                );
                return Poll::Ready(Err(SettlementError::Rejected(reason)));
            }
        };

        tracing::debug!(operation = "expect_success", "subject fulfilled");
        let Some(validator) = this.validator.take() else {
            return Poll::Ready(Ok(()));
        };

        Poll::Ready(validator.validate(&value).map_err(|err| {
            tracing::debug!(operation = "expect_success", %err, "validator raised");
            SettlementError::validator(err)
        }))
    }
}

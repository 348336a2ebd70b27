//! # testkit-settle
//!
//! > Assert how a future settles
//!
//! **testkit-settle** wraps a future that resolves to a `Result` (the
//! *subject*) in a new future that resolves to `Ok(())` when the subject
//! settled the way the test expects, and to a [`SettlementError`] otherwise.
//! The test runner reports the outcome like any other failing `Result`.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_settle::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let refused = async { Err::<(), _>(std::io::Error::other("Promise was rejected")) };
//! expect_failure_with(refused, |err: &std::io::Error| {
//!     assert_eq!(err.to_string(), "Promise was rejected");
//! })
//! .await
//! .unwrap();
//!
//! async { Ok::<_, ()>(42) }
//!     .expect_success_with(|n: &i32| *n == 42)
//!     .await
//!     .unwrap();
//! # });
//! ```
//!
//! ## Features
//!
//! - **`expect_failure`** - The subject must reject, optionally with a reason a
//!   validator accepts
//! - **`expect_success`** - The subject must fulfill, optionally with a value a
//!   validator accepts
//! - **Validators** - Closures that return `()`, `bool` or `Result`, or panic
//! - **Probes** - Check settlement on the first poll, without an executor

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod probe;
pub mod settle;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_settle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{SettleResult, SettlementError, ValidationError};
    pub use crate::probe::{poll_settlement, settle_after_polls, Settlement};
    pub use crate::settle::{
        expect_failure, expect_failure_with, expect_success, expect_success_with, SettleExt,
    };
    pub use crate::{assert_fulfilled, assert_rejected};
}

// Re-exports
pub use error::{SettleResult, SettlementError, ValidationError};
pub use settle::{expect_failure, expect_failure_with, expect_success, expect_success_with};

//! Deferred assertion adapters
//!
//! Lift the blocking assertion primitives of `assay-core` into effects so they
//! compose with the rest of a test body. Two effect shapes are supported:
//!
//! - fallible futures, through [`FutureAssertExt`]
//! - [`SyncIo`](assay_core::SyncIo), through [`SyncIoAssertExt`]
//!
//! Both share the outcome checks in [`outcome`], so a given outcome passes or
//! fails identically whichever shape produced it.

pub mod future;
pub mod outcome;
pub mod sync;

pub use future::FutureAssertExt;
pub use outcome::{check_defined, check_intercept, check_returns};
pub use sync::SyncIoAssertExt;

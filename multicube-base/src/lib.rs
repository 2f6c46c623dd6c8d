//! This library is an internal component of `multicube`,
//! which defines some core mathematical types and functions.
//! Do not depend on this library; use only `multicube` instead.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]

/// Do not use this module directly; its contents are re-exported from `multicube`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `multicube`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;

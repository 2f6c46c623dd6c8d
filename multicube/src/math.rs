//! Mathematical utilities and data types.

pub use multicube_base::math::*;

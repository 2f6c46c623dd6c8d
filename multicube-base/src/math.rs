//! Mathematical utilities and data types.

mod aab;
pub use aab::*;
mod axis;
pub use axis::*;
mod coord;
pub use coord::*;
mod rotation;
pub use rotation::*;

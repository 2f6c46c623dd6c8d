//! Tools that we could imagine being in the Rust standard library, but aren't.

pub use multicube_base::util::*;

//! Command-line driver for [`multicube`], without graphics.
//!
//! The binary is a stand-in for a real scene loop: it reads a configuration, starts a
//! [`Game`](multicube::game::Game), feeds it scripted input for a number of ticks,
//! and reports what happened.
//!
//! This library crate exists to share code between the binary and its tests. Its API
//! is not intended for other uses.

#![forbid(unsafe_code)]

pub mod config_files;
pub mod headless;
pub mod logging;
pub mod script;

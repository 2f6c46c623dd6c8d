//! Multicube is a small puzzle world: a hollow shell of sub-cubes, like a Rubik's cube
//! with holes punched in it, which a player-controlled sphere crawls across.
//! When the player walks off the edge of the face it is standing on, the whole shell
//! turns a quarter turn so that the neighboring face comes around to the front, and then
//! control resumes.
//!
//! This crate is the simulation core, with no rendering or input handling:
//!
//! * [`shell::ShellGenerator`] decides which cells of the shell are solid.
//! * [`shell::Shell`] owns the cells and answers collision queries against them.
//! * [`player::Player`] moves by fixed steps according to its [`player::MoveIntent`].
//! * [`face_rotation::FaceRotationController`] is the state machine which freezes the
//!   player, turns the world, and lets the player go again.
//! * [`game::Game`] owns all of the above and exposes a single [`game::Game::update()`]
//!   to be called once per frame.
//!
//! The host (a renderer, or the headless driver in `multicube-desktop`) supplies
//! [`player::MoveIntent`]s and reads back transforms for drawing.

pub mod face_rotation;
pub mod game;
pub mod math;
pub mod player;
pub mod scene;
pub mod shell;
pub mod util;

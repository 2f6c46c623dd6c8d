//! Running a [`Game`] without graphics or live input.

use core::fmt;

use manyfmt::Refmt as _;

use multicube::face_rotation::Direction;
use multicube::game::Game;
use multicube::math::FreePoint;
use multicube::util::ConciseDebug;

use crate::script::Script;

/// What happened during [`run()`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Summary {
    /// Seed of the game, if it was started from one.
    pub seed: Option<u64>,
    /// Number of ticks run.
    pub ticks: u64,
    /// Number of completed face transitions, in the order of [`Direction::ALL`].
    pub transitions: [u32; 4],
    /// Number of steps into the shell that were undone.
    pub rollbacks: u32,
    /// Where the player ended up.
    pub final_position: FreePoint,
    /// Number of cells of the shell which are present.
    pub present_cells: usize,
    /// Number of cells of the shell, present or not.
    pub total_cells: usize,
}

impl Summary {
    /// Number of completed face transitions in `direction`.
    pub fn transitions_in(&self, direction: Direction) -> u32 {
        self.transitions[direction_index(direction)]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(seed) = self.seed {
            writeln!(f, "seed: {seed}")?;
        }
        writeln!(f, "ticks: {}", self.ticks)?;
        write!(f, "transitions:")?;
        for (i, direction) in Direction::ALL.into_iter().enumerate() {
            let separator = if i == 0 { " " } else { ", " };
            write!(
                f,
                "{separator}{direction} {}",
                self.transitions_in(direction)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "rollbacks: {}", self.rollbacks)?;
        writeln!(
            f,
            "final position: {:?}",
            self.final_position.refmt(&ConciseDebug)
        )?;
        writeln!(
            f,
            "present cells: {} of {}",
            self.present_cells, self.total_cells
        )
    }
}

fn direction_index(direction: Direction) -> usize {
    match direction {
        Direction::Left => 0,
        Direction::Right => 1,
        Direction::Up => 2,
        Direction::Down => 3,
    }
}

/// Runs `game` for `ticks` ticks, taking input from `script` and then idling.
pub fn run(game: &mut Game, script: &Script, ticks: u64) -> Summary {
    if script.total_ticks() > ticks {
        log::warn!(
            "script has {} ticks of input but only {ticks} ticks will be run",
            script.total_ticks()
        );
    }

    let mut transitions = [0; 4];
    let mut rollbacks = 0;
    let mut ticks_run = 0;
    for (_, intent) in (0..ticks).zip(script.intents()) {
        game.set_intent(intent);
        let report = game.update();
        ticks_run += 1;
        if report.rolled_back {
            rollbacks += 1;
        }
        if let Some(direction) = report.rotation_finished {
            transitions[direction_index(direction)] += 1;
        }
    }
    log::info!("ran {ticks_run} ticks");

    Summary {
        seed: game.config().seed,
        ticks: ticks_run,
        transitions,
        rollbacks,
        final_position: game.player().position(),
        present_cells: game.shell().present_cell_count(),
        total_cells: game.shell().cells().len(),
    }
}

//! The player: a sphere that moves across the face of the shell in fixed steps.

use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{Aab, FreeCoordinate, FreePoint, FreeRotation, FreeVector};
use crate::util::ConciseDebug;

/// The four directional inputs, as sampled by the host once per tick.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
#[allow(missing_docs)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// No input.
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Returns the unnormalized step in the plane of the face: `(left - right, up - down, 0)`.
    ///
    /// Opposing inputs cancel out.
    pub fn step(self) -> FreeVector {
        let axis = |positive: bool, negative: bool| {
            FreeCoordinate::from(u8::from(positive)) - FreeCoordinate::from(u8::from(negative))
        };
        FreeVector::new(axis(self.left, self.right), axis(self.up, self.down), 0.0)
    }

    /// Returns whether this intent would move the player at all.
    pub fn is_idle(self) -> bool {
        self.step() == FreeVector::zero()
    }

    /// Combines two intents, holding each input which is held in either.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// A player-controlled sphere.
///
/// The player moves a fixed distance per [`Player::update()`] in the direction given by
/// its [`MoveIntent`], and remembers where it was before its last step so that a step into
/// an obstacle can be undone.
#[derive(Clone, PartialEq)]
pub struct Player {
    position: FreePoint,
    /// Position before the most recent step. [`None`] until the first step, which
    /// is treated as the current position.
    last_position: Option<FreePoint>,
    frozen: bool,
    /// Accumulated rotation from [`Player::revolve_about_origin()`], which also applies to
    /// the direction of steps.
    orientation: FreeRotation,
    intent: MoveIntent,
    diameter: FreeCoordinate,
    step_distance: FreeCoordinate,
}

impl Player {
    /// Creates an unfrozen player with no intent.
    ///
    /// `step_distance` is how far one [`Player::update()`] moves the player.
    pub fn new(
        position: FreePoint,
        diameter: FreeCoordinate,
        step_distance: FreeCoordinate,
    ) -> Self {
        Self {
            position,
            last_position: None,
            frozen: false,
            orientation: FreeRotation::identity(),
            intent: MoveIntent::IDLE,
            diameter,
            step_distance,
        }
    }

    /// Current position of the center of the sphere.
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Moves the player to `position`, without that counting as a step: the previous
    /// position is forgotten, so a [`Player::roll_back()`] right after this does nothing.
    pub fn set_position(&mut self, position: FreePoint) {
        self.position = position;
        self.last_position = None;
    }

    /// The position before the most recent step, or the current position if there has
    /// been no step since the player was created or last placed.
    pub fn last_position(&self) -> FreePoint {
        self.last_position.unwrap_or(self.position)
    }

    /// Diameter of the sphere.
    pub fn diameter(&self) -> FreeCoordinate {
        self.diameter
    }

    /// The box used for collision with the shell: the bounding box of the sphere.
    pub fn collision_box(&self) -> Aab {
        Aab::centered_cube(self.position, self.diameter)
    }

    /// Whether input is currently ignored.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stops [`Player::update()`] from moving the player. Does not move the player.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Undoes [`Player::freeze()`]. Does not move the player.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// The intent the next [`Player::update()`] will act on.
    pub fn intent(&self) -> MoveIntent {
        self.intent
    }

    /// Stores the intent for the next [`Player::update()`].
    pub fn set_intent(&mut self, intent: MoveIntent) {
        self.intent = intent;
    }

    /// Accumulated rotation applied by [`Player::revolve_about_origin()`].
    pub fn orientation(&self) -> FreeRotation {
        self.orientation
    }

    /// Rotates the player's position about the world origin, and its orientation with it.
    ///
    /// The remembered pre-step position is carried along, so that it stays meaningful.
    pub fn revolve_about_origin(&mut self, rotation: &FreeRotation) {
        self.position = rotation.transform_point3d(self.position);
        self.last_position = self
            .last_position
            .map(|p| rotation.transform_point3d(p));
        self.orientation = self.orientation.then(rotation);
    }

    /// Resets the orientation to the identity rotation. Does not move the player.
    pub fn reset_orientation(&mut self) {
        self.orientation = FreeRotation::identity();
    }

    /// Returns the player to where it was before its most recent step.
    pub fn roll_back(&mut self) {
        self.position = self.last_position();
    }

    /// Takes one step according to the current intent, unless frozen.
    ///
    /// Returns whether the player moved. If it did, [`Player::last_position()`] is the
    /// position it moved from.
    pub fn update(&mut self) -> bool {
        if self.frozen {
            return false;
        }
        let step = self.intent.step();
        if step == FreeVector::zero() {
            return false;
        }
        self.last_position = Some(self.position);
        let local_step = step.normalize() * self.step_distance;
        self.position += self.orientation.transform_vector3d(local_step);
        true
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Player")
            .field("position", &self.position.refmt(&ConciseDebug))
            .field("last_position", &self.last_position().refmt(&ConciseDebug))
            .field("frozen", &self.frozen)
            .field("orientation", &self.orientation.refmt(&ConciseDebug))
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

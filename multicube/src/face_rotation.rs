//! The state machine which turns the world when the player walks off a face.
//!
//! While [`RotationState::Idle`], each tick moves the player, undoes any step which ran
//! into the shell, and keeps the player on the face. If the player had to be pulled back
//! onto the face, it is frozen and the shell, the backdrop, and the player are all
//! turned a quarter turn, a few degrees per tick, until the face the player was heading
//! towards has come around to the front.

use core::cmp::Ordering;

use euclid::Angle;

use crate::math::{Axis, FreeCoordinate, FreeRotation, FreeVector, rotation_about};
use crate::player::Player;
use crate::scene::GroupNode;
use crate::shell::Shell;


/// Total angle of one face transition, in degrees.
pub const QUARTER_TURN_DEGREES: FreeCoordinate = 90.0;

/// The direction of a face transition, named after the input that usually causes it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[expect(clippy::exhaustive_enums)]
pub enum Direction {
    /// Turns about +Y by a positive angle, bringing the -X face to the front.
    Left,
    /// Turns about +Y by a negative angle, bringing the +X face to the front.
    Right,
    /// Turns about -X by a positive angle, bringing the -Y face to the front.
    Up,
    /// Turns about -X by a negative angle, bringing the +Y face to the front.
    Down,
}

impl Direction {
    /// All directions, in the order boundary crossings are checked.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// The axis this transition turns about.
    pub fn rotation_axis(self) -> FreeVector {
        match self {
            Direction::Left | Direction::Right => Axis::Y.positive_unit(),
            Direction::Up | Direction::Down => -Axis::X.positive_unit(),
        }
    }

    /// Sign of the angle by which this transition turns about [`Direction::rotation_axis()`].
    pub fn angle_sign(self) -> FreeCoordinate {
        match self {
            Direction::Left | Direction::Up => 1.0,
            Direction::Right | Direction::Down => -1.0,
        }
    }

    /// Chooses the transition for a boundary signal, which gives for each of x and y
    /// whether the player had to be pushed in the positive (+1) or negative (-1) direction
    /// to get back onto the face.
    ///
    /// The x axis takes priority over the y axis when both crossed at once.
    ///
    /// ```
    /// use multicube::face_rotation::Direction;
    ///
    /// assert_eq!(Direction::from_boundary_signal([1, 0]), Some(Direction::Left));
    /// assert_eq!(Direction::from_boundary_signal([-1, 1]), Some(Direction::Right));
    /// assert_eq!(Direction::from_boundary_signal([0, -1]), Some(Direction::Down));
    /// assert_eq!(Direction::from_boundary_signal([0, 0]), None);
    /// ```
    pub fn from_boundary_signal(signal: [i8; 2]) -> Option<Self> {
        match signal {
            [x, _] if x > 0 => Some(Direction::Left),
            [x, _] if x < 0 => Some(Direction::Right),
            [_, y] if y > 0 => Some(Direction::Up),
            [_, y] if y < 0 => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Whether the world is turning, and if so, how far it has got.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum RotationState {
    /// The player is free to move.
    #[default]
    Idle,
    /// A face transition is in progress; the player is frozen.
    Rotating {
        /// Which way the world is turning.
        direction: Direction,
        /// Degrees turned so far, in `0.0..=90.0`.
        angle: FreeCoordinate,
    },
}

impl RotationState {
    /// Degrees turned so far in the current transition; zero when idle.
    pub fn accumulated_angle(&self) -> FreeCoordinate {
        match *self {
            RotationState::Idle => 0.0,
            RotationState::Rotating { angle, .. } => angle,
        }
    }

    /// The direction of the current transition, if any.
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            RotationState::Idle => None,
            RotationState::Rotating { direction, .. } => Some(direction),
        }
    }

    /// Whether a transition is in progress.
    pub fn is_rotating(&self) -> bool {
        matches!(self, RotationState::Rotating { .. })
    }
}

/// Which part of [`FaceRotationController::update()`] ran.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum TickPhase {
    /// The player was allowed to move.
    Moving,
    /// The world turned.
    Rotating,
}

/// A change in whether the player is touching the shell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum CollisionChange {
    /// The player is now touching the shell.
    Began,
    /// The player is no longer touching the shell.
    Ended,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct TickReport {
    /// Which branch of the state machine ran.
    pub phase: TickPhase,
    /// Whether the player took a step (which may have been undone by `rolled_back`).
    pub moved: bool,
    /// Whether a step into the shell was undone.
    pub rolled_back: bool,
    /// Change in the recorded collision state, if any.
    pub collision: Option<CollisionChange>,
    /// A transition that started this tick.
    pub rotation_started: Option<Direction>,
    /// A transition that finished this tick.
    pub rotation_finished: Option<Direction>,
    /// Degrees the world turned this tick, as part of a transition.
    pub rotation_increment: FreeCoordinate,
}

impl TickReport {
    fn new(phase: TickPhase) -> Self {
        Self {
            phase,
            moved: false,
            rolled_back: false,
            collision: None,
            rotation_started: None,
            rotation_finished: None,
            rotation_increment: 0.0,
        }
    }
}

/// Coordinates the shell, the backdrop, and the player.
///
/// This is the only thing which changes the [`RotationState`]. It does not own the
/// things it moves; they are passed to each [`FaceRotationController::update()`].
#[derive(Clone, Debug)]
pub struct FaceRotationController {
    state: RotationState,
    /// Half the width of the square the player may move in, which is also the player's
    /// distance from the origin along +Z.
    face_half_extent: FreeCoordinate,
    /// Degrees per tick.
    rotation_step: FreeCoordinate,
    /// Radians per tick the backdrop turns about -Y, regardless of state.
    backdrop_drift: FreeCoordinate,
    /// Whether the player was touching the shell as of the last check.
    colliding: bool,
}

impl FaceRotationController {
    /// Creates an idle controller.
    ///
    /// `initially_colliding` should be whether the player touches the shell where it
    /// starts, so that a player placed inside a cell is not held there.
    pub fn new(
        face_half_extent: FreeCoordinate,
        rotation_step: FreeCoordinate,
        backdrop_drift: FreeCoordinate,
        initially_colliding: bool,
    ) -> Self {
        Self {
            state: RotationState::Idle,
            face_half_extent,
            rotation_step,
            backdrop_drift,
            colliding: initially_colliding,
        }
    }

    /// The current state.
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Half the width of the square the player may move in.
    pub fn face_half_extent(&self) -> FreeCoordinate {
        self.face_half_extent
    }

    /// Whether the player was touching the shell as of the last check.
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Runs one tick.
    pub fn update(
        &mut self,
        shell: &mut Shell,
        player: &mut Player,
        backdrop: &mut GroupNode,
    ) -> TickReport {
        if self.backdrop_drift != 0.0 {
            backdrop.rotate(&FreeRotation::around_axis(
                -Axis::Y.positive_unit(),
                Angle::radians(self.backdrop_drift),
            ));
        }

        match self.state {
            RotationState::Idle => self.move_player(shell, player),
            RotationState::Rotating { direction, angle } => {
                self.advance(direction, angle, shell, player, backdrop)
            }
        }
    }

    fn move_player(&mut self, shell: &Shell, player: &mut Player) -> TickReport {
        let mut report = TickReport::new(TickPhase::Moving);
        player.unfreeze();
        report.moved = player.update();

        let was_colliding = self.colliding;
        let now_colliding = shell.intersects(player.collision_box());
        if now_colliding && !was_colliding {
            player.roll_back();
            report.rolled_back = true;
            self.colliding = shell.intersects(player.collision_box());
            log::trace!(
                "step into shell undone; still colliding: {}",
                self.colliding
            );
        } else {
            self.colliding = now_colliding;
        }
        report.collision = match (was_colliding, self.colliding) {
            (false, true) => Some(CollisionChange::Began),
            (true, false) => Some(CollisionChange::Ended),
            _ => None,
        };
        match report.collision {
            Some(CollisionChange::Began) => log::debug!("collision began"),
            Some(CollisionChange::Ended) => log::debug!("collision ended"),
            None => {}
        }

        if let Some(direction) = Direction::from_boundary_signal(self.clamp_to_face(player)) {
            player.freeze();
            self.state = RotationState::Rotating {
                direction,
                angle: 0.0,
            };
            report.rotation_started = Some(direction);
            log::debug!("spin world {direction}");
        }
        report
    }

    /// Pulls the player's x and y back into the face, and reports for each which way it
    /// was pulled.
    fn clamp_to_face(&self, player: &mut Player) -> [i8; 2] {
        let d = self.face_half_extent;
        let mut position = player.position();
        let mut signal = [0; 2];
        for (axis_signal, axis) in signal.iter_mut().zip(Axis::PLANAR) {
            let raw = position[axis];
            let clamped = raw.clamp(-d, d);
            *axis_signal = match clamped.partial_cmp(&raw) {
                Some(Ordering::Greater) => 1,
                Some(Ordering::Less) => -1,
                _ => 0,
            };
            position[axis] = clamped;
        }
        if signal != [0, 0] {
            player.set_position(position);
        }
        signal
    }

    fn advance(
        &mut self,
        direction: Direction,
        angle: FreeCoordinate,
        shell: &mut Shell,
        player: &mut Player,
        backdrop: &mut GroupNode,
    ) -> TickReport {
        let mut report = TickReport::new(TickPhase::Rotating);
        let new_angle = (angle + self.rotation_step).min(QUARTER_TURN_DEGREES);
        let increment = new_angle - angle;
        report.rotation_increment = increment;

        let rotation = rotation_about(
            direction.rotation_axis(),
            direction.angle_sign() * increment,
        );
        shell.root_mut().rotate(&rotation);
        backdrop.rotate(&rotation);
        player.revolve_about_origin(&rotation);

        if new_angle >= QUARTER_TURN_DEGREES {
            self.finish(shell, player);
            report.rotation_finished = Some(direction);
            log::debug!("finished spinning world {direction}");
        } else {
            self.state = RotationState::Rotating {
                direction,
                angle: new_angle,
            };
        }
        report
    }

    /// Puts everything back into exact positions once a quarter turn is complete.
    ///
    /// The player stays frozen until the next idle tick.
    fn finish(&mut self, shell: &mut Shell, player: &mut Player) {
        self.state = RotationState::Idle;
        shell.root_mut().snap_to_right_angles();

        let d = self.face_half_extent;
        let mut position = player.position();
        position.x = position.x.clamp(-d, d);
        position.y = position.y.clamp(-d, d);
        position.z = d;
        player.set_position(position);
        player.reset_orientation();
    }
}

//! [`Game`] ties together the shell, the player, the backdrop, and the rotation state
//! machine behind a single per-frame [`Game::update()`].

use rand::{Rng, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::face_rotation::{FaceRotationController, RotationState, TickReport};
use crate::math::{CellCoordinate, FreeCoordinate, FreePoint};
use crate::player::{MoveIntent, Player};
use crate::scene::{BACKDROP_NODE_NAME, GroupNode, Scene};
use crate::shell::{Shell, ShellError, ShellGenerator, ShellParams};

#[cfg(test)]
mod tests;

/// Everything that can be configured about a [`Game`].
///
/// Missing fields take their default values when deserializing.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
#[expect(clippy::exhaustive_structs)]
pub struct GameConfig {
    /// Number of cells along each edge of the shell. Must be odd and at least 3.
    pub cell_count: CellCoordinate,
    /// Edge length of the whole shell.
    pub total_size: FreeCoordinate,
    /// Diameter of the player's sphere.
    pub player_diameter: FreeCoordinate,
    /// Probability that each outer cell which is not a corner is present.
    pub keep_probability: f64,
    /// Degrees the world turns per tick during a face transition.
    pub rotation_step_degrees: FreeCoordinate,
    /// Distance the player moves per tick.
    pub step_distance: FreeCoordinate,
    /// Radians per tick the backdrop turns on its own.
    pub backdrop_drift: FreeCoordinate,
    /// Seed for generating the shell. If absent, the host picks one.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let ShellParams {
            cell_count,
            total_size,
            keep_probability,
        } = ShellParams::default();
        Self {
            cell_count,
            total_size,
            player_diameter: 0.3,
            keep_probability,
            rotation_step_degrees: 5.0,
            step_distance: 1.0 / 60.0,
            backdrop_drift: 2e-4,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The subset of the configuration which determines the shell.
    pub fn shell_params(&self) -> ShellParams {
        ShellParams {
            cell_count: self.cell_count,
            total_size: self.total_size,
            keep_probability: self.keep_probability,
        }
    }

    /// Half the width of the square the player may move in, which is also the player's
    /// distance from the center of the shell.
    pub fn face_half_extent(&self) -> FreeCoordinate {
        self.total_size / 2.0 - self.player_diameter
    }

    /// Where the player starts: the center of the +Z face.
    pub fn spawn_point(&self) -> FreePoint {
        FreePoint::new(0.0, 0.0, self.face_half_extent())
    }

    /// Checks the configuration without constructing anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shell_params().validate()?;
        let diameter = self.player_diameter;
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(ConfigError::InvalidPlayerDiameter(diameter));
        }
        if self.face_half_extent() <= 0.0 {
            return Err(ConfigError::PlayerTooLarge {
                diameter,
                total_size: self.total_size,
            });
        }
        let step = self.rotation_step_degrees;
        if !(step > 0.0 && step <= 90.0) {
            return Err(ConfigError::InvalidRotationStep(step));
        }
        if !(self.step_distance.is_finite() && self.step_distance > 0.0) {
            return Err(ConfigError::InvalidStepDistance(self.step_distance));
        }
        if !self.backdrop_drift.is_finite() {
            return Err(ConfigError::InvalidBackdropDrift(self.backdrop_drift));
        }
        Ok(())
    }
}

/// Ways a [`GameConfig`] can be invalid.
#[derive(Clone, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum ConfigError {
    /// The shell parameters are invalid.
    #[displaydoc("invalid shell parameters")]
    Shell(ShellError),
    /// The player's diameter is zero, negative, or not finite.
    #[displaydoc("player diameter must be finite and positive, but was {0}")]
    InvalidPlayerDiameter(FreeCoordinate),
    /// The player is too large to move around on a face of the shell.
    #[displaydoc("player of diameter {diameter} does not fit on a shell of size {total_size}")]
    PlayerTooLarge {
        /// The configured player diameter.
        diameter: FreeCoordinate,
        /// The configured shell size.
        total_size: FreeCoordinate,
    },
    /// The rotation step is not in `(0, 90]` degrees.
    #[displaydoc("rotation step must be more than 0 and at most 90 degrees, but was {0}")]
    InvalidRotationStep(FreeCoordinate),
    /// The step distance is zero, negative, or not finite.
    #[displaydoc("step distance must be finite and positive, but was {0}")]
    InvalidStepDistance(FreeCoordinate),
    /// The backdrop drift is not finite.
    #[displaydoc("backdrop drift must be finite, but was {0}")]
    InvalidBackdropDrift(FreeCoordinate),
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConfigError::Shell(e) => Some(e),
            ConfigError::InvalidPlayerDiameter(_)
            | ConfigError::PlayerTooLarge { .. }
            | ConfigError::InvalidRotationStep(_)
            | ConfigError::InvalidStepDistance(_)
            | ConfigError::InvalidBackdropDrift(_) => None,
        }
    }
}

impl From<ShellError> for ConfigError {
    fn from(value: ShellError) -> Self {
        Self::Shell(value)
    }
}

/// A complete game session.
///
/// The shell's root node and the backdrop are always attached to the game's [`Scene`].
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    scene: Scene,
    shell: Shell,
    player: Player,
    backdrop: GroupNode,
    controller: FaceRotationController,
    tick_count: u64,
}

impl Game {
    /// Starts a game, drawing the shell's random choices from `rng`.
    ///
    /// [`GameConfig::seed`] is ignored. The game starts out in a fresh [`Scene`].
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut shell = ShellGenerator::generate(config.shell_params(), rng)?;
        let mut scene = Scene::new();
        shell.bind(&mut scene)?;
        let backdrop = GroupNode::new(BACKDROP_NODE_NAME);
        scene.add_root(backdrop.name().clone());

        let player = Player::new(
            config.spawn_point(),
            config.player_diameter,
            config.step_distance,
        );
        let colliding = shell.intersects(player.collision_box());
        if colliding {
            log::debug!("player starts inside the shell");
        }
        let controller = FaceRotationController::new(
            config.face_half_extent(),
            config.rotation_step_degrees,
            config.backdrop_drift,
            colliding,
        );
        Ok(Self {
            config,
            scene,
            shell,
            player,
            backdrop,
            controller,
            tick_count: 0,
        })
    }

    /// Starts a game whose shell is determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, &mut Xoshiro256Plus::seed_from_u64(seed))
    }

    /// Moves the shell and the backdrop into `scene`, keeping all of their state, and
    /// returns the scene they were attached to before.
    pub fn rebind(&mut self, mut scene: Scene) -> Result<Scene, ShellError> {
        self.shell.rebind(&mut self.scene, &mut scene)?;
        self.scene.remove_root(self.backdrop.name());
        scene.add_root(self.backdrop.name().clone());
        Ok(core::mem::replace(&mut self.scene, scene))
    }

    /// Sets the input for the following [`Game::update()`]s.
    pub fn set_intent(&mut self, intent: MoveIntent) {
        self.player.set_intent(intent);
    }

    /// Advances the game by one tick.
    pub fn update(&mut self) -> TickReport {
        self.tick_count += 1;
        self.controller
            .update(&mut self.shell, &mut self.player, &mut self.backdrop)
    }

    /// The configuration this game was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scene the shell and the backdrop are attached to.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The shell.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The shell, for enabling and disabling cells.
    ///
    /// Use [`Game::rebind()`] rather than [`Shell::rebind()`] to move it to another scene.
    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The backdrop node, which turns with the shell and also drifts slowly.
    pub fn backdrop(&self) -> &GroupNode {
        &self.backdrop
    }

    /// Whether a face transition is in progress.
    pub fn rotation_state(&self) -> RotationState {
        self.controller.state()
    }

    /// Number of [`Game::update()`]s so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

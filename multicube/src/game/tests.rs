use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::face_rotation::{RotationState, TickPhase};
use crate::game::{ConfigError, Game, GameConfig};
use crate::math::FreePoint;
use crate::player::MoveIntent;
use crate::scene::Scene;
use crate::shell::ShellError;

#[test]
fn default_config() {
    let config = GameConfig::default();
    assert_eq!(config.cell_count, 5);
    assert_eq!(config.total_size, 3.0);
    assert_eq!(config.player_diameter, 0.3);
    assert_eq!(config.keep_probability, 0.3);
    assert_eq!(config.rotation_step_degrees, 5.0);
    assert_eq!(config.step_distance, 1.0 / 60.0);
    assert_eq!(config.backdrop_drift, 2e-4);
    assert_eq!(config.seed, None);
    assert!((config.face_half_extent() - 1.2).abs() < 1e-12);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn config_json_fills_in_defaults() {
    let config: GameConfig =
        serde_json::from_str(r#"{"cell_count": 7, "seed": 12}"#).unwrap();
    assert_eq!(
        config,
        GameConfig {
            cell_count: 7,
            seed: Some(12),
            ..GameConfig::default()
        }
    );
}

#[test]
fn config_json_rejects_unknown_fields() {
    let result = serde_json::from_str::<GameConfig>(r#"{"cellCount": 7}"#);
    assert!(result.is_err());
}

#[test]
fn config_json_round_trip() {
    let config = GameConfig {
        keep_probability: 0.5,
        seed: Some(99),
        ..GameConfig::default()
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["keep_probability"], serde_json::json!(0.5));
    assert_eq!(serde_json::from_value::<GameConfig>(json).unwrap(), config);
}

#[rstest]
#[case::even(
    GameConfig { cell_count: 6, ..GameConfig::default() },
    ConfigError::Shell(ShellError::EvenCellCount(6)),
)]
#[case::zero_diameter(
    GameConfig { player_diameter: 0.0, ..GameConfig::default() },
    ConfigError::InvalidPlayerDiameter(0.0),
)]
#[case::player_too_large(
    GameConfig { player_diameter: 1.5, ..GameConfig::default() },
    ConfigError::PlayerTooLarge { diameter: 1.5, total_size: 3.0 },
)]
#[case::zero_rotation_step(
    GameConfig { rotation_step_degrees: 0.0, ..GameConfig::default() },
    ConfigError::InvalidRotationStep(0.0),
)]
#[case::excessive_rotation_step(
    GameConfig { rotation_step_degrees: 91.0, ..GameConfig::default() },
    ConfigError::InvalidRotationStep(91.0),
)]
#[case::negative_step_distance(
    GameConfig { step_distance: -0.1, ..GameConfig::default() },
    ConfigError::InvalidStepDistance(-0.1),
)]
#[case::infinite_drift(
    GameConfig { backdrop_drift: f64::INFINITY, ..GameConfig::default() },
    ConfigError::InvalidBackdropDrift(f64::INFINITY),
)]
fn invalid_config(#[case] config: GameConfig, #[case] expected: ConfigError) {
    assert_eq!(config.validate(), Err(expected.clone()));
    assert_eq!(Game::with_seed(config, 0).unwrap_err(), expected);
}

#[test]
fn config_error_messages() {
    let error = ConfigError::PlayerTooLarge {
        diameter: 1.5,
        total_size: 3.0,
    };
    assert_eq!(
        error.to_string(),
        "player of diameter 1.5 does not fit on a shell of size 3"
    );

    let error = ConfigError::from(ShellError::CellCountTooSmall(1));
    assert_eq!(error.to_string(), "invalid shell parameters");
    assert_eq!(
        core::error::Error::source(&error).map(ToString::to_string),
        Some("cell count must be at least 3, but was 1".to_owned())
    );
}

#[test]
fn new_game_state() {
    let game = Game::with_seed(GameConfig::default(), 1).unwrap();
    assert_eq!(game.tick_count(), 0);
    assert_eq!(game.rotation_state(), RotationState::Idle);
    assert_eq!(game.player().position(), FreePoint::new(0.0, 0.0, 1.2));
    assert!(!game.player().is_frozen());
    assert_eq!(game.shell().cells().len(), 98);
    assert_eq!(game.backdrop().name().as_str(), "skybox");
    assert_eq!(game.shell().root().name().as_str(), "multi-cube-root");
}

#[test]
fn same_seed_same_shell() {
    let a = Game::with_seed(GameConfig::default(), 77).unwrap();
    let b = Game::with_seed(GameConfig::default(), 77).unwrap();
    assert!(a.shell().cells().eq(b.shell().cells()));
}

#[test]
fn update_counts_ticks_and_moves_player() {
    let mut game = Game::with_seed(
        GameConfig {
            keep_probability: 0.0,
            ..GameConfig::default()
        },
        0,
    )
    .unwrap();
    game.set_intent(MoveIntent {
        up: true,
        ..MoveIntent::IDLE
    });
    for _ in 0..6 {
        let report = game.update();
        assert_eq!(report.phase, TickPhase::Moving);
        assert!(report.moved);
    }
    assert_eq!(game.tick_count(), 6);
    let p = game.player().position();
    assert!((p.y - 0.1).abs() < 1e-12, "{p:?}");
}

#[test]
fn shell_mut_allows_editing_cells() {
    let mut game = Game::with_seed(
        GameConfig {
            keep_probability: 0.0,
            ..GameConfig::default()
        },
        0,
    )
    .unwrap();
    assert_eq!(game.shell().present_cell_count(), 8);
    game.shell_mut().set_present("2,2,0", true).unwrap();
    assert_eq!(game.shell().present_cell_count(), 9);
}

#[test]
fn new_game_is_bound_to_its_scene() {
    let game = Game::with_seed(GameConfig::default(), 1).unwrap();
    assert_eq!(game.shell().bound_scene(), Ok(game.scene().id()));
    assert!(game.scene().contains_root("multi-cube-root"));
    assert!(game.scene().contains_root("skybox"));
    assert_eq!(game.scene().roots().count(), 2);
}

#[test]
fn rebind_moves_shell_and_backdrop() {
    let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
    game.set_intent(MoveIntent {
        left: true,
        ..MoveIntent::IDLE
    });
    for _ in 0..5 {
        game.update();
    }
    let cells_before: Vec<_> = game.shell().cells().cloned().collect();
    let position_before = game.player().position();

    let new_scene = Scene::new();
    let new_id = new_scene.id();
    let old_scene = game.rebind(new_scene).unwrap();

    assert_eq!(game.scene().id(), new_id);
    assert_eq!(game.shell().bound_scene(), Ok(new_id));
    assert!(game.scene().contains_root("multi-cube-root"));
    assert!(game.scene().contains_root("skybox"));
    assert_eq!(old_scene.roots().count(), 0);

    // Nothing is regenerated or moved.
    assert!(game.shell().cells().eq(cells_before.iter()));
    assert_eq!(game.player().position(), position_before);
    assert_eq!(game.tick_count(), 5);
}

//! Integration tests for the level-to-world pipeline
//!
//! These tests verify that:
//! 1. The shipped level file matches the built-in layout
//! 2. Levels survive a save/load cycle on disk
//! 3. A world built from a level simulates sensibly over many ticks

use cubehop_core::{
    ContactFlags, GameWorld, GridBounds, Level, LevelValidator, PhysicsConfig, SlideDirection,
    TileMotion,
};

fn shipped_level_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels/default.ron")
}

// ==================== Level File Tests ====================

#[test]
fn test_shipped_level_matches_builtin_layout() {
    let level = Level::load(shipped_level_path()).expect("shipped level should load");
    assert_eq!(level, Level::default_layout());
    assert!(LevelValidator::validate(&level).is_empty());
}

#[test]
fn test_save_and_reload() {
    let level = Level::new("Saved", GridBounds { min: (0, 0), max: (3, 3) })
        .with_holes([(1, 1)])
        .with_bobbing([(0, 2)])
        .with_slider((2, 0), SlideDirection::TowardPosX)
        .with_player_spawn(0.0, 1.0, 0.0);

    let path = std::env::temp_dir().join(format!("cubehop_level_{}.ron", std::process::id()));
    level.save(&path).expect("save should succeed");
    let loaded = Level::load(&path).expect("load should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, level);
}

// ==================== Simulation Tests ====================

#[test]
fn test_default_world_player_lands_at_spawn() {
    let mut world = GameWorld::from_level(&Level::default_layout(), PhysicsConfig::default(), 7);

    let mut supported = false;
    for _ in 0..600 {
        let report = world.tick();
        assert!(!report.respawned, "player should not fall off at spawn");
        supported |= report.contacts.contains(ContactFlags::SUPPORTED);
    }

    assert!(supported);
    let player = world.player();
    assert!((player.position.y - (-1.3)).abs() < 0.05, "y = {}", player.position.y);
    assert_eq!(player.position.x, 0.0);
    assert_eq!(player.position.z, 0.0);
}

#[test]
fn test_spawn_over_hole_respawns() {
    // (-1, 0) is a hole in the default board
    let level = Level::default_layout().with_player_spawn(-1.0, 0.0, 0.0);
    let mut world = GameWorld::from_level(&level, PhysicsConfig::default(), 7);

    let respawned = (0..200).any(|_| world.tick().respawned);
    assert!(respawned);
}

#[test]
fn test_moving_tiles_stay_in_bounds() {
    let config = PhysicsConfig::default();
    let mut world = GameWorld::from_level(&Level::default_layout(), config.clone(), 11);

    for _ in 0..2000 {
        world.tick();
    }

    for (_, tile) in world.tiles() {
        match tile.motion {
            TileMotion::Static => assert_eq!(tile.position, tile.home),
            TileMotion::Bob => {
                let offset = (tile.position.y - tile.home.y).abs();
                assert!(offset <= config.bob_amplitude + config.bob_speed + 1e-3);
                assert_eq!(tile.position.x, tile.home.x);
                assert_eq!(tile.position.z, tile.home.z);
            }
            TileMotion::Slide(direction) => {
                let slack = config.slide_speed + 1e-3;
                let along = if direction.is_x_axis() {
                    assert_eq!(tile.position.z, tile.home.z);
                    tile.position.x
                } else {
                    assert_eq!(tile.position.x, tile.home.x);
                    tile.position.z
                };
                assert!(along.abs() <= config.slide_limit + slack);
                assert_eq!(tile.position.y, tile.home.y);
            }
        }
    }
}

#[test]
fn test_worlds_with_same_seed_agree() {
    let run = |seed| {
        let mut world = GameWorld::from_level(&Level::default_layout(), PhysicsConfig::default(), seed);
        for _ in 0..120 {
            world.tick();
        }
        world
            .tiles()
            .filter(|(_, t)| t.motion == TileMotion::Bob)
            .map(|(_, t)| t.position.y)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}

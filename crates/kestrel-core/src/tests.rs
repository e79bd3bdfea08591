use strum::IntoEnumIterator;

use crate::clock::{Clock, ManualClock};
use crate::commands::{AvatarCommand, EngineCommand, InputEvent};
use crate::config::{AppConfig, SchedulerConfig};
use crate::enums::*;
use crate::error::ConfigError;
use crate::types::*;

// ---- Geometry ----

#[test]
fn test_rect_overlap_is_exclusive_on_edges() {
    let a = Rect::new(0, 0, 16, 16);
    assert!(a.overlaps(&Rect::new(15, 15, 4, 4)));
    assert!(!a.overlaps(&Rect::new(16, 0, 4, 4)), "touching edges do not overlap");
    assert!(!a.overlaps(&Rect::new(0, 16, 4, 4)));
}

#[test]
fn test_direction8_offsets_match_angles() {
    for direction8 in 0..8u8 {
        let (dx, dy) = direction8_offset(direction8);
        let angle = direction8_angle(direction8);
        assert_eq!(dx, angle.cos().round() as i32, "dx of {direction8}");
        assert_eq!(dy, -(angle.sin().round() as i32), "dy of {direction8}");
        assert_eq!(offset_to_direction8(dx, dy), Some(direction8));
        assert_eq!(angle_to_direction8(angle), direction8);
    }
    assert_eq!(offset_to_direction8(0, 0), None);
}

#[test]
fn test_point_angle_uses_math_orientation() {
    let origin = Point::new(0, 0);
    let north = Point::new(0, -10);
    let angle = origin.angle_to(&north);
    assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert_eq!(origin.distance_to(&Point::new(3, 4)), 5.0);
}

#[test]
fn test_direction4_from_diagonal_keeps_current_component() {
    // North-east while facing up stays up.
    assert_eq!(Direction4::from_direction8(1, Direction4::Up), Direction4::Up);
    // North-east while facing down prefers the horizontal component.
    assert_eq!(Direction4::from_direction8(1, Direction4::Down), Direction4::Right);
    assert_eq!(Direction4::from_direction8(4, Direction4::Up), Direction4::Left);
    assert_eq!(Direction4::Left.opposite(), Direction4::Right);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(10);
    time.advance(10);
    assert_eq!(time.tick, 2);
    assert_eq!(time.now_ms, 20);
}

// ---- Immunities ----

#[test]
fn test_every_hazard_has_a_distinct_flag() {
    let mut all = Immunities::empty();
    for hazard in Hazard::iter() {
        let flag = Immunities::from(hazard);
        assert!(!all.intersects(flag), "{hazard} shares a bit");
        all |= flag;
    }
    assert_eq!(all, Immunities::all());
}

#[test]
fn test_airborne_group_excludes_sensors() {
    assert!(Immunities::AIRBORNE.contains(Immunities::GROUND));
    assert!(!Immunities::AIRBORNE.contains(Immunities::SENSOR));
    assert!(!Immunities::AIRBORNE.contains(Immunities::EXPLOSION));
}

#[test]
fn test_ground_hazards() {
    assert_eq!(Ground::Hole.hazard(), Some(Hazard::Hole));
    assert_eq!(Ground::Traversable.hazard(), None);
    assert!(Ground::Grass.is_solid());
    assert!(!Ground::Lava.is_solid());
    assert_eq!(Layer::Intermediate.below(), Some(Layer::Low));
    assert_eq!(Layer::Low.below(), None);
}

// ---- Config ----

#[test]
fn test_default_config_is_valid() {
    AppConfig::default().validate().unwrap();
}

#[test]
fn test_config_partial_json_uses_defaults() {
    let config = AppConfig::from_json(r#"{ "scheduler": { "max_steps_per_frame": 4 } }"#)
        .unwrap();
    assert_eq!(config.scheduler.max_steps_per_frame, 4);
    assert_eq!(config.scheduler.timestep_ms, 10);
    assert_eq!(config.sim.seed, 42);
}

#[test]
fn test_config_rejects_mismatched_timestep() {
    let err = AppConfig::from_json(r#"{ "sim": { "timestep_ms": 16 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "sim.timestep_ms", .. }));
}

#[test]
fn test_scheduler_config_rejects_small_threshold() {
    let config = SchedulerConfig {
        stall_threshold_ms: 10,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_parse_error() {
    let err = AppConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ---- Commands ----

#[test]
fn test_engine_command_json_shape() {
    let cmd = EngineCommand::Input(InputEvent::ItemPressed { slot: 1 });
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"kind\":\"Input\""), "{json}");
    let back: EngineCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);

    let walk = EngineCommand::Avatar(AvatarCommand::Walk {
        path: "0044".into(),
        looping: false,
        ignore_obstacles: true,
    });
    let back: EngineCommand = serde_json::from_str(&serde_json::to_string(&walk).unwrap()).unwrap();
    assert_eq!(back, walk);
}

// ---- Clock ----

#[test]
fn test_manual_clock_shared_between_clones() {
    let clock = ManualClock::new();
    let handle = clock.clone();
    handle.advance(25);
    assert_eq!(clock.now_ms(), 25);
    clock.sleep_ms(5);
    assert_eq!(handle.now_ms(), 30);
    assert_eq!(handle.total_slept(), 5);
}

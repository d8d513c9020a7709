//! Simulation configuration, loadable from YAML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```yaml
//! tick: 0.016
//! physics:
//!   gravity: 0.6674
//!   trail_max: 100
//!   guard:
//!     policy: fixed       # or sum_of_radii
//!     distance: 1.0
//! spawn:
//!   speed_factor: 2.0
//!   mass_cap: 500.0
//! bodies:                 # omit for the default sun + planet system
//!   - position: [0.0, 0.0]
//!     velocity: [0.0, 0.0]
//!     mass: 2000.0
//!     radius: 20.0
//!     color: [255, 69, 0, 255]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use macroquad::color::Color;
use serde::Deserialize;
use ultraviolet::Vec2;

use crate::error::SimError;
use crate::gravity::{Gravity, SingularityGuard, G};
use crate::physics::Body;
use crate::spawn::SpawnConfig;
use crate::trail::{TRAIL_LIMIT, TRAIL_MAX};

/// Fixed step handed to the engine, matching a ~60 Hz timer.
pub const TICK: f32 = 0.016;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub tick: f32,
    pub physics: PhysicsConfig,
    pub spawn: SpawnConfig,
    pub bodies: Option<Vec<BodyConfig>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick: TICK,
            physics: PhysicsConfig::default(),
            spawn: SpawnConfig::default(),
            bodies: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub trail_max: usize,
    pub guard: SingularityGuard,
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Gravity {
        Gravity::new(self.gravity, self.guard)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: G,
            trail_max: TRAIL_MAX,
            guard: SingularityGuard::default(),
        }
    }
}

/// Initial state of one body.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub position: [f32; 2],
    #[serde(default)]
    pub velocity: [f32; 2],
    pub mass: f32,
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: [u8; 4],
}

fn default_color() -> [u8; 4] {
    [255, 255, 255, 255]
}

impl BodyConfig {
    pub fn build(&self, trail_max: usize) -> Result<Body, SimError> {
        let [r, g, b, a] = self.color;

        Ok(Body::new(
            Vec2::from(self.position),
            Vec2::from(self.velocity),
            self.mass,
            self.radius,
            Color::from_rgba(r, g, b, a),
        )?
        .with_trail_capacity(trail_max))
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SimError> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let spawn = &self.spawn;

        ensure("tick", self.tick, self.tick.is_finite() && self.tick > 0.0)?;
        ensure(
            "physics.gravity",
            self.physics.gravity,
            self.physics.gravity.is_finite() && self.physics.gravity >= 0.0,
        )?;

        ensure(
            "physics.trail_max",
            self.physics.trail_max as f32,
            self.physics.trail_max <= TRAIL_LIMIT,
        )?;

        if let SingularityGuard::Fixed { distance } = self.physics.guard {
            ensure("physics.guard.distance", distance, distance.is_finite() && distance >= 0.0)?;
        }

        ensure("spawn.speed_factor", spawn.speed_factor, spawn.speed_factor.is_finite())?;
        ensure(
            "spawn.mass_per_unit",
            spawn.mass_per_unit,
            spawn.mass_per_unit.is_finite() && spawn.mass_per_unit >= 0.0,
        )?;
        ensure(
            "spawn.mass_floor",
            spawn.mass_floor,
            spawn.mass_floor.is_finite() && spawn.mass_floor > 0.0,
        )?;
        ensure(
            "spawn.mass_cap",
            spawn.mass_cap,
            spawn.mass_cap.is_finite() && spawn.mass_cap >= spawn.mass_floor,
        )?;
        ensure(
            "spawn.min_radius",
            spawn.min_radius,
            spawn.min_radius.is_finite() && spawn.min_radius >= 0.0,
        )?;
        ensure(
            "spawn.radius_divisor",
            spawn.radius_divisor,
            spawn.radius_divisor.is_finite() && spawn.radius_divisor > 0.0,
        )
    }
}

fn ensure(name: &'static str, value: f32, ok: bool) -> Result<(), SimError> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SimConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn parses_guard_policies() {
        let yaml = "physics:\n  guard:\n    policy: sum_of_radii\n";
        let config = SimConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.physics.guard, SingularityGuard::SumOfRadii);

        let yaml = "physics:\n  guard:\n    policy: fixed\n    distance: 2.5\n";
        let config = SimConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.physics.guard, SingularityGuard::Fixed { distance: 2.5 });
        assert_eq!(config.physics.gravity, G);
    }

    #[test]
    fn parses_bodies() {
        let yaml = "bodies:\n  - position: [1.0, 2.0]\n    mass: 3.0\n    radius: 4.0\n";
        let config = SimConfig::from_reader(yaml.as_bytes()).unwrap();
        let bodies = config.bodies.unwrap();

        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].velocity, [0.0, 0.0]);
        assert_eq!(bodies[0].color, default_color());

        let body = bodies[0].build(7).unwrap();
        assert_eq!(body.pos, Vec2::new(1.0, 2.0));
        assert_eq!(body.trail.capacity(), 7);
    }

    #[test]
    fn rejects_bad_parameters() {
        for yaml in [
            "tick: 0.0",
            "physics:\n  gravity: -1.0",
            "spawn:\n  mass_floor: 0.0",
            "spawn:\n  mass_cap: 0.5",
            "spawn:\n  radius_divisor: 0.0",
            "spawn:\n  min_radius: .inf",
            "physics:\n  trail_max: 100001",
            "physics:\n  trail_max: 4611686018427387903",
        ] {
            let result = SimConfig::from_reader(yaml.as_bytes());
            assert!(
                matches!(result, Err(SimError::InvalidParameter { .. })),
                "accepted {yaml:?}"
            );
        }
    }

    #[test]
    fn rejects_massless_body() {
        let body = BodyConfig {
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            mass: 0.0,
            radius: 1.0,
            color: default_color(),
        };

        assert!(matches!(body.build(TRAIL_MAX), Err(SimError::InvalidMass(_))));
    }

    #[test]
    fn rejects_negative_body_radius() {
        let yaml = "bodies:\n  - position: [0.0, 0.0]\n    mass: 1.0\n    radius: -2.0\n";
        let config = SimConfig::from_reader(yaml.as_bytes()).unwrap();
        let bodies = config.bodies.unwrap();

        assert!(matches!(bodies[0].build(TRAIL_MAX), Err(SimError::InvalidRadius(_))));
    }

    #[test]
    fn accepts_largest_trail() {
        let yaml = format!("physics:\n  trail_max: {TRAIL_LIMIT}\n");
        let config = SimConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.physics.trail_max, TRAIL_LIMIT);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = SimConfig::from_reader("tick: [".as_bytes());
        assert!(matches!(result, Err(SimError::Parse(_))));
    }
}

use macroquad::color::Color;
use serde::Deserialize;
use ultraviolet::Vec2;

use crate::error::SimError;
use crate::physics::Body;

/// A click-and-drag in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: Vec2,
    pub end: Vec2,
}

impl Gesture {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn drag(&self) -> Vec2 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub speed_factor: f32,
    pub mass_per_unit: f32,
    pub mass_cap: f32,
    pub mass_floor: f32,
    pub min_radius: f32,
    pub radius_divisor: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            speed_factor: 2.0,
            mass_per_unit: 2.0,
            mass_cap: 500.0,
            mass_floor: 1.0,
            min_radius: 4.0,
            radius_divisor: 50.0,
        }
    }
}

impl SpawnConfig {
    pub fn velocity(&self, gesture: &Gesture) -> Vec2 {
        gesture.drag() * self.speed_factor
    }

    /// Proportional to drag length, capped above and floored above zero.
    pub fn mass(&self, gesture: &Gesture) -> f32 {
        (gesture.drag().mag() * self.mass_per_unit)
            .min(self.mass_cap)
            .max(self.mass_floor)
    }

    pub fn radius(&self, mass: f32) -> f32 {
        (mass / self.radius_divisor).max(self.min_radius)
    }

    /// Builds the body a gesture describes, placed at the drag start.
    pub fn body(&self, gesture: &Gesture, color: Color) -> Result<Body, SimError> {
        let mass = self.mass(gesture);

        Body::new(
            gesture.start,
            self.velocity(gesture),
            mass,
            self.radius(mass),
            color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::color::WHITE;

    #[test]
    fn horizontal_drag() {
        let config = SpawnConfig::default();
        let gesture = Gesture::new(Vec2::zero(), Vec2::new(100.0, 0.0));
        let body = config.body(&gesture, WHITE).unwrap();

        assert_eq!(body.vel, Vec2::new(200.0, 0.0));
        assert_eq!(body.mass, 200.0);
        assert_eq!(body.radius, 4.0);
        assert_eq!(body.pos, Vec2::zero());
        assert!(body.trail.is_empty());
    }

    #[test]
    fn long_drag_is_capped() {
        let config = SpawnConfig::default();
        let gesture = Gesture::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 1010.0));

        assert_eq!(config.mass(&gesture), 500.0);
        assert_eq!(config.radius(500.0), 10.0);
    }

    #[test]
    fn click_without_drag_gets_floor_mass() {
        let config = SpawnConfig::default();
        let point = Vec2::new(5.0, -5.0);
        let body = config.body(&Gesture::new(point, point), WHITE).unwrap();

        assert_eq!(body.mass, config.mass_floor);
        assert_eq!(body.vel, Vec2::zero());
        assert_eq!(body.radius, config.min_radius);
    }
}

use core::borrow::Borrow;
use core::ops::{Deref, DerefMut};

use macroquad::color::Color;
use ultraviolet::Vec2;

use crate::error::SimError;
use crate::trail::{Trail, TRAIL_MAX};

#[derive(Debug, Clone)]
pub struct Body {
    pub body: Sphere,
    pub vel: Vec2,
    pub color: Color,
    pub trail: Trail,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, mass: f32, radius: f32, color: Color) -> Result<Self, SimError> {
        check_mass(mass)?;
        check_radius(radius)?;

        Ok(Self {
            body: Sphere::new(pos, mass, radius),
            vel,
            color,
            trail: Trail::new(TRAIL_MAX),
        })
    }

    /// Replaces the trail with an empty one holding at most `capacity` points.
    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail = Trail::new(capacity);
        self
    }

    /// Semi-implicit Euler step under a constant `force`, then records the new position.
    ///
    /// Velocity is advanced first and the updated velocity moves the body.
    pub fn integrate(&mut self, force: Vec2, dt: f32) {
        let acc = force / self.body.mass;

        self.vel += acc * dt;
        self.body.pos += self.vel * dt;

        self.trail.push(self.body.pos);
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }
}

impl Deref for Body {
    type Target = Sphere;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl DerefMut for Body {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.body
    }
}

impl Borrow<Sphere> for Body {
    fn borrow(&self) -> &Sphere {
        &self.body
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub pos: Vec2,
    pub mass: f32,
    pub radius: f32,
}

impl Sphere {
    pub fn new(pos: Vec2, mass: f32, radius: f32) -> Self {
        Self { pos, mass, radius }
    }
}

pub(crate) fn check_mass(mass: f32) -> Result<(), SimError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidMass(mass))
    }
}

/// A NaN radius would silently disable the sum-of-radii guard.
pub(crate) fn check_radius(radius: f32) -> Result<(), SimError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRadius(radius))
    }
}

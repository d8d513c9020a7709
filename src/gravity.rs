//! All-pairs Newtonian gravity.
//!
//! Every pair of bodies interacts, so the cost is O(n²). There is no
//! tree approximation: the body counts this sandbox deals with are small.

use core::borrow::Borrow;

use itertools::Itertools;
use serde::Deserialize;
use ultraviolet::Vec2;

use crate::physics::Sphere;

pub const G: f32 = 0.6674;
pub const GUARD_DISTANCE: f32 = 1.0;

/// Pairs closer than the guard threshold exert no force on each other.
///
/// This is an approximation, not a physical limit. It keeps the inverse
/// square law from blowing up when two bodies overlap.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SingularityGuard {
    Fixed { distance: f32 },
    SumOfRadii,
}

impl SingularityGuard {
    fn threshold(&self, a: &Sphere, b: &Sphere) -> f32 {
        match *self {
            Self::Fixed { distance } => distance,
            Self::SumOfRadii => a.radius + b.radius,
        }
    }
}

impl Default for SingularityGuard {
    fn default() -> Self {
        Self::Fixed {
            distance: GUARD_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub g: f32,
    pub guard: SingularityGuard,
}

impl Gravity {
    pub fn new(g: f32, guard: SingularityGuard) -> Self {
        Self { g, guard }
    }

    /// Force exerted on `subject` by `source`, or `None` inside the guard.
    pub fn force_on(&self, subject: &Sphere, source: &Sphere) -> Option<Vec2> {
        let delta = source.pos - subject.pos;
        let dist_sq = delta.mag_sq();
        let dist = dist_sq.sqrt();

        if dist < self.guard.threshold(subject, source) || dist == 0.0 {
            return None;
        }

        let magnitude = self.g * subject.mass * source.mass / dist_sq;

        Some(delta * magnitude / dist)
    }

    /// Adds the net force on each object into `field`, indexed like `objects`.
    ///
    /// Only reads `objects`, so every force comes from the same snapshot.
    pub fn accumulate<T: Borrow<Sphere>>(&self, objects: &[T], field: &mut [Vec2]) {
        debug_assert_eq!(objects.len(), field.len());

        // Each pair is evaluated once. The reverse force is the exact negation,
        // and contributions still arrive in ascending source order per body.
        for (a, b) in (0..objects.len()).tuple_combinations() {
            if let Some(force) = self.force_on(objects[a].borrow(), objects[b].borrow()) {
                field[a] += force;
                field[b] -= force;
            }
        }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(G, SingularityGuard::default())
    }
}

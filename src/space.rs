use ultraviolet::Vec2;

use crate::error::SimError;
use crate::physics::{check_mass, check_radius, Body};

/// Insertion-ordered store of every body in the simulation.
///
/// Bodies are never removed or merged, so an index identifies the same body
/// for the whole run.
#[derive(Debug, Clone, Default)]
pub struct Space {
    bodies: Vec<Body>,
}

impl Space {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, body: Body) -> Result<(), SimError> {
        check_mass(body.mass)?;
        check_radius(body.radius)?;
        self.bodies.push(body);
        Ok(())
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Body> + ExactSizeIterator + '_ {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> + '_ {
        self.bodies.iter_mut()
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::zero(), |sum, body| sum + body.momentum())
    }

    pub fn centre_of_mass(&self) -> Option<Vec2> {
        if self.bodies.is_empty() {
            return None;
        }

        let (weighted, mass) = self
            .bodies
            .iter()
            .fold((Vec2::zero(), 0.0), |(weighted, mass), body| {
                (weighted + body.pos * body.mass, mass + body.mass)
            });

        Some(weighted / mass)
    }
}

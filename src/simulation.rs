use log::{debug, info, trace, warn};
use macroquad::color::{Color, LIGHTGRAY, ORANGE, PINK, SKYBLUE, VIOLET, YELLOW};
use ultraviolet::Vec2;

use crate::{
    config::SimConfig,
    error::SimError,
    gravity::Gravity,
    physics::Body,
    space::Space,
    spawn::Gesture,
};

const SUN_COLOR: Color = Color::new(1.0, 0.27, 0.0, 1.0);
const PLANET_COLOR: Color = Color::new(0.68, 0.85, 0.9, 1.0);

const SPAWN_PALETTE: [Color; 6] = [LIGHTGRAY, ORANGE, PINK, SKYBLUE, VIOLET, YELLOW];

/// How often, in ticks, momentum diagnostics are logged.
const DIAGNOSTICS_INTERVAL: u64 = 600;

pub struct Simulation {
    space: Space,
    gravity: Gravity,
    field: Vec<Vec2>,
    config: SimConfig,
    ticks: u64,
    elapsed: f32,
}

impl Simulation {
    /// Builds a simulation from `config`, using its bodies if it lists any
    /// and the default sun and planet otherwise.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut sim = Self {
            space: Space::new(),
            gravity: config.physics.gravity(),
            field: Vec::new(),
            config,
            ticks: 0,
            elapsed: 0.0,
        };

        match sim.config.bodies.clone() {
            Some(bodies) => {
                for body in &bodies {
                    sim.insert(body.build(sim.config.physics.trail_max)?)?;
                }
            }
            None => sim.init_sun_and_planet()?,
        }

        info!(
            "Simulation initialised with {} bodies (G = {}, guard = {:?})",
            sim.space.len(),
            sim.gravity.g,
            sim.gravity.guard
        );

        Ok(sim)
    }

    fn init_sun_and_planet(&mut self) -> Result<(), SimError> {
        let sun_mass = 2000.0;
        let orbit_radius = 150.0;
        let speed = (self.gravity.g * sun_mass / orbit_radius).sqrt();

        self.add_body(Vec2::zero(), Vec2::zero(), sun_mass, 20.0, SUN_COLOR)?;
        self.add_body(
            Vec2::new(orbit_radius, 0.0),
            Vec2::new(0.0, speed),
            10.0,
            8.0,
            PLANET_COLOR,
        )
    }

    /// Advances every body by `dt`.
    ///
    /// All net forces are computed from the current positions before any body
    /// moves, so the result does not depend on body order.
    pub fn step(&mut self, dt: f32) {
        debug_assert!(dt.is_finite(), "non-finite timestep {dt}");

        self.field.clear();
        self.field.resize(self.space.len(), Vec2::zero());

        self.gravity.accumulate(self.space.as_slice(), &mut self.field);

        for (body, &force) in self.space.iter_mut().zip(&self.field) {
            body.integrate(force, dt);
        }

        self.ticks += 1;
        self.elapsed += dt;

        trace!("tick {} ({} bodies)", self.ticks, self.space.len());

        if self.ticks % DIAGNOSTICS_INTERVAL == 0 {
            debug!(
                "t = {:.2}: momentum {:?}, centre of mass {:?}",
                self.elapsed,
                self.space.total_momentum(),
                self.space.centre_of_mass()
            );
        }
    }

    pub fn add_body(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        mass: f32,
        radius: f32,
        color: Color,
    ) -> Result<(), SimError> {
        let body = Body::new(pos, vel, mass, radius, color)?
            .with_trail_capacity(self.config.physics.trail_max);

        self.insert(body)
    }

    /// Inserts the body described by a drag gesture, with a random palette color.
    pub fn spawn(&mut self, gesture: Gesture) -> Result<(), SimError> {
        let spawn = &self.config.spawn;

        if gesture.drag().mag() * spawn.mass_per_unit < spawn.mass_floor {
            warn!("Spawn gesture {:?} too short, mass clamped to {}", gesture, spawn.mass_floor);
        }

        let color = SPAWN_PALETTE[fastrand::usize(..SPAWN_PALETTE.len())];
        let body = spawn
            .body(&gesture, color)?
            .with_trail_capacity(self.config.physics.trail_max);

        self.insert(body)
    }

    fn insert(&mut self, body: Body) -> Result<(), SimError> {
        info!(
            "Adding body: pos {:?}, vel {:?}, mass {}, radius {}",
            body.pos, body.vel, body.mass, body.radius
        );
        self.space.add(body)
    }

    pub fn bodies(&self) -> impl DoubleEndedIterator<Item = &Body> + ExactSizeIterator + '_ {
        self.space.iter()
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn len(&self) -> usize {
        self.space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space.is_empty()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

pub mod config;
pub mod error;
pub mod gravity;
pub mod physics;
pub mod simulation;
pub mod space;
pub mod spawn;
pub mod trail;

pub use config::{BodyConfig, PhysicsConfig, SimConfig};
pub use error::SimError;
pub use gravity::{Gravity, SingularityGuard};
pub use physics::{Body, Sphere};
pub use simulation::Simulation;
pub use space::Space;
pub use spawn::{Gesture, SpawnConfig};
pub use trail::Trail;

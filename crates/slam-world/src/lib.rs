//! `slam-world`: the ground-truth world the agent senses.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`obstacle`]    | `Obstacle` (oriented rectangle), `Corner`, `Edge`          |
//! | [`environment`] | `Environment` (bounds + obstacles + boundary walls)        |
//! | [`ray`]         | `Ray`, `Contact`, `RaySample`, `RaySamples`, `ray_fan`     |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                             |
//!
//! The environment is read-only once built.  Rays hold no pose of their own:
//! every query takes the sensor pose explicitly, so there is no back-reference
//! from a ray to its agent.

pub mod environment;
pub mod error;
pub mod obstacle;
pub mod ray;

#[cfg(test)]
mod tests;

pub use environment::{Environment, WALL_THICKNESS};
pub use error::{WorldError, WorldResult};
pub use obstacle::{Corner, Edge, Obstacle};
pub use ray::{ray_fan, Contact, Ray, RaySample, RaySamples};

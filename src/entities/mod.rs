//! Kinematic bodies and the rectangle they collide with.

pub mod types;

pub use types::*;

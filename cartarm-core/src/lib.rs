pub mod algorithm;
pub mod control;
pub mod geometry;
pub mod kinematic;
pub mod label;
pub mod parameter;
pub mod scene;

pub use nalgebra;

pub use kinematic::{evaluate, Cart, CartGeometry, WorldPoints};
pub use parameter::{ParameterId, Parameters, RawParameters};

/// Homogeneous 2D point `(x, y, 1)`.
pub type Point = nalgebra::Vector3<f64>;

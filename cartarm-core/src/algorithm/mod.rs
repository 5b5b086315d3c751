pub mod determinant;

pub use determinant::{
    determinant, factorial, simplex_volume, simplex_volume_with_limit, VolumeError, MAX_DIMENSION,
};

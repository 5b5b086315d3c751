use nalgebra::DMatrix;

/// Default largest dimension accepted by [`simplex_volume`].
///
/// Cofactor expansion costs O(n!), at n = 8 that is already 40320 leaf
/// products. Anything beyond this should use a decomposition instead.
pub const MAX_DIMENSION: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Point set does not describe a simplex.
    InvalidArgument(String),
    /// Dimension exceeds the configured limit.
    DimensionTooLarge { dimension: usize, limit: usize },
}

impl std::fmt::Display for VolumeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            Self::DimensionTooLarge { dimension, limit } => {
                write!(f, "dimension {} exceeds maximum of {}", dimension, limit)
            }
        }
    }
}

impl std::error::Error for VolumeError {}

/// Calculate the determinant of a square matrix.
///
/// Recursive cofactor (Laplace) expansion along the first row. The
/// result is exact up to floating point rounding, but the cost grows
/// factorially with the matrix size. This is only suitable for small
/// matrices, a warning is logged above [`MAX_DIMENSION`].
///
/// The empty matrix has determinant 1.
///
/// # Panics
///
/// Panics if the matrix is not square.
pub fn determinant(matrix: &DMatrix<f64>) -> f64 {
    assert!(matrix.is_square(), "determinant of a non-square matrix");

    if matrix.nrows() > MAX_DIMENSION {
        log::warn!(
            "Cofactor expansion on {}x{} matrix, this may take a while",
            matrix.nrows(),
            matrix.ncols()
        );
    }

    cofactor_expansion(matrix)
}

fn cofactor_expansion(matrix: &DMatrix<f64>) -> f64 {
    match matrix.nrows() {
        0 => 1.0,
        1 => matrix[(0, 0)],
        size => {
            let mut det = 0.0;

            for i in 0..size {
                let minor = matrix.clone().remove_row(0).remove_column(i);
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };

                det += sign * matrix[(0, i)] * cofactor_expansion(&minor);
            }

            det
        }
    }
}

/// Factorial of `n` as a float.
#[inline]
pub fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

/// Calculate the n-dimensional volume of a simplex.
///
/// The simplex is given as n + 1 points of dimension n. The volume is
/// `|det(E)| / n!` where the rows of `E` are the edge vectors from the
/// first point to every other point. Affinely dependent point sets yield
/// a volume of (nearly) zero.
///
/// Dimensions above [`MAX_DIMENSION`] are rejected, see
/// [`simplex_volume_with_limit`] to raise or lower the limit.
pub fn simplex_volume<P: AsRef<[f64]>>(points: &[P]) -> Result<f64, VolumeError> {
    simplex_volume_with_limit(points, MAX_DIMENSION)
}

/// Calculate the volume of a simplex, rejecting dimensions above `max_dimension`.
pub fn simplex_volume_with_limit<P: AsRef<[f64]>>(
    points: &[P],
    max_dimension: usize,
) -> Result<f64, VolumeError> {
    let origin = points
        .first()
        .ok_or_else(|| VolumeError::InvalidArgument("no points given".to_owned()))?
        .as_ref();

    let dim = origin.len();
    if dim == 0 {
        return Err(VolumeError::InvalidArgument(
            "points must have at least one dimension".to_owned(),
        ));
    }

    if let Some(point) = points.iter().find(|point| point.as_ref().len() != dim) {
        return Err(VolumeError::InvalidArgument(format!(
            "mixed point dimensions, expected {} got {}",
            dim,
            point.as_ref().len()
        )));
    }

    if points.len() != dim + 1 {
        return Err(VolumeError::InvalidArgument(format!(
            "expected {} points for dimension {}, got {}",
            dim + 1,
            dim,
            points.len()
        )));
    }

    if dim > max_dimension {
        return Err(VolumeError::DimensionTooLarge {
            dimension: dim,
            limit: max_dimension,
        });
    }

    let edges = DMatrix::from_fn(dim, dim, |row, col| {
        points[row + 1].as_ref()[col] - origin[col]
    });

    Ok(determinant(&edges).abs() / factorial(dim))
}

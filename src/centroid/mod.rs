//! Spherical centroid computation
//!
//! Computes the mean position of a set of coordinates by treating each point
//! as a unit vector on a sphere, averaging the Cartesian components, and
//! converting the mean vector back to latitude/longitude. Arithmetic
//! averaging of raw degrees is wrong near the antimeridian and the poles;
//! the mean-vector form is the standard low-cost approximation of the
//! spherical centroid (it is not the exact geodesic centroid).
//!
//! The computation is streaming: workers feed coordinates into a
//! [`CentroidAccumulator`] in any order, and accumulators can be merged.
//! The result is invariant under permutation of the input up to
//! floating-point summation order.
//!
//! # Example
//!
//! ```
//! use geocenter::centroid::CentroidAccumulator;
//! use geocenter::coord::Coordinate;
//!
//! let mut acc = CentroidAccumulator::new();
//! acc.add(Coordinate::new(43.704372, -79.464364).unwrap());
//! acc.add(Coordinate::new(43.701208, -79.452106).unwrap());
//!
//! let center = acc.finish().unwrap();
//! println!("center: {}", center);
//! ```

use crate::coord::Coordinate;
use thiserror::Error;

/// Mean-vector magnitudes below this are treated as degenerate
///
/// Antipodal pairs and other mutually cancelling point sets produce a mean
/// vector of near-zero length, for which a direction (and therefore a
/// centroid) is undefined.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Error returned when no centroid exists for the accumulated input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CentroidError {
    /// No coordinates were accumulated; a centroid is undefined
    ///
    /// This is reported explicitly so that an empty input can never be
    /// confused with the real point (0, 0) in the Gulf of Guinea.
    #[error("no coordinates to aggregate; centroid is undefined")]
    Empty,

    /// The mean vector has near-zero magnitude (e.g. antipodal points)
    #[error("input points cancel out; centroid is degenerate")]
    Degenerate,
}

/// Streaming accumulator for the spherical centroid
///
/// Maintains running sums of the unit-vector components of every coordinate
/// added so far. `add` and `merge` are commutative and associative, so any
/// arrival order yields the same result up to floating-point rounding.
#[derive(Debug, Clone, Default)]
pub struct CentroidAccumulator {
    x_sum: f64,
    y_sum: f64,
    z_sum: f64,
    count: u64,
}

impl CentroidAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate to the running sums
    ///
    /// Converts the point to a Cartesian unit vector:
    /// x = cos(lat)·cos(lon), y = cos(lat)·sin(lon), z = sin(lat).
    pub fn add(&mut self, coord: Coordinate) {
        let lat = coord.latitude().to_radians();
        let lon = coord.longitude().to_radians();

        self.x_sum += lat.cos() * lon.cos();
        self.y_sum += lat.cos() * lon.sin();
        self.z_sum += lat.sin();
        self.count += 1;
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: &CentroidAccumulator) {
        self.x_sum += other.x_sum;
        self.y_sum += other.y_sum;
        self.z_sum += other.z_sum;
        self.count += other.count;
    }

    /// Number of coordinates accumulated
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether any coordinates have been accumulated
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Compute the centroid of the accumulated coordinates
    ///
    /// Averages the component sums, then converts the mean vector back to
    /// spherical coordinates: lon = atan2(y, x), lat = atan2(z, hyp) where
    /// hyp = sqrt(x² + y²).
    ///
    /// # Errors
    ///
    /// - `CentroidError::Empty` if no coordinates were added
    /// - `CentroidError::Degenerate` if the mean vector magnitude is below
    ///   the degeneracy threshold (the input points cancel out)
    pub fn finish(&self) -> Result<Coordinate, CentroidError> {
        if self.count == 0 {
            return Err(CentroidError::Empty);
        }
        let n = self.count as f64;
        let x = self.x_sum / n;
        let y = self.y_sum / n;
        let z = self.z_sum / n;

        let magnitude = (x * x + y * y + z * z).sqrt();
        if magnitude < DEGENERATE_EPSILON {
            return Err(CentroidError::Degenerate);
        }

        let lon = y.atan2(x);
        let hyp = (x * x + y * y).sqrt();
        let lat = z.atan2(hyp);

        // atan2 keeps both components inside the valid degree ranges
        Ok(Coordinate::new(lat.to_degrees(), lon.to_degrees())
            .expect("mean vector converts to an in-range coordinate"))
    }
}

/// Compute the spherical centroid of a coordinate slice
///
/// Convenience wrapper over [`CentroidAccumulator`] for callers that already
/// hold the full point set.
pub fn centroid(coords: &[Coordinate]) -> Result<Coordinate, CentroidError> {
    let mut acc = CentroidAccumulator::new();
    for &c in coords {
        acc.add(c);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn assert_close(actual: Coordinate, expected: Coordinate, tolerance: f64) {
        assert!(
            (actual.latitude() - expected.latitude()).abs() < tolerance,
            "latitude {} not within {} of {}",
            actual.latitude(),
            tolerance,
            expected.latitude()
        );
        assert!(
            (actual.longitude() - expected.longitude()).abs() < tolerance,
            "longitude {} not within {} of {}",
            actual.longitude(),
            tolerance,
            expected.longitude()
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(centroid(&[]), Err(CentroidError::Empty));
        assert_eq!(CentroidAccumulator::new().finish(), Err(CentroidError::Empty));
    }

    #[test]
    fn test_single_point_returns_itself() {
        let c = coord(43.6065827, -79.6563887);
        let center = centroid(&[c]).unwrap();
        assert_close(center, c, 1e-9);
    }

    #[test]
    fn test_four_toronto_points() {
        let coords = [
            coord(43.704372, -79.464364),
            coord(43.701208, -79.452106),
            coord(43.706893, -79.453391),
            coord(43.698679, -79.462161),
        ];
        let center = centroid(&coords).unwrap();
        assert_close(center, coord(43.702788, -79.458006), 1e-6);
    }

    #[test]
    fn test_antipodal_points_are_degenerate() {
        let coords = [coord(0.0, 0.0), coord(0.0, 180.0)];
        assert_eq!(centroid(&coords), Err(CentroidError::Degenerate));

        let poles = [coord(90.0, 0.0), coord(-90.0, 0.0)];
        assert_eq!(centroid(&poles), Err(CentroidError::Degenerate));
    }

    #[test]
    fn test_antimeridian_straddle() {
        // Naive degree averaging would put this near longitude 0; the mean
        // vector correctly lands on the antimeridian side.
        let coords = [coord(0.0, 179.0), coord(0.0, -179.0)];
        let center = centroid(&coords).unwrap();
        assert!(center.longitude().abs() > 179.0);
        assert!(center.latitude().abs() < 1e-9);
    }

    #[test]
    fn test_permutation_invariance() {
        let mut coords = vec![
            coord(43.704372, -79.464364),
            coord(43.701208, -79.452106),
            coord(43.706893, -79.453391),
            coord(43.698679, -79.462161),
            coord(51.507222, -0.1275),
            coord(35.689722, 139.692222),
            coord(-33.865, 151.209444),
        ];
        let reference = centroid(&coords).unwrap();

        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            coords.shuffle(&mut rng);
            let shuffled = centroid(&coords).unwrap();
            assert_close(shuffled, reference, 1e-9);
        }
    }

    #[test]
    fn test_merge_matches_sequential() {
        let coords = [
            coord(43.704372, -79.464364),
            coord(43.701208, -79.452106),
            coord(43.706893, -79.453391),
            coord(43.698679, -79.462161),
        ];

        let mut whole = CentroidAccumulator::new();
        for &c in &coords {
            whole.add(c);
        }

        let mut left = CentroidAccumulator::new();
        let mut right = CentroidAccumulator::new();
        left.add(coords[0]);
        left.add(coords[1]);
        right.add(coords[2]);
        right.add(coords[3]);
        left.merge(&right);

        assert_eq!(left.count(), whole.count());
        assert_close(left.finish().unwrap(), whole.finish().unwrap(), 1e-12);
    }

    #[test]
    fn test_count_tracking() {
        let mut acc = CentroidAccumulator::new();
        assert!(acc.is_empty());
        acc.add(coord(1.0, 2.0));
        acc.add(coord(3.0, 4.0));
        assert_eq!(acc.count(), 2);
        assert!(!acc.is_empty());
    }
}

//! Dense distance matrix.

use crate::error::{Result, TspError};
use crate::models::Point;

/// Fewest cities a tour can be built over.
pub const MIN_CITIES: usize = 2;

/// Fails with [`TspError::InvalidInput`] when `n` is below [`MIN_CITIES`].
pub(crate) fn check_city_count(n: usize) -> Result<()> {
    if n < MIN_CITIES {
        return Err(TspError::invalid_input(format!(
            "at least {MIN_CITIES} cities are required, got {n}"
        )));
    }
    Ok(())
}

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per instance and shared read-only by every algorithm.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Zero-filled matrix; only the validating constructors hand one out.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from city coordinates.
    ///
    /// # Errors
    ///
    /// Fails with [`TspError::InvalidInput`] when fewer than two cities are
    /// given or a coordinate is not finite.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let n = points.len();
        check_city_count(n)?;
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(TspError::invalid_input(format!(
                "city {i} has a non-finite coordinate"
            )));
        }

        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        Ok(dm)
    }

    /// Computes a Euclidean distance matrix from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        let points: Vec<Point> = coords.iter().copied().map(Point::from).collect();
        Self::from_points(&points)
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Fails with [`TspError::InvalidMatrix`] if the rows do not form a
    /// square grid of at least 2×2, or any entry is negative or non-finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(TspError::invalid_matrix(format!(
                "row {i} has {} entries, expected {size}",
                row.len()
            )));
        }
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_data(size, data)
    }

    /// Creates a distance matrix from a flat row-major grid.
    ///
    /// Same validation as [`DistanceMatrix::from_rows`].
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size < MIN_CITIES {
            return Err(TspError::invalid_matrix(format!(
                "at least {MIN_CITIES} cities are required, got {size}"
            )));
        }
        if data.len() != size * size {
            return Err(TspError::invalid_matrix(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(k) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(TspError::invalid_matrix(format!(
                "entry ({}, {}) = {} is negative or not finite",
                k / size,
                k % size,
                data[k]
            )));
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Ties go to the earliest candidate. Returns `None` if `candidates` is
    /// empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Total length of the closed cycle through `tour`.
    ///
    /// Sums `d(tour[k], tour[(k + 1) % n])` for every position `k`,
    /// including the edge from the last city back to the first.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        if n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for k in 0..n {
            total += self.get(tour[k], tour[(k + 1) % n]);
        }
        total
    }
}

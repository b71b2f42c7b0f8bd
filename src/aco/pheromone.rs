//! Pheromone trail matrix.

/// Symmetric pheromone levels on the edges between cities.
///
/// Stored dense and row-major like [`DistanceMatrix`](crate::distance::DistanceMatrix);
/// both directions of an edge always hold the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every edge at `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial; size * size],
            size,
        }
    }

    /// Pheromone on the edge between `from` and `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Multiplies every level by `1 - rho`.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        for level in &mut self.data {
            *level *= keep;
        }
    }

    /// Adds `amount` to every edge of the closed tour, in both directions.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        let n = tour.len();
        if n < 2 {
            return;
        }
        for k in 0..n {
            let (a, b) = (tour[k], tour[(k + 1) % n]);
            self.data[a * self.size + b] += amount;
            if a != b {
                self.data[b * self.size + a] += amount;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaporate() {
        let mut p = PheromoneMatrix::new(3, 2.0);
        p.evaporate(0.25);
        assert!((p.get(0, 1) - 1.5).abs() < 1e-12);
        assert_eq!(p.size(), 3);
    }

    #[test]
    fn test_deposit_closed_tour_symmetric() {
        let mut p = PheromoneMatrix::new(4, 0.0);
        p.deposit(&[0, 1, 2, 3], 0.5);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert_eq!(p.get(a, b), 0.5);
            assert_eq!(p.get(b, a), 0.5);
        }
        assert_eq!(p.get(0, 2), 0.0);
        assert_eq!(p.get(1, 3), 0.0);
    }
}

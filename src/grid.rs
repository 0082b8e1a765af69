use crate::array::Field;
use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Uniform samples along one closed interval, both endpoints included.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl Axis {
    pub fn new(range: RangeInclusive<f64>, samples: usize) -> Result<Axis> {
        let (min, max) = range.into_inner();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidConfig(format!(
                "axis range [{min}, {max}] must be finite and non-empty"
            )));
        }
        if samples < 2 {
            return Err(Error::InvalidConfig(format!(
                "need at least two samples per axis, got {samples}"
            )));
        }
        Ok(Axis { min, max, samples })
    }

    /// Position of sample `i`. The last sample lands exactly on `max`
    /// and no sample leaves `[min, max]`.
    #[inline]
    pub fn coord(&self, i: usize) -> f64 {
        let last = self.samples - 1;
        if i >= last {
            return self.max;
        }
        let t = i as f64 / last as f64;
        (self.min + t * (self.max - self.min)).clamp(self.min, self.max)
    }

    pub fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(move |i| self.coord(i))
    }
}

/// The sampling grid spanned by two axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Axis,
    pub y: Axis,
}

impl Grid {
    pub fn new(x: Axis, y: Axis) -> Grid {
        Grid { x, y }
    }

    /// Evaluate `f` at every grid point. Cell `(i, j)` of the result holds
    /// `f(x_i, y_j)`, so row 0 is the bottom edge of the domain.
    pub fn evaluate<F>(&self, f: F) -> Field
    where
        F: Fn(f64, f64) -> f64,
    {
        let xs: Vec<f64> = self.x.coords().collect();
        let ys: Vec<f64> = self.y.coords().collect();
        Field::from_fn(xs.len(), ys.len(), |i, j| f(xs[i], ys[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::styblinski_tang_2d;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_axis_endpoints() {
        let axis = Axis::new(-5.0..=5.0, 2000).unwrap();
        assert_eq!(axis.coord(0), -5.0);
        assert_eq!(axis.coord(1999), 5.0);
        assert_abs_diff_eq!(axis.coord(1) - axis.coord(0), 10.0 / 1999.0, epsilon = 1e-12);
        assert!(axis.coords().all(|c| (-5.0..=5.0).contains(&c)));
    }

    #[test]
    fn test_axis_rejects_bad_input() {
        assert!(matches!(Axis::new(5.0..=-5.0, 10), Err(Error::InvalidConfig(_))));
        assert!(matches!(Axis::new(0.0..=0.0, 10), Err(Error::InvalidConfig(_))));
        assert!(matches!(Axis::new(-5.0..=5.0, 1), Err(Error::InvalidConfig(_))));
        assert!(matches!(Axis::new(f64::NAN..=5.0, 10), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_evaluate_matches_function() {
        let grid = Grid::new(
            Axis::new(-5.0..=5.0, 41).unwrap(),
            Axis::new(-5.0..=5.0, 33).unwrap(),
        );
        let field = grid.evaluate(styblinski_tang_2d);
        assert_eq!(field.data.len(), 41 * 33);
        for j in 0..33 {
            for i in 0..41 {
                let (x, y) = (grid.x.coord(i), grid.y.coord(j));
                let expected =
                    0.5 * ((x.powi(4) - 16.0 * x * x + 5.0 * x) + (y.powi(4) - 16.0 * y * y + 5.0 * y));
                assert_abs_diff_eq!(field[(i, j)], expected, epsilon = 1e-9);
            }
        }
        // centre sample of an odd axis hits the origin
        assert_eq!(grid.x.coord(20), 0.0);
        assert_eq!(grid.y.coord(16), 0.0);
        assert_abs_diff_eq!(field[(20, 16)], 0.0, epsilon = 1e-12);
    }
}

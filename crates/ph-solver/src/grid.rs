//! Exhaustive grid search for the smallest residual.

use ph_core::linspace;

/// Best point found by [`grid_search`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    /// Grid location
    pub x: f64,
    /// Function value at `x` (signed)
    pub value: f64,
}

/// Evaluate `f` on `points` evenly spaced values over `[lo, hi]` and return
/// the one with the smallest `|f|`.
///
/// Non-finite evaluations are skipped; `None` means no grid point produced a
/// finite value. Ties keep the first point.
pub fn grid_search<F>(mut f: F, lo: f64, hi: f64, points: usize) -> Option<GridPoint>
where
    F: FnMut(f64) -> f64,
{
    let mut best: Option<GridPoint> = None;
    for x in linspace(lo, hi, points) {
        let value = f(x);
        if !value.is_finite() {
            continue;
        }
        match best {
            Some(b) if b.value.abs() <= value.abs() => {}
            _ => best = Some(GridPoint { x, value }),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_smallest_magnitude() {
        let best = grid_search(|x| (x - 3.3).abs() + 1.0, 0.0, 10.0, 11).unwrap();
        assert_eq!(best.x, 3.0);
        assert!((best.value - 1.3).abs() < 1e-12);
    }

    #[test]
    fn skips_non_finite_points() {
        let best = grid_search(|x| if x < 5.0 { f64::NAN } else { x }, 0.0, 10.0, 11).unwrap();
        assert_eq!(best.x, 5.0);
    }

    #[test]
    fn all_non_finite_is_none() {
        assert!(grid_search(|_| f64::INFINITY, 0.0, 1.0, 5).is_none());
    }
}

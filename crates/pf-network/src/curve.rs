//! Piecewise-linear data curves.

use pf_core::CurveId;

/// Local linearization of a curve: `y ≈ intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment {
    pub slope: f64,
    pub intercept: f64,
}

/// A piecewise-linear curve given by points with strictly increasing x.
///
/// Head-loss curves for general-purpose valves are stored in internal units
/// (flow in cfs, head loss in ft).
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub id: CurveId,
    pub name: String,
    pub(crate) points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Slope and intercept of the segment that covers `x`.
    ///
    /// Values beyond either end extrapolate the first or last segment. A
    /// single-point curve is flat.
    pub fn find_segment(&self, x: f64) -> CurveSegment {
        let n = self.points.len();
        if n < 2 {
            let y = self.points.first().map(|p| p.1).unwrap_or(0.0);
            return CurveSegment {
                slope: 0.0,
                intercept: y,
            };
        }

        let mut i = 1;
        while i < n - 1 && x >= self.points[i].0 {
            i += 1;
        }

        let (x0, y0) = self.points[i - 1];
        let (x1, y1) = self.points[i];
        let slope = (y1 - y0) / (x1 - x0);
        CurveSegment {
            slope,
            intercept: y0 - slope * x0,
        }
    }

    /// Curve value at `x`.
    pub fn value(&self, x: f64) -> f64 {
        let seg = self.find_segment(x);
        seg.intercept + seg.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::Id;

    fn curve(points: Vec<(f64, f64)>) -> Curve {
        Curve {
            id: Id::from_index(0),
            name: "c".into(),
            points,
        }
    }

    #[test]
    fn segment_interpolates_inside() {
        let c = curve(vec![(0.0, 0.0), (1.0, 2.0), (2.0, 8.0)]);
        let seg = c.find_segment(1.5);
        assert_eq!(seg.slope, 6.0);
        assert_eq!(seg.intercept, -4.0);
        assert_eq!(c.value(1.5), 5.0);
    }

    #[test]
    fn segment_extrapolates_ends() {
        let c = curve(vec![(0.0, 1.0), (1.0, 3.0), (2.0, 4.0)]);
        assert_eq!(c.find_segment(-1.0).slope, 2.0);
        assert_eq!(c.find_segment(5.0).slope, 1.0);
        assert_eq!(c.value(4.0), 6.0);
    }

    #[test]
    fn single_point_is_flat() {
        let c = curve(vec![(3.0, 7.0)]);
        let seg = c.find_segment(10.0);
        assert_eq!(seg.slope, 0.0);
        assert_eq!(seg.intercept, 7.0);
    }
}

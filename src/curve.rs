//! Response curves that turn a normalized noise sample into a terrain contribution.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// How values between two control points are blended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Smoothstep between neighbours (flat tangents at every control point)
    Smooth,
}

/// Piecewise response function over sorted `(input, output)` control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveSpec", into = "CurveSpec")]
pub struct Curve {
    points: Vec<(f32, f32)>,
    interpolation: Interpolation,
}

/// Serialized form; validated into a [`Curve`] on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CurveSpec {
    points: Vec<[f32; 2]>,
    #[serde(default)]
    interpolation: Interpolation,
}

impl Curve {
    /// Build a curve, sorting the control points by input
    pub fn new(
        points: impl IntoIterator<Item = (f32, f32)>,
        interpolation: Interpolation,
    ) -> Result<Self, TerrainError> {
        let mut points: Vec<(f32, f32)> = points.into_iter().collect();
        if points.is_empty() {
            return Err(TerrainError::EmptyCurve);
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self {
            points,
            interpolation,
        })
    }

    pub fn linear(points: impl IntoIterator<Item = (f32, f32)>) -> Result<Self, TerrainError> {
        Self::new(points, Interpolation::Linear)
    }

    /// `f(x) = x` over [0, 1]
    pub fn identity() -> Self {
        Self {
            points: vec![(0.0, 0.0), (1.0, 1.0)],
            interpolation: Interpolation::Linear,
        }
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Evaluate the curve at `x`
    ///
    /// Inputs outside the control-point domain (and NaN) clamp to the nearest
    /// endpoint's output.
    pub fn evaluate(&self, x: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if !(x > first.0) {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }

        // first index whose input is > x; 1..len here because of the checks above
        let upper = self.points.partition_point(|p| p.0 <= x);
        let (x0, y0) = self.points[upper - 1];
        let (x1, y1) = self.points[upper];
        let mut t = (x - x0) / (x1 - x0);
        if self.interpolation == Interpolation::Smooth {
            t = t * t * (3.0 - 2.0 * t);
        }
        y0 + (y1 - y0) * t
    }

    /// Chain this curve onto an earlier contribution
    ///
    /// With no starting value the curve output is returned as-is; otherwise the
    /// starting value is scaled by it. `Some(0.0)` stays zero.
    pub fn apply(&self, starting: Option<f32>, sample: f32) -> f32 {
        let curve_sample = self.evaluate(sample);
        match starting {
            None => curve_sample,
            Some(value) => value * curve_sample,
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<CurveSpec> for Curve {
    type Error = TerrainError;

    fn try_from(spec: CurveSpec) -> Result<Self, Self::Error> {
        Self::new(
            spec.points.into_iter().map(|[x, y]| (x, y)),
            spec.interpolation,
        )
    }
}

impl From<Curve> for CurveSpec {
    fn from(curve: Curve) -> Self {
        Self {
            points: curve.points.iter().map(|&(x, y)| [x, y]).collect(),
            interpolation: curve.interpolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Curve {
        Curve::linear([(0.2, 0.0), (0.5, 0.8), (0.8, 1.0)]).unwrap()
    }

    #[test]
    fn test_clamps_outside_domain() {
        let curve = ramp();
        assert_eq!(curve.evaluate(-5.0), 0.0);
        assert_eq!(curve.evaluate(0.2), 0.0);
        assert_eq!(curve.evaluate(0.8), 1.0);
        assert_eq!(curve.evaluate(3.0), 1.0);
        assert_eq!(curve.evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_linear_interpolation_between_brackets() {
        let curve = ramp();
        assert!((curve.evaluate(0.35) - 0.4).abs() < 1e-6);
        assert!((curve.evaluate(0.5) - 0.8).abs() < 1e-6);
        assert!((curve.evaluate(0.65) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_interpolation_keeps_endpoints_and_midpoint() {
        let curve = Curve::new([(0.0, 0.0), (1.0, 1.0)], Interpolation::Smooth).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(curve.evaluate(0.25) < 0.25, "smoothstep eases in");
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_unsorted_points_are_sorted() {
        let curve = Curve::linear([(1.0, 1.0), (0.0, 0.5)]).unwrap();
        assert_eq!(curve.points(), &[(0.0, 0.5), (1.0, 1.0)]);
        assert!((curve.evaluate(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_single_point_is_constant() {
        let curve = Curve::linear([(0.5, 0.3)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.3);
        assert_eq!(curve.evaluate(0.9), 0.3);
    }

    #[test]
    fn test_empty_curve_rejected() {
        assert_eq!(
            Curve::linear(std::iter::empty()).unwrap_err(),
            TerrainError::EmptyCurve
        );
    }

    #[test]
    fn test_apply_distinguishes_missing_and_zero_start() {
        let curve = Curve::identity();
        assert_eq!(curve.apply(None, 0.6), 0.6);
        assert!((curve.apply(Some(0.5), 0.6) - 0.3).abs() < 1e-6);
        assert_eq!(curve.apply(Some(0.0), 0.6), 0.0);
    }

    #[test]
    fn test_ron_round_trip_validates() {
        let curve: Curve =
            ron::from_str("(points: [(0.9, 1.0), (0.1, 0.0)], interpolation: Smooth)").unwrap();
        assert_eq!(curve.points()[0], (0.1, 0.0));
        assert_eq!(curve.interpolation(), Interpolation::Smooth);

        let empty: Result<Curve, _> = ron::from_str("(points: [])");
        assert!(empty.is_err());
    }
}

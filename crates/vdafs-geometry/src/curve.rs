// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CURVE decoder and evaluator
//!
//! A CURVE is a piecewise polynomial space curve: `n` segments over `n+1`
//! global breakpoints, each segment a monomial polynomial of order `K` per
//! coordinate, evaluated over local `u` in `[0, 1]`.
//!
//! Token layout: `n, breakpoints[n+1], then n blocks of
//! {K, K x-coeffs, K y-coeffs, K z-coeffs}`.

use crate::cursor::TokenCursor;
use crate::poly::eval_monomial;
use crate::Result;
use nalgebra::Point3;
use vdafs_model::{Command, Entity};

/// One polynomial segment of a curve
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSegment {
    /// Polynomial order (coefficient count per coordinate)
    pub order: usize,
    pub coeffs_x: Vec<f64>,
    pub coeffs_y: Vec<f64>,
    pub coeffs_z: Vec<f64>,
    /// Global parameter interval covered by this segment
    pub t0: f64,
    pub t1: f64,
}

impl CurveSegment {
    /// Evaluate at local parameter `u` in `[0, 1]`
    pub fn eval(&self, u: f64) -> Point3<f64> {
        Point3::new(
            eval_monomial(&self.coeffs_x, u),
            eval_monomial(&self.coeffs_y, u),
            eval_monomial(&self.coeffs_z, u),
        )
    }
}

/// Decoded CURVE entity
#[derive(Clone, Debug, PartialEq)]
pub struct CurveModel {
    /// Number of segments (n >= 1)
    pub segment_count: usize,
    /// n+1 global breakpoints
    pub breakpoints: Vec<f64>,
    pub segments: Vec<CurveSegment>,
}

/// Decode a CURVE entity's parameter list
pub fn decode_curve(entity: &Entity) -> Result<CurveModel> {
    if entity.command != Command::Curve {
        return Err(crate::Error::wrong_command(&entity.name, Command::Curve));
    }

    let mut cursor = TokenCursor::new(&entity.name, &entity.params);
    let n = cursor.next_count("segment count")?;
    let breakpoints = cursor.next_numbers(n + 1, "global breakpoints")?;

    let mut segments = Vec::with_capacity(n.min(cursor.remaining()));
    for k in 0..n {
        let order = cursor.next_order(&format!("segment {} order", k))?;
        let coeffs_x = cursor.next_numbers(order, &format!("segment {} x coefficients", k))?;
        let coeffs_y = cursor.next_numbers(order, &format!("segment {} y coefficients", k))?;
        let coeffs_z = cursor.next_numbers(order, &format!("segment {} z coefficients", k))?;

        let (t0, t1) = (breakpoints[k], breakpoints[k + 1]);
        if t1 == t0 {
            return Err(crate::Error::degenerate(
                &entity.name,
                format!("segment {} interval [{}, {}]", k, t0, t1),
            ));
        }

        segments.push(CurveSegment {
            order,
            coeffs_x,
            coeffs_y,
            coeffs_z,
            t0,
            t1,
        });
    }

    Ok(CurveModel {
        segment_count: n,
        breakpoints,
        segments,
    })
}

impl CurveModel {
    /// Evaluate at global parameter `t`
    ///
    /// `t` is clamped into `[breakpoints[0], breakpoints[n]]`, then the
    /// first segment whose upper breakpoint bounds it is selected and `t`
    /// remapped to the segment's local `u`.
    pub fn eval_at_t(&self, t: f64) -> Point3<f64> {
        // Two-sided clamp; breakpoints are not guaranteed monotonic, so
        // f64::clamp (which panics when min > max) is not usable here.
        let tmin = self.breakpoints[0];
        let tmax = self.breakpoints[self.segment_count];
        let mut t = t;
        if t < tmin {
            t = tmin;
        }
        if t > tmax {
            t = tmax;
        }

        let k = (0..self.segments.len())
            .find(|&i| t <= self.breakpoints[i + 1])
            .unwrap_or(self.segments.len() - 1);

        let seg = &self.segments[k];
        let u = (t - seg.t0) / (seg.t1 - seg.t0);
        seg.eval(u)
    }

    /// Uniformly sample every segment with `m` points (`m >= 2`)
    ///
    /// Local parameters are `u = j / (m-1)` for `j = 0..m`, so segment
    /// endpoints are always hit. With `include_knots = false` the `u = 0`
    /// point of every segment after the first is suppressed, removing the
    /// duplicate at each interior join: `n*m` points with knots,
    /// `n*m - (n-1)` without.
    pub fn sample(&self, samples_per_segment: usize, include_knots: bool) -> Vec<Point3<f64>> {
        let m = samples_per_segment.max(2);
        let mut points = Vec::with_capacity(self.segments.len() * m);

        for (idx, seg) in self.segments.iter().enumerate() {
            for j in 0..m {
                if j == 0 && idx > 0 && !include_knots {
                    continue;
                }
                let u = j as f64 / (m - 1) as f64;
                points.push(seg.eval(u));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;
    use vdafs_model::Token;

    fn curve_entity(params: Vec<Token>) -> Entity {
        Entity {
            name: "CV1".to_string(),
            command: Command::Curve,
            params,
            raw_text: String::new(),
            line_range: (1, 1),
        }
    }

    fn numbers(values: &[f64]) -> Vec<Token> {
        values.iter().map(|&v| Token::Number(v)).collect()
    }

    /// Two linear segments tracing x = t over t in [0, 2]
    fn two_segment_params() -> Vec<Token> {
        numbers(&[
            2.0, // n
            0.0, 1.0, 2.0, // breakpoints
            2.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, // segment 0: K, x, y, z
            2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, // segment 1
        ])
    }

    #[test]
    fn test_decode_two_segments() {
        let curve = decode_curve(&curve_entity(two_segment_params())).unwrap();
        assert_eq!(curve.segment_count, 2);
        assert_eq!(curve.breakpoints, vec![0.0, 1.0, 2.0]);
        assert_eq!(curve.segments[1].coeffs_x, vec![1.0, 1.0]);
        assert_eq!(curve.segments[1].t0, 1.0);
    }

    #[test]
    fn test_eval_spans_segments() {
        let curve = decode_curve(&curve_entity(two_segment_params())).unwrap();
        assert_relative_eq!(curve.eval_at_t(0.5).x, 0.5);
        assert_relative_eq!(curve.eval_at_t(1.0).x, 1.0);
        assert_relative_eq!(curve.eval_at_t(1.5).x, 1.5);
    }

    #[test]
    fn test_clamping_is_idempotent_at_boundary() {
        let curve = decode_curve(&curve_entity(two_segment_params())).unwrap();
        let at_start = curve.eval_at_t(curve.breakpoints[0]);
        for eps in [1e-12, 1e-3, 1.0, 1e6] {
            assert_eq!(curve.eval_at_t(curve.breakpoints[0] - eps), at_start);
        }
        let at_end = curve.eval_at_t(*curve.breakpoints.last().unwrap());
        assert_eq!(curve.eval_at_t(1e9), at_end);
    }

    #[test]
    fn test_sample_counts() {
        let curve = decode_curve(&curve_entity(two_segment_params())).unwrap();
        let m = 20;
        assert_eq!(curve.sample(m, true).len(), 2 * m);
        assert_eq!(curve.sample(m, false).len(), 2 * m - 1);

        // Endpoints of each segment are hit exactly
        let pts = curve.sample(m, true);
        assert_relative_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[m - 1].x, 1.0);
        assert_relative_eq!(pts[m].x, 1.0);
        assert_relative_eq!(pts[2 * m - 1].x, 2.0);
    }

    #[test]
    fn test_decode_error_kinds() {
        // Non-positive segment count
        let err = decode_curve(&curve_entity(numbers(&[0.0]))).unwrap_err();
        assert!(matches!(err, Error::InvalidCount { .. }));

        // Truncated segment block
        let err =
            decode_curve(&curve_entity(numbers(&[1.0, 0.0, 1.0, 2.0, 0.0, 1.0]))).unwrap_err();
        assert!(matches!(err, Error::MissingParameters { .. }));

        // Non-positive order
        let err =
            decode_curve(&curve_entity(numbers(&[1.0, 0.0, 1.0, -1.0]))).unwrap_err();
        assert!(matches!(err, Error::InvalidOrder { .. }));

        // Degenerate interval
        let err = decode_curve(&curve_entity(numbers(&[
            1.0, 5.0, 5.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0,
        ])))
        .unwrap_err();
        assert!(matches!(err, Error::DegenerateInterval { .. }));

        // Reference token where a coefficient belongs
        let mut params = numbers(&[1.0, 0.0, 1.0, 1.0]);
        params.push(Token::Reference("SR1".into()));
        params.extend(numbers(&[0.0, 0.0]));
        let err = decode_curve(&curve_entity(params)).unwrap_err();
        assert!(matches!(err, Error::NonNumericCoefficient { .. }));
    }

    #[test]
    fn test_absurd_segment_count_is_missing_parameters() {
        // A corrupt count must not drive allocation; the breakpoint read
        // runs out of tokens first
        let err = decode_curve(&curve_entity(numbers(&[4.0e18]))).unwrap_err();
        assert!(matches!(err, Error::MissingParameters { .. }));
    }

    #[test]
    fn test_wrong_command_rejected() {
        let mut entity = curve_entity(vec![]);
        entity.command = Command::Surf;
        assert!(matches!(
            decode_curve(&entity),
            Err(Error::WrongCommand { .. })
        ));
    }
}

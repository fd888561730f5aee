// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CONS (curve-on-surface) decoder and p-curve evaluator
//!
//! A CONS ties a space curve to a surface and optionally carries a p-curve:
//! a piecewise monomial mapping from the curve parameter into the surface's
//! `(s, t)` domain. The surf/curve references remain usable even when the
//! p-curve block is absent or cut short, so this decoder is tolerant: it
//! never fails the whole entity over the optional block.
//!
//! Token layout: `surf_ref, curve_ref [, t_start, t_end]
//! [, n, breakpoints[n+1], n blocks of {K, K s-coeffs, K t-coeffs}]`.

use crate::cursor::TokenCursor;
use crate::poly::eval_monomial;
use crate::Result;
use nalgebra::Point2;
use vdafs_model::{Command, Entity};

/// One segment of a p-curve mapping
#[derive(Clone, Debug, PartialEq)]
pub struct PCurveSegment {
    pub order: usize,
    pub coeffs_s: Vec<f64>,
    pub coeffs_t: Vec<f64>,
    /// Curve-parameter interval covered by this segment
    pub t0: f64,
    pub t1: f64,
}

/// Piecewise mapping from curve parameter to surface `(s, t)`
#[derive(Clone, Debug, PartialEq)]
pub struct PCurve {
    pub segment_count: usize,
    pub breakpoints: Vec<f64>,
    pub segments: Vec<PCurveSegment>,
    /// True when the source declared more segments than survived decoding
    pub truncated: bool,
}

/// Decoded CONS entity
#[derive(Clone, Debug, PartialEq)]
pub struct ConsModel {
    pub surf_ref: String,
    pub curve_ref: String,
    /// Curve-parameter range, when declared
    pub t_range: Option<(f64, f64)>,
    pub pcurve: Option<PCurve>,
}

/// Decode a CONS entity's parameter list
pub fn decode_cons(entity: &Entity) -> Result<ConsModel> {
    if entity.command != Command::Cons {
        return Err(crate::Error::wrong_command(&entity.name, Command::Cons));
    }

    let mut cursor = TokenCursor::new(&entity.name, &entity.params);
    let surf_ref = cursor.next_reference("surface reference")?.to_string();
    let curve_ref = cursor.next_reference("curve reference")?.to_string();

    // Optional curve-parameter range: two consecutive numeric tokens
    let t_range = match (
        cursor.peek().and_then(|t| t.as_number()),
        cursor.peek_at(1).and_then(|t| t.as_number()),
    ) {
        (Some(start), Some(end)) => {
            cursor.advance();
            cursor.advance();
            Some((start, end))
        }
        _ => None,
    };

    let pcurve = decode_pcurve(&mut cursor);
    Ok(ConsModel {
        surf_ref,
        curve_ref,
        t_range,
        pcurve,
    })
}

/// Decode the optional p-curve block; `None` when absent or unusable
fn decode_pcurve(cursor: &mut TokenCursor) -> Option<PCurve> {
    let declared = cursor.peek()?.as_integer().filter(|&n| n > 0)? as usize;
    cursor.advance();

    if cursor.remaining() < declared + 1 {
        return None;
    }
    let mut breakpoints = Vec::with_capacity(declared + 1);
    for _ in 0..declared + 1 {
        breakpoints.push(cursor.peek()?.as_number()?);
        cursor.advance();
    }

    let mut segments = Vec::with_capacity(declared);
    for k in 0..declared {
        let Some(order) = cursor.peek().and_then(|t| t.as_integer()).filter(|&v| v > 0)
        else {
            break;
        };
        let order = order as usize;
        if cursor.remaining() < 1 + 2 * order {
            break;
        }
        cursor.advance();

        let mut coeffs = Vec::with_capacity(2 * order);
        while coeffs.len() < 2 * order {
            let Some(value) = cursor.peek().and_then(|t| t.as_number()) else {
                break;
            };
            coeffs.push(value);
            cursor.advance();
        }
        if coeffs.len() < 2 * order {
            break;
        }
        let coeffs_t = coeffs.split_off(order);
        let coeffs_s = coeffs;

        let (t0, t1) = (breakpoints[k], breakpoints[k + 1]);
        if t1 == t0 {
            break;
        }
        segments.push(PCurveSegment {
            order,
            coeffs_s,
            coeffs_t,
            t0,
            t1,
        });
    }

    if segments.is_empty() {
        return None;
    }
    let truncated = segments.len() != declared;
    Some(PCurve {
        segment_count: segments.len(),
        breakpoints,
        segments,
        truncated,
    })
}

impl PCurve {
    /// Evaluate at curve parameter `t`, yielding surface `(s, t)`
    pub fn eval(&self, t: f64) -> Point2<f64> {
        let tmin = self.breakpoints[0];
        let tmax = self.breakpoints[self.segments.len()];
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
        Point2::new(
            eval_monomial(&seg.coeffs_s, u),
            eval_monomial(&seg.coeffs_t, u),
        )
    }
}

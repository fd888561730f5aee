// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SURF decoder and evaluator
//!
//! A SURF is a grid of tensor-product polynomial patches: `nps x npt`
//! patches over `nps+1` s-breakpoints and `npt+1` t-breakpoints, each patch
//! a `jor x kor` monomial polynomial per coordinate over local
//! `(u, v)` in `[0, 1]^2`.
//!
//! Token layout: `nps, npt, s_breakpoints[nps+1], t_breakpoints[npt+1]`,
//! then `nps*npt` patch blocks enumerated s-major, each
//! `{jor, kor, jor*kor x-coeffs, jor*kor y-coeffs, jor*kor z-coeffs}` with
//! coefficients s-major within the patch. Real-world files sometimes carry
//! extra scalar flags between the breakpoint vectors and the first patch;
//! a bounded scan skips them (see [`decode_surf`]).

use crate::cursor::TokenCursor;
use crate::poly::eval_monomial_2d;
use crate::{Error, Result};
use log::warn;
use nalgebra::Point3;
use vdafs_model::{Command, Entity, Token};

/// Upper bound on tokens the order-alignment scan may skip
const ORDER_SCAN_LIMIT: usize = 16;

/// Largest polynomial order the scan considers plausible
const MAX_PLAUSIBLE_ORDER: i64 = 25;

/// One tensor-product polynomial patch
#[derive(Clone, Debug, PartialEq)]
pub struct SurfacePatch {
    /// Order in the s direction (jor)
    pub order_s: usize,
    /// Order in the t direction (kor)
    pub order_t: usize,
    /// Flat `jor*kor` coefficient arrays, s-major (`index = j*kor + k`)
    pub coeffs_x: Vec<f64>,
    pub coeffs_y: Vec<f64>,
    pub coeffs_z: Vec<f64>,
    /// Global parameter rectangle covered by this patch
    pub s0: f64,
    pub s1: f64,
    pub t0: f64,
    pub t1: f64,
}

impl SurfacePatch {
    /// Evaluate at local `(u, v)` in `[0, 1]^2`
    pub fn eval(&self, u: f64, v: f64) -> Point3<f64> {
        Point3::new(
            eval_monomial_2d(&self.coeffs_x, self.order_s, self.order_t, u, v),
            eval_monomial_2d(&self.coeffs_y, self.order_s, self.order_t, u, v),
            eval_monomial_2d(&self.coeffs_z, self.order_s, self.order_t, u, v),
        )
    }
}

/// Decoded SURF entity
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceModel {
    /// Patch count in the s direction (nps >= 1)
    pub patch_count_s: usize,
    /// Patch count in the t direction (npt >= 1)
    pub patch_count_t: usize,
    pub s_breakpoints: Vec<f64>,
    pub t_breakpoints: Vec<f64>,
    /// Patches enumerated s-major: `index = ps * npt + pt`
    pub patches: Vec<SurfacePatch>,
}

fn check_breakpoints(entity: &str, axis: &str, breakpoints: &[f64]) -> Result<()> {
    for (i, pair) in breakpoints.windows(2).enumerate() {
        if pair[0] == pair[1] {
            return Err(Error::degenerate(
                entity,
                format!("{} breakpoints {} and {} are both {}", axis, i, i + 1, pair[0]),
            ));
        }
    }
    Ok(())
}

/// True for tokens that could be a patch order
fn looks_like_order(token: &Token) -> bool {
    match token.as_number() {
        Some(v) => v.is_finite() && v.fract() == 0.0 && (1.0..=MAX_PLAUSIBLE_ORDER as f64).contains(&v),
        None => false,
    }
}

/// Skip padding tokens until two consecutive plausible orders appear
///
/// Some producers insert scalar flags between the breakpoint vectors and
/// the first patch block. The scan is bounded: it can misread small-integer
/// coefficient data as orders, so it refuses to walk far and reports every
/// token it skipped.
fn align_to_patch_orders(entity: &str, cursor: &mut TokenCursor) -> Result<()> {
    let mut skipped = 0;
    loop {
        match (cursor.peek(), cursor.peek_at(1)) {
            (Some(a), Some(b)) if looks_like_order(a) && looks_like_order(b) => break,
            (None, _) => return Err(Error::missing(entity, "patch data")),
            _ => {
                cursor.advance();
                skipped += 1;
                if skipped > ORDER_SCAN_LIMIT {
                    return Err(Error::UnalignedPatchData {
                        entity: entity.to_string(),
                        skipped,
                    });
                }
            }
        }
    }
    if skipped > 0 {
        warn!(
            "{}: skipped {} padding token(s) before patch orders",
            entity, skipped
        );
    }
    Ok(())
}

/// Decode a SURF entity's parameter list
pub fn decode_surf(entity: &Entity) -> Result<SurfaceModel> {
    if entity.command != Command::Surf {
        return Err(Error::wrong_command(&entity.name, Command::Surf));
    }

    let mut cursor = TokenCursor::new(&entity.name, &entity.params);
    let nps = cursor.next_count("patch count nps")?;
    let npt = cursor.next_count("patch count npt")?;

    let s_breakpoints = cursor.next_numbers(nps + 1, "s breakpoints")?;
    let t_breakpoints = cursor.next_numbers(npt + 1, "t breakpoints")?;
    check_breakpoints(&entity.name, "s", &s_breakpoints)?;
    check_breakpoints(&entity.name, "t", &t_breakpoints)?;

    align_to_patch_orders(&entity.name, &mut cursor)?;

    let mut patches = Vec::with_capacity(nps.saturating_mul(npt).min(cursor.remaining()));
    for ps in 0..nps {
        for pt in 0..npt {
            let what = format!("patch ({}, {})", ps, pt);
            let order_s = cursor.next_order(&format!("{} order jor", what))?;
            let order_t = cursor.next_order(&format!("{} order kor", what))?;

            let count = order_s * order_t;
            let coeffs_x = cursor.next_numbers(count, &format!("{} x coefficients", what))?;
            let coeffs_y = cursor.next_numbers(count, &format!("{} y coefficients", what))?;
            let coeffs_z = cursor.next_numbers(count, &format!("{} z coefficients", what))?;

            patches.push(SurfacePatch {
                order_s,
                order_t,
                coeffs_x,
                coeffs_y,
                coeffs_z,
                s0: s_breakpoints[ps],
                s1: s_breakpoints[ps + 1],
                t0: t_breakpoints[pt],
                t1: t_breakpoints[pt + 1],
            });
        }
    }

    Ok(SurfaceModel {
        patch_count_s: nps,
        patch_count_t: npt,
        s_breakpoints,
        t_breakpoints,
        patches,
    })
}

fn clamp_into(value: f64, lo: f64, hi: f64) -> f64 {
    // Two-sided clamp; breakpoints are not guaranteed monotonic
    let mut v = value;
    if v < lo {
        v = lo;
    }
    if v > hi {
        v = hi;
    }
    v
}

fn resolve_axis(value: f64, breakpoints: &[f64]) -> usize {
    (0..breakpoints.len() - 1)
        .find(|&i| value <= breakpoints[i + 1])
        .unwrap_or(breakpoints.len() - 2)
}

impl SurfaceModel {
    /// Get the patch at grid position `(ps, pt)`
    pub fn patch(&self, ps: usize, pt: usize) -> &SurfacePatch {
        &self.patches[ps * self.patch_count_t + pt]
    }

    /// Resolve global `(s, t)` to `(ps, pt, u, v)`
    ///
    /// Clamps into the global ranges, selects each axis's patch index as
    /// the first interval whose upper breakpoint bounds the value, and
    /// remaps to the patch's local fractions.
    pub fn resolve_patch(&self, s: f64, t: f64) -> (usize, usize, f64, f64) {
        let s = clamp_into(
            s,
            self.s_breakpoints[0],
            self.s_breakpoints[self.patch_count_s],
        );
        let t = clamp_into(
            t,
            self.t_breakpoints[0],
            self.t_breakpoints[self.patch_count_t],
        );

        let ps = resolve_axis(s, &self.s_breakpoints);
        let pt = resolve_axis(t, &self.t_breakpoints);

        let patch = self.patch(ps, pt);
        let u = (s - patch.s0) / (patch.s1 - patch.s0);
        let v = (t - patch.t0) / (patch.t1 - patch.t0);
        (ps, pt, u, v)
    }

    /// Evaluate at global parameters `(s, t)`
    pub fn eval_at_st(&self, s: f64, t: f64) -> Point3<f64> {
        let (ps, pt, u, v) = self.resolve_patch(s, t);
        self.patch(ps, pt).eval(u, v)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use vdafs_model::Token;

    /// Build SURF params for an `nps x 1` identity surface
    ///
    /// Each patch maps `(u, v)` to `(s0 + (s1-s0)u, t0 + (t1-t0)v, 0)`, so
    /// the whole surface is the identity map `(x, y, z) = (s, t, 0)`.
    pub fn identity_surf_params(s_breaks: &[f64], t_breaks: &[f64]) -> Vec<Token> {
        let nps = s_breaks.len() - 1;
        let npt = t_breaks.len() - 1;
        let mut params = vec![Token::Number(nps as f64), Token::Number(npt as f64)];
        params.extend(s_breaks.iter().map(|&v| Token::Number(v)));
        params.extend(t_breaks.iter().map(|&v| Token::Number(v)));

        for ps in 0..nps {
            for pt in 0..npt {
                let (s0, s1) = (s_breaks[ps], s_breaks[ps + 1]);
                let (t0, t1) = (t_breaks[pt], t_breaks[pt + 1]);
                params.push(Token::Number(2.0)); // jor
                params.push(Token::Number(2.0)); // kor
                // x = s0 + (s1-s0) u  (s-major: c[j*kor+k])
                for c in [s0, 0.0, s1 - s0, 0.0] {
                    params.push(Token::Number(c));
                }
                // y = t0 + (t1-t0) v
                for c in [t0, t1 - t0, 0.0, 0.0] {
                    params.push(Token::Number(c));
                }
                // z = 0
                for _ in 0..4 {
                    params.push(Token::Number(0.0));
                }
            }
        }
        params
    }

    pub fn surf_entity(params: Vec<Token>) -> Entity {
        Entity {
            name: "SR1".to_string(),
            command: Command::Surf,
            params,
            raw_text: String::new(),
            line_range: (1, 1),
        }
    }
}

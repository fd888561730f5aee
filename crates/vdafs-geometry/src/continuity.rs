// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seam continuity diagnostic
//!
//! A decoded surface stores each patch as an independent polynomial, so
//! nothing forces adjacent patches to agree along their shared breakpoint.
//! This module samples every interior seam from both sides and reports the
//! positional deviation, which is how tuning data that "looks fine" in a
//! viewer turns out to have C0 cracks.

use crate::surface::SurfaceModel;
use nalgebra::Point3;

/// Default sample count per seam
pub const DEFAULT_SEAM_SAMPLES: usize = 101;

/// Which breakpoint family a seam belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeamDirection {
    /// Seam at a fixed s breakpoint, running in t
    S,
    /// Seam at a fixed t breakpoint, running in s
    T,
}

/// Deviation summary for one interior seam
#[derive(Clone, Debug, PartialEq)]
pub struct SeamReport {
    pub direction: SeamDirection,
    /// Patch grid position `(ps, pt)` on the lower-parameter side
    pub left: (usize, usize),
    /// Patch grid position on the higher-parameter side
    pub right: (usize, usize),
    /// Largest positional gap found along the seam
    pub max: f64,
    /// Mean positional gap over all samples
    pub mean: f64,
}

/// Sample every interior patch seam from both sides and report the
/// positional deviation per seam. `samples` is clamped to at least 2.
pub fn check_continuity(surf: &SurfaceModel, samples: usize) -> Vec<SeamReport> {
    let samples = samples.max(2);
    let mut reports = Vec::new();

    // Seams between s-adjacent patches: left edge u=1 meets right edge u=0
    for ps in 0..surf.patch_count_s.saturating_sub(1) {
        for pt in 0..surf.patch_count_t {
            let left = surf.patch(ps, pt);
            let right = surf.patch(ps + 1, pt);
            let (max, mean) = seam_deviation(samples, |w| {
                (left.eval(1.0, w), right.eval(0.0, w))
            });
            reports.push(SeamReport {
                direction: SeamDirection::S,
                left: (ps, pt),
                right: (ps + 1, pt),
                max,
                mean,
            });
        }
    }

    // Seams between t-adjacent patches: lower edge v=1 meets upper edge v=0
    for pt in 0..surf.patch_count_t.saturating_sub(1) {
        for ps in 0..surf.patch_count_s {
            let lower = surf.patch(ps, pt);
            let upper = surf.patch(ps, pt + 1);
            let (max, mean) = seam_deviation(samples, |w| {
                (lower.eval(w, 1.0), upper.eval(w, 0.0))
            });
            reports.push(SeamReport {
                direction: SeamDirection::T,
                left: (ps, pt),
                right: (ps, pt + 1),
                max,
                mean,
            });
        }
    }

    reports
}

/// Largest seam gap across the whole surface, `0.0` for a single patch
pub fn max_deviation(reports: &[SeamReport]) -> f64 {
    reports.iter().fold(0.0, |acc, r| acc.max(r.max))
}

fn seam_deviation(
    samples: usize,
    eval_pair: impl Fn(f64) -> (Point3<f64>, Point3<f64>),
) -> (f64, f64) {
    let mut max = 0.0_f64;
    let mut sum = 0.0_f64;
    for j in 0..samples {
        let w = j as f64 / (samples - 1) as f64;
        let (a, b) = eval_pair(w);
        let d = (b - a).norm();
        max = max.max(d);
        sum += d;
    }
    (max, sum / samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::test_support::{identity_surf_params, surf_entity};
    use crate::surface::decode_surf;
    use vdafs_model::Token;

    #[test]
    fn test_identity_surface_is_watertight() {
        let surf = decode_surf(&surf_entity(identity_surf_params(
            &[0.0, 0.5, 1.0],
            &[0.0, 1.0],
        )))
        .unwrap();

        let reports = check_continuity(&surf, 33);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].direction, SeamDirection::S);
        assert_eq!(reports[0].left, (0, 0));
        assert_eq!(reports[0].right, (1, 0));
        assert!(reports[0].max < 1e-9);
        assert!(max_deviation(&reports) < 1e-9);
    }

    #[test]
    fn test_seam_count_for_grid() {
        let surf = decode_surf(&surf_entity(identity_surf_params(
            &[0.0, 1.0, 2.0, 3.0],
            &[0.0, 1.0, 2.0],
        )))
        .unwrap();

        let reports = check_continuity(&surf, DEFAULT_SEAM_SAMPLES);
        // 2 interior s-seams x 2 patch rows, 1 interior t-seam x 3 columns
        assert_eq!(
            reports
                .iter()
                .filter(|r| r.direction == SeamDirection::S)
                .count(),
            4
        );
        assert_eq!(
            reports
                .iter()
                .filter(|r| r.direction == SeamDirection::T)
                .count(),
            3
        );
    }

    #[test]
    fn test_cracked_seam_is_reported() {
        // Build a 1x2 patch grid, then flip the upper patch's y polynomial
        // so it runs t from t1 down to t0. The t-seam then compares y=1.0
        // against y=2.0.
        let mut params = identity_surf_params(&[0.0, 1.0], &[0.0, 1.0, 2.0]);
        // Upper patch y coeffs sit after: 2 counts, 2+3 breakpoints,
        // patch 0 (2 orders + 12 coeffs), patch 1's 2 orders + 4 x coeffs.
        let base = 2 + 5 + 14 + 2 + 4;
        params[base] = Token::Number(2.0);
        params[base + 1] = Token::Number(-1.0);

        let surf = decode_surf(&surf_entity(params)).unwrap();
        let reports = check_continuity(&surf, 11);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].direction, SeamDirection::T);
        assert!(reports[0].max > 1e-3);
        assert!(reports[0].mean > 1e-3);
    }

    #[test]
    fn test_single_patch_has_no_seams() {
        let surf = decode_surf(&surf_entity(identity_surf_params(
            &[0.0, 1.0],
            &[0.0, 1.0],
        )))
        .unwrap();
        let reports = check_continuity(&surf, 11);
        assert!(reports.is_empty());
        assert_eq!(max_deviation(&reports), 0.0);
    }
}

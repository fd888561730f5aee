// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monomial-basis polynomial evaluation
//!
//! The canonical evaluation form is the explicit power sum
//! `sum coeffs[j] * u^j` (and its 2D power-product analogue). Horner's
//! scheme would round differently; the power sum is what the format's
//! reference data was produced against, so it stays the canonical form.

/// Evaluate `sum coeffs[j] * u^j` for `j = 0..K-1`
#[inline]
pub fn eval_monomial(coeffs: &[f64], u: f64) -> f64 {
    let mut sum = 0.0;
    let mut power = 1.0;
    for &c in coeffs {
        sum += c * power;
        power *= u;
    }
    sum
}

/// Evaluate `sum coeffs[j*kor + k] * u^j * v^k` over a `jor x kor` grid
///
/// Coefficients are laid out s-major (the j index over `u` varies slowest).
#[inline]
pub fn eval_monomial_2d(coeffs: &[f64], jor: usize, kor: usize, u: f64, v: f64) -> f64 {
    debug_assert_eq!(coeffs.len(), jor * kor);

    // Precompute the v powers; u powers accumulate in the outer loop
    let mut v_powers = Vec::with_capacity(kor);
    let mut vp = 1.0;
    for _ in 0..kor {
        v_powers.push(vp);
        vp *= v;
    }

    let mut sum = 0.0;
    let mut up = 1.0;
    for j in 0..jor {
        let row = &coeffs[j * kor..(j + 1) * kor];
        for (c, vpow) in row.iter().zip(&v_powers) {
            sum += c * up * vpow;
        }
        up *= u;
    }
    sum
}

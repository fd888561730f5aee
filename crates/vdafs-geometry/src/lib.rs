// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # VDAFS-Lite Geometry
//!
//! Entity decoders and evaluators for the VDA-FS geometric entities. The
//! reader in `vdafs-parser` only tokenizes: every entity's parameters stay
//! a flat token list until one of the decoders here gives them a shape.
//!
//! ## Overview
//!
//! - **Curves**: piecewise monomial 3D curves ([`decode_curve`],
//!   [`CurveModel::eval_at_t`], [`CurveModel::sample`])
//! - **Surfaces**: grids of tensor-product polynomial patches
//!   ([`decode_surf`], [`SurfaceModel::eval_at_st`])
//! - **Curves on surfaces**: CONS references with optional p-curves
//!   ([`decode_cons`], [`PCurve::eval`])
//! - **Faces**: trimmed surfaces with CONS loops ([`decode_face`],
//!   [`loop_boundary_points`])
//! - **Meshing**: triangle grids and wireframes from decoded surfaces
//!   ([`sample_surface_grid`], [`sample_surface_wireframe`])
//! - **Diagnostics**: per-seam C0 deviation reports ([`check_continuity`])
//!
//! Decoding is entity-scoped: one malformed SURF fails its own decode and
//! nothing else. Polynomials evaluate in plain monomial form because that
//! is what the format stores; see [`poly`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vdafs_geometry::{decode_surf, check_continuity, DEFAULT_SEAM_SAMPLES};
//!
//! let surf = decode_surf(&entity)?;
//! let p = surf.eval_at_st(0.5, 0.5);
//!
//! for report in check_continuity(&surf, DEFAULT_SEAM_SAMPLES) {
//!     println!("{:?} seam {:?}: max gap {:.3e}", report.direction, report.left, report.max);
//! }
//! ```

pub mod cons;
pub mod continuity;
pub mod curve;
mod cursor;
pub mod error;
pub mod face;
pub mod mesh;
pub mod poly;
pub mod surface;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

// Re-export main types
pub use cons::{decode_cons, ConsModel, PCurve, PCurveSegment};
pub use continuity::{
    check_continuity, max_deviation, SeamDirection, SeamReport, DEFAULT_SEAM_SAMPLES,
};
pub use curve::{decode_curve, CurveModel, CurveSegment};
pub use error::{Error, Result};
pub use face::{decode_face, loop_boundary_points, FaceLoop, FaceLoopItem, FaceModel};
pub use mesh::{sample_surface_grid, sample_surface_wireframe, SurfaceMesh, Wireframe};
pub use poly::{eval_monomial, eval_monomial_2d};
pub use surface::{decode_surf, SurfaceModel, SurfacePatch};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vdafs_model::ModelIndex;

    // A planar surface split into two patches, its boundary curve, and a
    // face trimming the surface with one CONS loop.
    const FLAT_VDA: &str = "\
SR1 = SURF / 2, 1, 0.0, 0.5, 1.0, 0.0, 1.0,
2, 2, 0.0, 0.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
2, 2, 0.5, 0.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0
CV1 = CURVE / 1, 0.0, 1.0, 2, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0
CN1 = CONS / SR1, CV1, 0.0, 1.0, 1, 0.0, 1.0,
2, 0.0, 1.0, 0.0, 0.0
FC1 = FACE / SR1, 1, CN1, 0.0, 1.0
END
";

    #[test]
    fn test_parse_and_decode_chain() {
        let model = vdafs_parser::read_str(FLAT_VDA, None);
        let index = ModelIndex::build(&model);

        let surf = decode_surf(index.get(&model, "SR1").unwrap()).unwrap();
        assert_eq!(surf.patch_count_s, 2);
        let p = surf.eval_at_st(0.75, 0.5);
        assert_relative_eq!(p.x, 0.75);
        assert_relative_eq!(p.y, 0.5);

        let curve = decode_curve(index.get(&model, "CV1").unwrap()).unwrap();
        assert_relative_eq!(curve.eval_at_t(0.5).x, 0.5);

        let face = decode_face(index.get(&model, "FC1").unwrap()).unwrap();
        assert_eq!(face.surf_ref, "SR1");
        let loops = loop_boundary_points(&model, &index, &face).unwrap();
        assert_eq!(loops[0].len(), 2);
        assert_relative_eq!(loops[0][1].x, 1.0);

        let reports = check_continuity(&surf, 21);
        assert!(max_deviation(&reports) < 1e-9);
    }
}

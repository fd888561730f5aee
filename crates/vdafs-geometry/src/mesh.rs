// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Uniform surface sampling
//!
//! Two consumers, two shapes: a triangle grid for shaded display and
//! iso-parameter polylines for wireframes. Grids are built per patch with
//! seams duplicated across patches — consumers tolerate duplicate
//! vertices, and merging would couple patches that the format keeps
//! independent.

use crate::SurfaceModel;
use nalgebra::Point3;

/// Triangle mesh sampled from a surface
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    /// Vertex positions
    pub positions: Vec<Point3<f64>>,
    /// Triangle indices, consistent winding
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Iso-parameter wireframe polylines sampled from a surface
#[derive(Clone, Debug, Default)]
pub struct Wireframe {
    /// Lines of constant t, swept along s
    pub s_lines: Vec<Vec<Point3<f64>>>,
    /// Lines of constant s, swept along t
    pub t_lines: Vec<Vec<Point3<f64>>>,
}

/// Sample every patch into an `(nu+1) x (nv+1)` vertex grid
///
/// Emits two triangles per grid cell. Patch seams are duplicated, not
/// merged.
pub fn sample_surface_grid(surf: &SurfaceModel, nu: usize, nv: usize) -> SurfaceMesh {
    let nu = nu.max(1);
    let nv = nv.max(1);

    let verts_per_patch = (nu + 1) * (nv + 1);
    let mut mesh = SurfaceMesh {
        positions: Vec::with_capacity(surf.patches.len() * verts_per_patch),
        indices: Vec::with_capacity(surf.patches.len() * nu * nv * 6),
    };

    for patch in &surf.patches {
        let base = mesh.positions.len() as u32;

        for i in 0..=nu {
            let u = i as f64 / nu as f64;
            for j in 0..=nv {
                let v = j as f64 / nv as f64;
                mesh.positions.push(patch.eval(u, v));
            }
        }

        let stride = (nv + 1) as u32;
        for i in 0..nu as u32 {
            for j in 0..nv as u32 {
                let a = base + i * stride + j;
                let b = a + stride;
                mesh.indices.extend_from_slice(&[a, b, a + 1]);
                mesh.indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }
    mesh
}

/// Sample iso-parameter polylines at caller-chosen density
///
/// With `include_seams = false`, the first iso line of each patch in the
/// interior direction is suppressed so shared patch boundaries are drawn
/// once.
pub fn sample_surface_wireframe(
    surf: &SurfaceModel,
    nu: usize,
    nv: usize,
    include_seams: bool,
) -> Wireframe {
    let nu = nu.max(1);
    let nv = nv.max(1);
    let mut wf = Wireframe::default();

    for ps in 0..surf.patch_count_s {
        for pt in 0..surf.patch_count_t {
            let patch = surf.patch(ps, pt);

            // Constant-t lines, swept along s
            for j in 0..=nv {
                if j == 0 && pt > 0 && !include_seams {
                    continue;
                }
                let v = j as f64 / nv as f64;
                let line = (0..=nu)
                    .map(|i| patch.eval(i as f64 / nu as f64, v))
                    .collect();
                wf.s_lines.push(line);
            }

            // Constant-s lines, swept along t
            for i in 0..=nu {
                if i == 0 && ps > 0 && !include_seams {
                    continue;
                }
                let u = i as f64 / nu as f64;
                let line = (0..=nv)
                    .map(|j| patch.eval(u, j as f64 / nv as f64))
                    .collect();
                wf.t_lines.push(line);
            }
        }
    }
    wf
}

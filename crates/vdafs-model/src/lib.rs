// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VDAFS-Lite Model - Shared types for VDA-FS parsing
//!
//! This crate provides the core data model for working with VDA-FS
//! (Verband der Automobilindustrie - Flächenschnittstelle) files: the
//! tokenized entity records produced by the reader, the file header, the
//! parsed model, and the derived name/type indices used for lookup.
//!
//! Decoded geometry (curves, surfaces, curve-on-surface mappings, faces)
//! lives in `vdafs-geometry`; the reader lives in `vdafs-parser`. This
//! crate only holds what both sides share.

pub mod error;
pub mod index;
pub mod types;

// Re-export all public types
pub use error::*;
pub use index::*;
pub use types::*;

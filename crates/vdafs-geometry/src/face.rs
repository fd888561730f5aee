// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FACE decoder and loop boundary extraction
//!
//! A FACE names its carrier surface and one or more trimming loops. Each
//! loop item references a CONS entity together with the curve-parameter
//! values at which the loop enters and leaves that CONS. Like CONS, the
//! decode is tolerant: a loop cut short mid-stream is kept with a
//! `truncated` flag rather than discarding the whole face.
//!
//! Token layout: `surf_ref [, loop_count] , repeated { n, n triples of
//! {cons_ref, u, v} }`.

use crate::cons::decode_cons;
use crate::cursor::TokenCursor;
use crate::{Error, Result};
use nalgebra::Point2;
use vdafs_model::{Command, Entity, Model, ModelIndex};

/// One boundary element: a CONS and the parameter span used from it
#[derive(Clone, Debug, PartialEq)]
pub struct FaceLoopItem {
    pub cons_ref: String,
    pub u: f64,
    pub v: f64,
}

/// A single trimming loop
#[derive(Clone, Debug, PartialEq)]
pub struct FaceLoop {
    pub items: Vec<FaceLoopItem>,
    /// True when the source declared more items than survived decoding
    pub truncated: bool,
}

/// Decoded FACE entity
#[derive(Clone, Debug, PartialEq)]
pub struct FaceModel {
    /// Name of the source entity, kept for error context
    pub name: String,
    pub surf_ref: String,
    pub loops: Vec<FaceLoop>,
}

/// Decode a FACE entity's parameter list
pub fn decode_face(entity: &Entity) -> Result<FaceModel> {
    if entity.command != Command::Face {
        return Err(Error::wrong_command(&entity.name, Command::Face));
    }

    let mut cursor = TokenCursor::new(&entity.name, &entity.params);
    let surf_ref = cursor.next_reference("surface reference")?.to_string();

    // Some writers emit an explicit loop count before the first loop's item
    // count. Both are plain integers, so disambiguate by what follows: a
    // loop count is followed by another integer, an item count by a
    // reference triple.
    if let (Some(a), Some(b)) = (cursor.peek(), cursor.peek_at(1)) {
        if a.is_number() && b.is_number() {
            cursor.advance();
        }
    }

    let mut loops = Vec::new();
    while cursor.remaining() > 0 {
        // A tail that does not start with a usable item count is ignored,
        // not fatal: prior loops stay valid
        let Some(declared) = cursor.peek().and_then(|t| t.as_integer()).filter(|&n| n > 0)
        else {
            break;
        };
        let declared = declared as usize;
        cursor.advance();
        let mut items = Vec::with_capacity(declared.min(cursor.remaining() / 3));
        let mut truncated = false;
        for _ in 0..declared {
            if cursor.remaining() < 3 || !cursor.peek().is_some_and(|t| t.is_reference()) {
                truncated = true;
                break;
            }
            let cons_ref = cursor.next_reference("loop CONS reference")?.to_string();
            let u = cursor.next_number("loop start parameter")?;
            let v = cursor.next_number("loop end parameter")?;
            items.push(FaceLoopItem { cons_ref, u, v });
        }
        if items.is_empty() {
            break;
        }
        loops.push(FaceLoop { items, truncated });
        if truncated {
            break;
        }
    }

    Ok(FaceModel {
        name: entity.name.clone(),
        surf_ref,
        loops,
    })
}

/// Resolve every loop item's CONS and evaluate its p-curve at the item's
/// start and end parameters, yielding one `(s, t)` polyline per loop.
///
/// Items whose CONS carries no p-curve are skipped; an item that names an
/// entity missing from the index is an error.
pub fn loop_boundary_points(
    model: &Model,
    index: &ModelIndex,
    face: &FaceModel,
) -> Result<Vec<Vec<Point2<f64>>>> {
    let mut out = Vec::with_capacity(face.loops.len());
    for lp in &face.loops {
        let mut points = Vec::new();
        for item in &lp.items {
            let entity = index
                .get(model, &item.cons_ref)
                .ok_or_else(|| Error::unknown_reference(&face.name, &item.cons_ref))?;
            let cons = decode_cons(entity)?;
            if let Some(pcurve) = &cons.pcurve {
                points.push(pcurve.eval(item.u));
                points.push(pcurve.eval(item.v));
            }
        }
        out.push(points);
    }
    Ok(out)
}

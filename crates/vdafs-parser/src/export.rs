// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw-text write-back
//!
//! Reconstructed files reuse each entity's original statement text, wrapped
//! into 72-column records, instead of re-serializing decoded structures.
//! That guarantees byte-level fidelity for every field the decoders do not
//! interpret.

use crate::scanner::DATA_COLUMNS;
use std::io::Write;
use vdafs_model::{Command, Entity, Model, ModelIndex, ParseError, Result};

/// Split a statement's raw text into 72-column data records
pub fn wrap_statement(raw: &str) -> Vec<String> {
    let raw = raw.trim_end_matches('\n');
    if raw.is_empty() {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        let mut end = rest.len().min(DATA_COLUMNS);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        out.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    out
}

fn write_entity<W: Write>(entity: &Entity, w: &mut W) -> std::io::Result<()> {
    for record in wrap_statement(&entity.raw_text) {
        writeln!(w, "{}", record)?;
    }
    Ok(())
}

fn write_header<W: Write>(model: &Model, w: &mut W) -> std::io::Result<()> {
    if let Some(header) = &model.header {
        writeln!(w, "{} = HEADER / {}", header.name, header.declared_line_count)?;
        for line in header.lines.iter().take(header.declared_line_count) {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

/// Write a whole model back out: header, entities in file order, `END`
pub fn write_model<W: Write>(model: &Model, w: &mut W) -> std::io::Result<()> {
    write_header(model, w)?;
    for entity in &model.entities {
        write_entity(entity, w)?;
    }
    writeln!(w, "END")
}

/// Collect the dependency closure of one FACE, in write order
///
/// Walks reference tokens only (no geometry decode): the FACE's surface,
/// every CONS it names, and each CONS's surface/curve references. Order is
/// CURVE, SURF, CONS (each sorted by name), FACE last, so a subset file
/// defines records before they are referenced.
pub fn face_dependencies(
    model: &Model,
    index: &ModelIndex,
    face_name: &str,
) -> Result<Vec<String>> {
    let face = index
        .get(model, face_name)
        .filter(|e| e.command == Command::Face)
        .ok_or_else(|| ParseError::EntityNotFound(face_name.to_string()))?;

    let mut needed: Vec<String> = Vec::new();
    let mut add = |needed: &mut Vec<String>, name: &str| {
        if !needed.iter().any(|n| n == name) {
            needed.push(name.to_string());
        }
    };

    for token in &face.params {
        let Some(reference) = token.as_reference() else {
            continue;
        };
        add(&mut needed, reference);
        if let Some(entity) = index.get(model, reference) {
            if entity.command == Command::Cons {
                for inner in entity.params.iter().filter_map(|t| t.as_reference()) {
                    add(&mut needed, inner);
                }
            }
        }
    }

    let mut ordered = Vec::with_capacity(needed.len() + 1);
    for command in [Command::Curve, Command::Surf, Command::Cons] {
        let mut group: Vec<String> = needed
            .iter()
            .filter(|name| {
                index
                    .get(model, name)
                    .is_some_and(|e| e.command == command)
            })
            .cloned()
            .collect();
        group.sort();
        ordered.extend(group);
    }
    ordered.push(face_name.to_string());
    Ok(ordered)
}

/// Write one FACE and its dependencies as a standalone valid file
pub fn write_face_subset<W: Write>(
    model: &Model,
    index: &ModelIndex,
    face_name: &str,
    w: &mut W,
) -> Result<()> {
    let ordered = face_dependencies(model, index, face_name)?;

    write_header(model, w)?;
    for name in &ordered {
        if let Some(entity) = index.get(model, name) {
            write_entity(entity, w)?;
        }
    }
    writeln!(w, "END")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_str;

    const SUBSET_VDA: &str = "\
CV1 = CURVE / 1, 0.0, 1.0, 2, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0
SR1 = SURF / 1, 1, 0.0, 1.0, 0.0, 1.0, 2, 2,
0.0, 1.0, 0.0, 0.0, 0.0, 0.0,
1.0, 1.0, 0.0, 0.0, 0.0, 0.0
CN1 = CONS / SR1, CV1, 0.0, 1.0
FC1 = FACE / SR1, 1, 1, CN1, 0.0, 1.0
END
";

    #[test]
    fn test_wrap_statement_bounds() {
        let long: String = std::iter::repeat('7').take(150).collect();
        let records = wrap_statement(&long);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.len() <= DATA_COLUMNS));
        assert_eq!(records.concat(), long);
    }

    #[test]
    fn test_write_model_round_trips() {
        let model = read_str(SUBSET_VDA, None);
        let mut buf = Vec::new();
        write_model(&model, &mut buf).unwrap();

        let reparsed = read_str(std::str::from_utf8(&buf).unwrap(), None);
        assert_eq!(reparsed.entity_count(), model.entity_count());
        for (a, b) in model.entities.iter().zip(&reparsed.entities) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.raw_text, b.raw_text);
            assert_eq!(a.params, b.params);
        }
    }

    #[test]
    fn test_face_dependency_closure() {
        let model = read_str(SUBSET_VDA, None);
        let index = ModelIndex::build(&model);

        let deps = face_dependencies(&model, &index, "FC1").unwrap();
        assert_eq!(deps, vec!["CV1", "SR1", "CN1", "FC1"]);

        assert!(matches!(
            face_dependencies(&model, &index, "FC9"),
            Err(ParseError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_face_subset_is_standalone() {
        let model = read_str(SUBSET_VDA, None);
        let index = ModelIndex::build(&model);

        let mut buf = Vec::new();
        write_face_subset(&model, &index, "FC1", &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("END\n"));

        let subset = read_str(&text, None);
        let subset_index = ModelIndex::build(&subset);
        for name in ["CV1", "SR1", "CN1", "FC1"] {
            assert!(subset_index.get(&subset, name).is_some(), "missing {}", name);
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VDAFS-Lite Parser - Tolerant reader for VDA-FS exchange files
//!
//! Reconstructs logical statements from the fixed-column legacy layout and
//! produces a [`Model`](vdafs_model::Model) of tokenized entities. The
//! reader follows the format's survival rules rather than a strict grammar:
//!
//! - Only the first 72 columns of each record carry data
//! - `$$` comments and blank lines are skipped, even mid-statement
//! - Statements continue over multiple records until the next start
//! - `HEADER / N` captures the following N records verbatim
//! - `END` stops parsing; a missing `END` is not an error
//! - Malformed statements are dropped (with a debug log), never fatal
//!
//! # Example
//!
//! ```ignore
//! let model = vdafs_parser::read_path("part.vda")?;
//! let index = vdafs_model::ModelIndex::build(&model);
//! for name in index.names_by_type(&vdafs_model::Command::Curve) {
//!     println!("curve {}", name);
//! }
//! ```

pub mod export;
mod scanner;
mod tokenizer;

pub use scanner::{parse_statement, scan, RawStatement, ScanOutput, DATA_COLUMNS};
pub use tokenizer::{classify_field, tokenize_params};

use log::debug;
use std::path::{Path, PathBuf};
use vdafs_model::{Command, Entity, Model, ParseError, Result};

/// Read and parse a VDA-FS file from disk
///
/// Fails only on IO errors; malformed statements inside the file are
/// skipped. The format predates UTF-8, so bytes are decoded as Latin-1.
pub fn read_path(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let content: String = bytes.iter().map(|&b| b as char).collect();
    Ok(read_str(&content, Some(path.to_path_buf())))
}

/// Parse VDA-FS content from a string
pub fn read_str(content: &str, source_path: Option<PathBuf>) -> Model {
    let scanned = scanner::scan(content);

    let mut entities = Vec::new();
    for stmt in &scanned.statements {
        let Some((name, word, tail)) = parse_statement(&stmt.text) else {
            let err = ParseError::malformed(stmt.start_line, &stmt.text);
            debug!("skipping: {}", err);
            continue;
        };

        let command = Command::parse(word);
        if command == Command::End {
            break;
        }

        entities.push(Entity {
            name: name.to_string(),
            command,
            params: tokenize_params(tail.unwrap_or("")),
            raw_text: stmt.text.clone(),
            line_range: (stmt.start_line, stmt.end_line),
        });
    }

    Model {
        source_path,
        header: scanned.header,
        entities,
    }
}

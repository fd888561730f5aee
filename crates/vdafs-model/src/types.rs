// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for VDA-FS data representation
//!
//! This module defines the fundamental types used throughout the parsing
//! system: parameter tokens, the statement command tag, entity records, the
//! file header, and the parsed model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single parameter token from a statement's parameter list
///
/// VDA-FS parameter lists are flat, comma-separated sequences whose fields
/// are typed lexically: a two-uppercase-letter prefix followed by digits is
/// an entity reference (e.g. `SR85`, `CV57`), anything that parses as an
/// integer or float is numeric, and everything else is kept as opaque text.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Token {
    /// Numeric value (integers are folded into f64)
    Number(f64),
    /// Cross-reference to another entity by name (e.g. `SR85`)
    Reference(String),
    /// Unclassifiable field, kept verbatim
    Text(String),
}

impl Token {
    /// Get the numeric value, if this token is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Token::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a non-negative integer, rounding numeric tokens
    ///
    /// Counts and polynomial orders are carried as plain numeric fields in
    /// the source format; this rounds to the nearest integer the way the
    /// decoders expect.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Token::Number(v) if v.is_finite() => Some(v.round() as i64),
            _ => None,
        }
    }

    /// Get the referenced entity name, if this token is a reference
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Token::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// True for numeric tokens
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    /// True for reference tokens
    pub fn is_reference(&self) -> bool {
        matches!(self, Token::Reference(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Reference(name) => write!(f, "{}", name),
            Token::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Statement command tag
///
/// Covers the commands this toolkit interprets. Unrecognized commands are
/// retained with their original spelling rather than rejected, so files
/// carrying vendor extensions still round-trip.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Command {
    Header,
    Curve,
    Surf,
    Cons,
    Face,
    Point,
    Pset,
    Mdi,
    End,
    /// Unrecognized command, spelling preserved
    Other(String),
}

impl Command {
    /// Parse a command word (expected uppercase, as the format requires)
    pub fn parse(word: &str) -> Self {
        match word {
            "HEADER" => Command::Header,
            "CURVE" => Command::Curve,
            "SURF" => Command::Surf,
            "CONS" => Command::Cons,
            "FACE" => Command::Face,
            "POINT" => Command::Point,
            "PSET" => Command::Pset,
            "MDI" => Command::Mdi,
            "END" => Command::End,
            other => Command::Other(other.to_string()),
        }
    }

    /// Get the command's source spelling
    pub fn as_str(&self) -> &str {
        match self {
            Command::Header => "HEADER",
            Command::Curve => "CURVE",
            Command::Surf => "SURF",
            Command::Cons => "CONS",
            Command::Face => "FACE",
            Command::Point => "POINT",
            Command::Pset => "PSET",
            Command::Mdi => "MDI",
            Command::End => "END",
            Command::Other(s) => s,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File header: `NAME = HEADER / N` followed by N verbatim raw records
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Statement name of the header record
    pub name: String,
    /// Line count declared in the HEADER statement
    pub declared_line_count: usize,
    /// The captured raw lines, verbatim (including sequence-number columns)
    pub lines: Vec<String>,
}

/// One parsed entity statement
///
/// Entities are immutable once parsed. `raw_text` is the coalesced
/// statement exactly as it appeared in the data columns, so write-back can
/// reproduce fields the decoders never interpret.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Statement name (unique lookup key; see `ModelIndex` for collisions)
    pub name: String,
    /// Command tag
    pub command: Command,
    /// Tokenized parameter list, in source order
    pub params: Vec<Token>,
    /// Coalesced statement text (data columns only)
    pub raw_text: String,
    /// 1-based source line range (first line, last line)
    pub line_range: (usize, usize),
}

impl Entity {
    /// Get a parameter token by position
    pub fn param(&self, index: usize) -> Option<&Token> {
        self.params.get(index)
    }
}

/// A parsed VDA-FS file: header plus entities in file order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    /// Source path, when read from disk
    pub source_path: Option<PathBuf>,
    /// File header, if the file declared one
    pub header: Option<Header>,
    /// All entity statements, file order preserved
    pub entities: Vec<Entity>,
}

impl Model {
    /// Number of entities in the model
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

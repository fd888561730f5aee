// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for reading VDA-FS files

use thiserror::Error;

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading a VDA-FS file
///
/// The reader is tolerant by design: individual malformed statements are
/// skipped, not fatal, so `MalformedStatement` is surfaced only by code
/// that opts into strict handling.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Statement text did not match `NAME = COMMAND / params`
    #[error("Malformed statement at line {line}: {text}")]
    MalformedStatement { line: usize, text: String },

    /// Named entity missing from the model
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Create a malformed-statement error
    pub fn malformed(line: usize, text: impl Into<String>) -> Self {
        ParseError::MalformedStatement {
            line,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_line_and_text() {
        let err = ParseError::malformed(7, "CV3 = CURVE garbage");
        assert_eq!(
            err.to_string(),
            "Malformed statement at line 7: CV3 = CURVE garbage"
        );
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for entity decoding and evaluation
//!
//! Decoder errors are entity-scoped: failing to decode one entity never
//! prevents the rest of the model from being decoded. Evaluators fail
//! outright rather than returning partial geometry.

use thiserror::Error;
use vdafs_model::Command;

/// Decode/evaluate result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the entity decoders and evaluators
#[derive(Error, Debug)]
pub enum Error {
    /// Declared count exceeds the available parameter tokens
    #[error("{entity}: missing parameters ({context})")]
    MissingParameters { entity: String, context: String },

    /// Non-positive segment or patch count
    #[error("{entity}: invalid count ({context})")]
    InvalidCount { entity: String, context: String },

    /// Non-positive polynomial order
    #[error("{entity}: invalid order ({context})")]
    InvalidOrder { entity: String, context: String },

    /// Zero-length local parameter interval
    #[error("{entity}: degenerate parameter interval ({context})")]
    DegenerateInterval { entity: String, context: String },

    /// A number was expected but the token has another type
    #[error("{entity}: non-numeric value where a coefficient was expected ({context})")]
    NonNumericCoefficient { entity: String, context: String },

    /// A token expected to be an entity reference is not one
    #[error("{entity}: expected an entity reference ({context})")]
    InvalidReference { entity: String, context: String },

    /// A reference resolves to no entity in the index
    #[error("{entity}: unknown reference {reference}")]
    UnknownReference { entity: String, reference: String },

    /// The patch-order alignment scan exhausted its bound
    #[error("{entity}: no plausible patch orders found after skipping {skipped} tokens")]
    UnalignedPatchData { entity: String, skipped: usize },

    /// Entity handed to the wrong decoder
    #[error("{entity}: entity is not a {expected}")]
    WrongCommand { entity: String, expected: Command },
}

impl Error {
    pub fn missing(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::MissingParameters {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn invalid_count(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::InvalidCount {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn invalid_order(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::InvalidOrder {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn degenerate(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::DegenerateInterval {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn non_numeric(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::NonNumericCoefficient {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn invalid_reference(entity: impl Into<String>, context: impl Into<String>) -> Self {
        Error::InvalidReference {
            entity: entity.into(),
            context: context.into(),
        }
    }

    pub fn unknown_reference(entity: impl Into<String>, reference: impl Into<String>) -> Self {
        Error::UnknownReference {
            entity: entity.into(),
            reference: reference.into(),
        }
    }

    pub fn wrong_command(entity: impl Into<String>, expected: Command) -> Self {
        Error::WrongCommand {
            entity: entity.into(),
            expected,
        }
    }
}

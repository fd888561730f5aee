// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token cursor shared by the entity decoders
//!
//! Wraps an entity's flat parameter list with typed, error-reporting reads
//! so each decoder states its layout instead of its bookkeeping.

use crate::{Error, Result};
use vdafs_model::Token;

pub(crate) struct TokenCursor<'a> {
    entity: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(entity: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            entity,
            tokens,
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    fn next(&mut self, what: &str) -> Result<&'a Token> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| Error::missing(self.entity, what))?;
        self.pos += 1;
        Ok(token)
    }

    /// Read a positive count (segment or patch count)
    pub fn next_count(&mut self, what: &str) -> Result<usize> {
        let token = self.next(what)?;
        let value = token
            .as_integer()
            .ok_or_else(|| Error::non_numeric(self.entity, what))?;
        if value <= 0 {
            return Err(Error::invalid_count(
                self.entity,
                format!("{} = {}", what, value),
            ));
        }
        Ok(value as usize)
    }

    /// Read a positive polynomial order
    pub fn next_order(&mut self, what: &str) -> Result<usize> {
        let token = self.next(what)?;
        let value = token
            .as_integer()
            .ok_or_else(|| Error::non_numeric(self.entity, what))?;
        if value <= 0 {
            return Err(Error::invalid_order(
                self.entity,
                format!("{} = {}", what, value),
            ));
        }
        Ok(value as usize)
    }

    /// Read a single numeric value
    pub fn next_number(&mut self, what: &str) -> Result<f64> {
        let token = self.next(what)?;
        token
            .as_number()
            .ok_or_else(|| Error::non_numeric(self.entity, what))
    }

    /// Read `n` numeric values
    ///
    /// `n` comes from file-declared counts, so capacity is bounded by the
    /// tokens actually present; a short stream fails on the first missing
    /// token rather than at allocation.
    pub fn next_numbers(&mut self, n: usize, what: &str) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(n.min(self.remaining()));
        for _ in 0..n {
            out.push(self.next_number(what)?);
        }
        Ok(out)
    }

    /// Read an entity reference
    pub fn next_reference(&mut self, what: &str) -> Result<&'a str> {
        let token = self.next(what)?;
        token
            .as_reference()
            .ok_or_else(|| Error::invalid_reference(self.entity, what))
    }
}

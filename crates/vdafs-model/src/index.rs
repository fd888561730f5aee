// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived lookup indices over a parsed model
//!
//! A `ModelIndex` is built in one pass over a `Model` and never mutates it.
//! Rebuild the index whenever the model is replaced.

use crate::{Command, Entity, Model};
use rustc_hash::FxHashMap;

/// Name and type indices over a model
///
/// `by_name` stores each entity's position in the model's entity list.
/// When two entities share a name, the later one wins: the index keeps the
/// last occurrence, matching how downstream references behave in files
/// that redefine a record.
#[derive(Debug, Default)]
pub struct ModelIndex {
    /// Entity name -> position in `Model::entities` (last occurrence wins)
    by_name: FxHashMap<String, usize>,
    /// Command -> entity names in file order
    by_type: FxHashMap<Command, Vec<String>>,
}

impl ModelIndex {
    /// Build indices over a model in a single pass
    pub fn build(model: &Model) -> Self {
        let mut by_name = FxHashMap::default();
        let mut by_type: FxHashMap<Command, Vec<String>> = FxHashMap::default();

        for (pos, entity) in model.entities.iter().enumerate() {
            by_name.insert(entity.name.clone(), pos);
            by_type
                .entry(entity.command.clone())
                .or_default()
                .push(entity.name.clone());
        }

        Self { by_name, by_type }
    }

    /// Look up an entity by name
    ///
    /// Positions are only meaningful against the model the index was built
    /// from; a shorter model yields `None` rather than a panic.
    pub fn get<'m>(&self, model: &'m Model, name: &str) -> Option<&'m Entity> {
        self.by_name
            .get(name)
            .and_then(|&pos| model.entities.get(pos))
    }

    /// Check whether a name is indexed
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// List entity names of a command, in file order
    pub fn names_by_type(&self, command: &Command) -> &[String] {
        self.by_type.get(command).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Count entities of a command
    pub fn count_by_type(&self, command: &Command) -> usize {
        self.names_by_type(command).len()
    }

    /// Number of distinct names
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn entity(name: &str, command: Command, params: Vec<Token>) -> Entity {
        Entity {
            name: name.to_string(),
            command,
            params,
            raw_text: String::new(),
            line_range: (0, 0),
        }
    }

    #[test]
    fn test_lookup_and_type_listing() {
        let model = Model {
            source_path: None,
            header: None,
            entities: vec![
                entity("CV1", Command::Curve, vec![]),
                entity("SR1", Command::Surf, vec![]),
                entity("CV2", Command::Curve, vec![]),
            ],
        };
        let idx = ModelIndex::build(&model);

        assert_eq!(idx.names_by_type(&Command::Curve), &["CV1", "CV2"]);
        assert_eq!(idx.names_by_type(&Command::Surf), &["SR1"]);
        assert!(idx.names_by_type(&Command::Face).is_empty());
        assert_eq!(idx.get(&model, "SR1").unwrap().command, Command::Surf);
        assert!(idx.get(&model, "SR9").is_none());
    }

    #[test]
    fn test_get_against_shorter_model_is_none() {
        let model = Model {
            source_path: None,
            header: None,
            entities: vec![
                entity("CV1", Command::Curve, vec![]),
                entity("CV2", Command::Curve, vec![]),
            ],
        };
        let idx = ModelIndex::build(&model);

        let empty = Model::default();
        assert!(idx.get(&empty, "CV2").is_none());
    }

    #[test]
    fn test_name_collision_last_wins() {
        let model = Model {
            source_path: None,
            header: None,
            entities: vec![
                entity("CV1", Command::Curve, vec![Token::Number(1.0)]),
                entity("CV1", Command::Curve, vec![Token::Number(2.0)]),
            ],
        };
        let idx = ModelIndex::build(&model);

        // Later definition shadows the earlier one
        let found = idx.get(&model, "CV1").unwrap();
        assert_eq!(found.params, vec![Token::Number(2.0)]);
        // Both occurrences keep their place in the type listing
        assert_eq!(idx.names_by_type(&Command::Curve).len(), 2);
        assert_eq!(idx.name_count(), 1);
    }
}

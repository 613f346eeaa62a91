// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

use crate::error::BoxError;
use crate::error::BoxResult;
use crate::types::translation::Translation;

/// A vocabulary card: a term in the language being learned, and the
/// translations the learner has collected for it.
///
/// Cards are identified by their term. Equality and hashing look at the term
/// only, compared exactly and case-sensitively, so two cards with the same
/// term but different translations are the same card as far as a box is
/// concerned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabularyCard {
    term: String,
    translations: Vec<Translation>,
}

impl VocabularyCard {
    /// Create a card with no translations.
    ///
    /// The term is stored verbatim. It is rejected only if it is blank once
    /// trimmed.
    pub fn new(term: impl Into<String>) -> BoxResult<Self> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(BoxError::invalid("the term of a card must not be blank"));
        }
        Ok(Self {
            term,
            translations: Vec::new(),
        })
    }

    /// Create a card and add each translation in order, skipping duplicates.
    pub fn with_translations(
        term: impl Into<String>,
        translations: impl IntoIterator<Item = Translation>,
    ) -> BoxResult<Self> {
        let mut card = Self::new(term)?;
        for t in translations {
            card.add_translation(t);
        }
        Ok(card)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Append a translation unless an equal one is already present.
    pub fn add_translation(&mut self, entry: Translation) -> bool {
        if self.translations.contains(&entry) {
            return false;
        }
        self.translations.push(entry);
        true
    }

    /// Remove the first translation equal to `entry`.
    pub fn remove_translation(&mut self, entry: &Translation) -> bool {
        match self.translations.iter().position(|t| t == entry) {
            Some(index) => {
                self.translations.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_translation_at(&mut self, index: usize) -> bool {
        if index >= self.translations.len() {
            return false;
        }
        self.translations.remove(index);
        true
    }

    /// Combine two cards for the same term into a new card.
    ///
    /// The result has this card's translations followed by those of `other`
    /// that this card lacks. Neither card is modified.
    pub fn merge(&self, other: &VocabularyCard) -> BoxResult<VocabularyCard> {
        if self.term != other.term {
            return Err(BoxError::invalid(format!(
                "cannot merge cards for different terms: '{}' and '{}'",
                self.term, other.term
            )));
        }
        Ok(self.merged_with(other))
    }

    /// Merge without checking the terms. Callers must have matched them.
    pub(crate) fn merged_with(&self, other: &VocabularyCard) -> VocabularyCard {
        let mut card = self.clone();
        for t in &other.translations {
            card.add_translation(t.clone());
        }
        card
    }

    /// Whether the translation list holds two equal entries. Only snapshots
    /// decoded from outside can be in this state.
    pub(crate) fn has_duplicate_translations(&self) -> bool {
        self.translations
            .iter()
            .enumerate()
            .any(|(i, t)| self.translations[..i].contains(t))
    }
}

impl PartialEq for VocabularyCard {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl Eq for VocabularyCard {}

impl Hash for VocabularyCard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.term.hash(state);
    }
}

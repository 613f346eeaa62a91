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

//! The Leitner box.
//!
//! A box is a fixed number of tiers. Tier 0 holds cards the learner does
//! not know yet and the last tier holds mastered cards. Each tier is a
//! queue: cards enter at the back and are drilled from the front. A
//! correct answer moves the front card one tier up (the last tier keeps
//! it), a wrong answer sends it back to tier 0.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::error::BoxError;
use crate::error::BoxResult;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::card::VocabularyCard;
use crate::types::translation::Translation;

/// The number of tiers in a box built with [`LeitnerBox::default`].
pub const DEFAULT_TIER_COUNT: usize = 5;

type Tier = VecDeque<VocabularyCard>;

/// A Leitner box. A term is in at most one tier at a time, and the number of
/// tiers never changes after construction.
#[derive(Clone, Debug)]
pub struct LeitnerBox {
    tiers: Vec<Tier>,
}

impl LeitnerBox {
    /// Create an empty box with `tier_count` tiers.
    pub fn new(tier_count: usize) -> BoxResult<Self> {
        if tier_count == 0 {
            return Err(BoxError::invalid(
                "the number of tiers must be greater than 0",
            ));
        }
        Ok(Self {
            tiers: vec![Tier::new(); tier_count],
        })
    }

    /// Build a box from tiers that have already been validated.
    pub(crate) fn from_tiers(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub(crate) fn raw_tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    fn check_tier(&self, index: usize) -> BoxResult<()> {
        if index >= self.tiers.len() {
            return Err(BoxError::OutOfRange {
                index,
                tier_count: self.tiers.len(),
            });
        }
        Ok(())
    }

    fn last_tier(&self) -> usize {
        self.tiers.len() - 1
    }

    /// The cards of a tier, front first.
    pub fn tier(&self, index: usize) -> BoxResult<vec_deque::Iter<'_, VocabularyCard>> {
        self.check_tier(index)?;
        Ok(self.tiers[index].iter())
    }

    /// Every card in the box with its tier, in tier order and front first
    /// within a tier.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &VocabularyCard)> {
        self.tiers
            .iter()
            .enumerate()
            .flat_map(|(index, tier)| tier.iter().map(move |card| (index, card)))
    }

    /// The tier holding `term`, scanning tiers in ascending order.
    pub fn find(&self, term: &str) -> Option<usize> {
        self.tiers
            .iter()
            .position(|tier| tier.iter().any(|card| card.term() == term))
    }

    pub fn find_in_tier(&self, term: &str, index: usize) -> BoxResult<bool> {
        self.check_tier(index)?;
        Ok(self.tiers[index].iter().any(|card| card.term() == term))
    }

    /// Insert a new card for `term` at the back of tier 0.
    ///
    /// Returns false and leaves the box untouched if the term is already in
    /// some tier.
    pub fn insert(&mut self, term: &str) -> BoxResult<bool> {
        if self.find(term).is_some() {
            return Ok(false);
        }
        let card = VocabularyCard::new(term)?;
        self.tiers[0].push_back(card);
        Ok(true)
    }

    /// Insert a card at the back of tier 0.
    ///
    /// If the term is already in the box, the existing card is taken out of
    /// its tier and merged with `card`, and the merged card goes to tier 0.
    /// Re-entering a known term therefore resets it to the first tier.
    pub fn insert_card(&mut self, card: VocabularyCard) -> bool {
        let card = match self.remove(card.term()) {
            Some(existing) => existing.merged_with(&card),
            None => card,
        };
        self.tiers[0].push_back(card);
        true
    }

    /// Remove the card for `term`, wherever it is.
    pub fn remove(&mut self, term: &str) -> Option<VocabularyCard> {
        for tier in self.tiers.iter_mut() {
            if let Some(pos) = tier.iter().position(|card| card.term() == term) {
                return tier.remove(pos);
            }
        }
        None
    }

    /// The card at the front of a tier, if any.
    pub fn peek_front(&self, index: usize) -> BoxResult<Option<&VocabularyCard>> {
        self.check_tier(index)?;
        Ok(self.tiers[index].front())
    }

    /// Answer the card at the front of a tier.
    ///
    /// A correct answer moves it to the back of the next tier (the last tier
    /// keeps it). A wrong answer moves it to the back of tier 0. Returns the
    /// tier the card ended up in.
    pub fn answer(&mut self, index: usize, correct: bool) -> BoxResult<usize> {
        self.check_tier(index)?;
        let target = if correct {
            (index + 1).min(self.last_tier())
        } else {
            0
        };
        let card = self.tiers[index]
            .pop_front()
            .ok_or(BoxError::EmptyTier(index))?;
        self.tiers[target].push_back(card);
        Ok(target)
    }

    /// Answer the card at the front of tier 0, with a gentler demotion.
    ///
    /// A correct answer behaves like `answer(0, true)`. A wrong answer puts
    /// the card back `limit` places from the front instead of behind the
    /// whole tier, so a card that was just missed comes up again soon.
    /// Returns the card's tier and its position within that tier.
    pub fn answer_tier_zero_with_limit(
        &mut self,
        limit: i64,
        correct: bool,
    ) -> BoxResult<(usize, usize)> {
        if limit < 0 {
            return Err(BoxError::invalid(format!(
                "the requeue limit must not be negative, got {limit}"
            )));
        }
        if correct {
            let target = self.answer(0, true)?;
            return Ok((target, self.tiers[target].len() - 1));
        }
        let tier = &mut self.tiers[0];
        let card = tier.pop_front().ok_or(BoxError::EmptyTier(0))?;
        let pos = usize::try_from(limit).unwrap_or(usize::MAX).min(tier.len());
        tier.insert(pos, card);
        Ok((0, pos))
    }

    /// Randomly reorder one tier. Other tiers are untouched.
    pub fn shuffle(&mut self, index: usize, rng: &mut TinyRng) -> BoxResult<()> {
        self.check_tier(index)?;
        shuffle(self.tiers[index].make_contiguous(), rng);
        Ok(())
    }

    /// The number of cards in each tier, in tier order.
    pub fn case_volumes(&self) -> Vec<usize> {
        self.tiers.iter().map(|tier| tier.len()).collect()
    }

    pub fn total_volume(&self) -> usize {
        self.tiers.iter().map(|tier| tier.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_volume() == 0
    }

    /// Combine two boxes into a new one, leaving both untouched.
    ///
    /// The result has as many tiers as the larger box. Every card keeps its
    /// tier. A term present in both boxes appears once, in the lower of its
    /// two tiers, carrying the translations of both cards.
    pub fn merge(&self, other: &LeitnerBox) -> LeitnerBox {
        let tier_count = self.tier_count().max(other.tier_count());
        let mut merged = LeitnerBox {
            tiers: vec![Tier::new(); tier_count],
        };
        for (index, tier) in self.tiers.iter().enumerate() {
            merged.tiers[index].extend(tier.iter().cloned());
        }
        for (current, tier) in other.tiers.iter().enumerate() {
            for card in tier {
                match merged.find(card.term()) {
                    None => merged.tiers[current].push_back(card.clone()),
                    Some(found) => {
                        let target = found.min(current);
                        if let Some(existing) = merged.remove(card.term()) {
                            merged.tiers[target].push_back(existing.merged_with(card));
                        }
                    }
                }
            }
        }
        merged
    }

    fn card_at_mut(
        &mut self,
        index: usize,
        pos: usize,
    ) -> BoxResult<Option<&mut VocabularyCard>> {
        self.check_tier(index)?;
        Ok(self.tiers[index].get_mut(pos))
    }

    /// Add a translation to the card at position `pos` of a tier.
    ///
    /// Returns false if there is no card at that position or it already has
    /// the translation.
    pub fn add_translation_to(
        &mut self,
        index: usize,
        pos: usize,
        entry: Translation,
    ) -> BoxResult<bool> {
        Ok(self
            .card_at_mut(index, pos)?
            .is_some_and(|card| card.add_translation(entry)))
    }

    /// Remove a translation from the card at position `pos` of a tier.
    pub fn remove_translation_from(
        &mut self,
        index: usize,
        pos: usize,
        entry: &Translation,
    ) -> BoxResult<bool> {
        Ok(self
            .card_at_mut(index, pos)?
            .is_some_and(|card| card.remove_translation(entry)))
    }

    /// Remove the translation at `translation_index` from the card at
    /// position `pos` of a tier.
    pub fn remove_translation_index_from(
        &mut self,
        index: usize,
        pos: usize,
        translation_index: usize,
    ) -> BoxResult<bool> {
        Ok(self
            .card_at_mut(index, pos)?
            .is_some_and(|card| card.remove_translation_at(translation_index)))
    }
}

impl Default for LeitnerBox {
    fn default() -> Self {
        Self {
            tiers: vec![Tier::new(); DEFAULT_TIER_COUNT],
        }
    }
}

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

use leitner_core::BoxError;
use leitner_core::BoxResult;
use leitner_core::LeitnerBox;
use leitner_core::TinyRng;

use crate::collection::Collection;
use crate::error::Fallible;

/// Answer the front card of a tier and save.
///
/// A wrong answer in tier 0 uses the configured requeue limit, if any.
pub fn answer_card(collection: &mut Collection, tier: usize, correct: bool) -> Fallible<String> {
    let tier = collection.check_tier(tier)?;
    if collection.leitner.peek_front(tier)?.is_none() {
        return Ok(format!("Tier {tier} is empty."));
    }
    let limit = collection.config.wrong_answer_limit;
    let answered = answer_front(&mut collection.leitner, tier, correct, limit)?;
    let message = match answered.position {
        Some(pos) => format!(
            "'{}' moved to tier {}, position {pos}.",
            answered.term, answered.tier
        ),
        None => format!("'{}' moved to tier {}.", answered.term, answered.tier),
    };
    log::debug!("{message}");
    collection.save()?;
    Ok(message)
}

pub fn shuffle_tier(
    collection: &mut Collection,
    tier: usize,
    seed: Option<u64>,
) -> Fallible<String> {
    let tier = collection.check_tier(tier)?;
    let mut rng = match seed {
        Some(seed) => TinyRng::from_seed(seed),
        None => TinyRng::from_clock(),
    };
    collection.leitner.shuffle(tier, &mut rng)?;
    collection.save()?;
    Ok(format!("Shuffled tier {tier}."))
}

/// The result of answering the front card of a tier.
pub struct Answered {
    pub term: String,
    pub tier: usize,
    /// Set when a wrong answer was requeued near the front of tier 0.
    pub position: Option<usize>,
}

/// Answer the front card of `tier`.
///
/// With a `limit`, a wrong answer in tier 0 requeues the card `limit` places
/// from the front. Every other answer is a plain `answer`.
pub fn answer_front(
    leitner: &mut LeitnerBox,
    tier: usize,
    correct: bool,
    limit: Option<i64>,
) -> BoxResult<Answered> {
    let term = leitner
        .peek_front(tier)?
        .map(|card| card.term().to_string())
        .ok_or(BoxError::EmptyTier(tier))?;
    match (tier, limit) {
        (0, Some(limit)) if !correct => {
            let (tier, pos) = leitner.answer_tier_zero_with_limit(limit, false)?;
            Ok(Answered {
                term,
                tier,
                position: Some(pos),
            })
        }
        _ => {
            let tier = leitner.answer(tier, correct)?;
            Ok(Answered {
                term,
                tier,
                position: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cards() -> BoxResult<LeitnerBox> {
        let mut leitner = LeitnerBox::new(3)?;
        for term in ["a", "b", "c"] {
            leitner.insert(term)?;
        }
        Ok(leitner)
    }

    #[test]
    fn test_answer_front_correct() -> BoxResult<()> {
        let mut leitner = three_cards()?;
        let answered = answer_front(&mut leitner, 0, true, Some(1))?;
        assert_eq!(answered.term, "a");
        assert_eq!(answered.tier, 1);
        assert_eq!(answered.position, None);
        assert_eq!(leitner.case_volumes(), vec![2, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_answer_front_wrong_with_limit() -> BoxResult<()> {
        let mut leitner = three_cards()?;
        let answered = answer_front(&mut leitner, 0, false, Some(1))?;
        assert_eq!(answered.term, "a");
        assert_eq!(answered.tier, 0);
        assert_eq!(answered.position, Some(1));
        let order: Vec<&str> = leitner.tier(0)?.map(|c| c.term()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        Ok(())
    }

    #[test]
    fn test_answer_front_wrong_without_limit() -> BoxResult<()> {
        let mut leitner = three_cards()?;
        answer_front(&mut leitner, 0, false, None)?;
        let order: Vec<&str> = leitner.tier(0)?.map(|c| c.term()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        Ok(())
    }

    #[test]
    fn test_answer_front_empty_tier() -> BoxResult<()> {
        let mut leitner = three_cards()?;
        assert!(matches!(
            answer_front(&mut leitner, 2, true, None),
            Err(BoxError::EmptyTier(2))
        ));
        Ok(())
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() -> Fallible<()> {
        use crate::helper::create_tmp_directory;

        let dir = create_tmp_directory()?;
        let orders: Vec<Vec<String>> = (0..2)
            .map(|_| -> Fallible<Vec<String>> {
                let mut collection = Collection::new(None, Some(dir.join("box.json")))?;
                collection.leitner = LeitnerBox::new(3)?;
                for term in ["a", "b", "c", "d", "e", "f"] {
                    collection.leitner.insert(term)?;
                }
                shuffle_tier(&mut collection, 0, Some(42))?;
                Ok(collection
                    .leitner
                    .tier(0)?
                    .map(|c| c.term().to_string())
                    .collect())
            })
            .collect::<Fallible<_>>()?;
        assert_eq!(orders[0], orders[1]);
        Ok(())
    }
}

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

//! Turning raw input into cards: the glue between the input side, the
//! dictionary, and the box.

use leitner_core::LeitnerBox;
use leitner_core::Translation;
use leitner_core::VocabularyCard;

use crate::dictionary::Lookup;
use crate::error::Fallible;
use crate::error::fail;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The dictionary had nothing for a new term, so nothing was inserted.
    NotFound,
    /// A new card went into tier 0.
    Inserted { translations: usize },
    /// The term was already in `previous_tier`. Its card was merged with the
    /// new translations and moved back to tier 0.
    Merged {
        previous_tier: usize,
        translations: usize,
    },
    /// The term was already in `tier` and there was nothing to add.
    AlreadyPresent { tier: usize },
}

/// What to insert.
pub struct Request<'a> {
    /// The term as it came in, before trimming.
    pub raw: &'a str,
    /// Translations given by hand.
    pub manual: Vec<Translation>,
    /// Indices into the dictionary's suggestions to keep. `None` keeps all.
    pub pick: Option<Vec<usize>>,
}

/// Insert a term into the box, pulling translations from `lookup` if given.
pub fn insert_term(
    leitner: &mut LeitnerBox,
    lookup: Option<&dyn Lookup>,
    request: Request,
) -> Fallible<Outcome> {
    let term = request.raw.trim();
    if term.is_empty() {
        return fail("nothing to insert: the term is blank.");
    }
    let candidates: Vec<Translation> = match lookup {
        Some(lookup) => lookup.lookup(term)?,
        None => Vec::new(),
    };
    log::debug!("{} dictionary suggestions for '{term}'", candidates.len());
    let mut translations: Vec<Translation> = match request.pick {
        Some(indices) => {
            let mut picked = Vec::new();
            for index in indices {
                match candidates.get(index) {
                    Some(t) => picked.push(t.clone()),
                    None => {
                        return fail(format!(
                            "suggestion {index} does not exist: there are {} suggestions.",
                            candidates.len()
                        ));
                    }
                }
            }
            picked
        }
        None => candidates,
    };
    translations.extend(request.manual);

    let previous = leitner.find(term);
    if translations.is_empty() {
        return match previous {
            Some(tier) => Ok(Outcome::AlreadyPresent { tier }),
            None if lookup.is_some() => {
                log::warn!("'{term}' was not found in the dictionary");
                Ok(Outcome::NotFound)
            }
            None => {
                leitner.insert(term)?;
                Ok(Outcome::Inserted { translations: 0 })
            }
        };
    }

    let card = VocabularyCard::with_translations(term, translations)?;
    leitner.insert_card(card);
    let translations = leitner
        .tier(0)?
        .last()
        .map(|card| card.translations().len())
        .unwrap_or(0);
    Ok(match previous {
        Some(previous_tier) => Outcome::Merged {
            previous_tier,
            translations,
        },
        None => Outcome::Inserted { translations },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn dictionary() -> Fallible<Dictionary> {
        let dict = Dictionary::open_in_memory()?;
        dict.insert_entry("run", "laufen", "verb")?;
        dict.insert_entry("run", "rennen", "verb")?;
        Ok(dict)
    }

    fn request(raw: &str) -> Request<'_> {
        Request {
            raw,
            manual: Vec::new(),
            pick: None,
        }
    }

    #[test]
    fn test_new_term_with_suggestions() -> Fallible<()> {
        let dict = dictionary()?;
        let mut b = LeitnerBox::default();
        let outcome = insert_term(&mut b, Some(&dict), request("  run\n"))?;
        assert_eq!(outcome, Outcome::Inserted { translations: 2 });
        assert_eq!(b.find("run"), Some(0));
        Ok(())
    }

    #[test]
    fn test_unknown_term_is_not_inserted() -> Fallible<()> {
        let dict = dictionary()?;
        let mut b = LeitnerBox::default();
        let outcome = insert_term(&mut b, Some(&dict), request("swim"))?;
        assert_eq!(outcome, Outcome::NotFound);
        assert!(b.is_empty());
        Ok(())
    }

    #[test]
    fn test_without_lookup_inserts_bare_term() -> Fallible<()> {
        let mut b = LeitnerBox::default();
        assert_eq!(
            insert_term(&mut b, None, request("swim"))?,
            Outcome::Inserted { translations: 0 }
        );
        assert_eq!(
            insert_term(&mut b, None, request("swim"))?,
            Outcome::AlreadyPresent { tier: 0 }
        );
        assert_eq!(b.total_volume(), 1);
        Ok(())
    }

    #[test]
    fn test_known_term_is_merged_and_reset() -> Fallible<()> {
        let dict = dictionary()?;
        let mut b = LeitnerBox::default();
        insert_term(
            &mut b,
            Some(&dict),
            Request {
                raw: "run",
                manual: Vec::new(),
                pick: Some(vec![0]),
            },
        )?;
        b.answer(0, true)?;
        b.answer(1, true)?;
        let outcome = insert_term(&mut b, Some(&dict), request("run"))?;
        assert_eq!(
            outcome,
            Outcome::Merged {
                previous_tier: 2,
                translations: 2
            }
        );
        assert_eq!(b.find("run"), Some(0));
        Ok(())
    }

    #[test]
    fn test_manual_translations() -> Fallible<()> {
        let mut b = LeitnerBox::default();
        let outcome = insert_term(
            &mut b,
            None,
            Request {
                raw: "swim",
                manual: vec![Translation::new("schwimmen", "", "verb")],
                pick: None,
            },
        )?;
        assert_eq!(outcome, Outcome::Inserted { translations: 1 });
        Ok(())
    }

    #[test]
    fn test_bad_pick_and_blank_term() -> Fallible<()> {
        let dict = dictionary()?;
        let mut b = LeitnerBox::default();
        let bad_pick = Request {
            raw: "run",
            manual: Vec::new(),
            pick: Some(vec![5]),
        };
        assert!(insert_term(&mut b, Some(&dict), bad_pick).is_err());
        assert!(insert_term(&mut b, Some(&dict), request("   ")).is_err());
        assert!(b.is_empty());
        Ok(())
    }
}

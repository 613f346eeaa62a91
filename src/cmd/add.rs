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

use leitner_core::Translation;

use crate::collection::Collection;
use crate::dictionary::Lookup;
use crate::error::Fallible;
use crate::inserter::Outcome;
use crate::inserter::Request;
use crate::inserter::insert_term;

/// Add a term, with translations from the dictionary unless `no_lookup`.
pub fn add_term(
    collection: &mut Collection,
    term: &str,
    manual: Vec<Translation>,
    pick: Option<Vec<usize>>,
    no_lookup: bool,
) -> Fallible<String> {
    let dictionary = if no_lookup {
        None
    } else {
        Some(collection.dictionary()?)
    };
    let lookup: Option<&dyn Lookup> = dictionary.as_ref().map(|d| d as &dyn Lookup);
    let request = Request {
        raw: term,
        manual,
        pick,
    };
    let outcome = insert_term(&mut collection.leitner, lookup, request)?;
    let term = term.trim();
    let message = match outcome {
        Outcome::NotFound => {
            return Ok(format!("'{term}' was not found in the dictionary."));
        }
        Outcome::Inserted { translations } => {
            format!("Added '{term}' to tier 0 with {translations} translations.")
        }
        Outcome::Merged {
            previous_tier,
            translations,
        } => format!(
            "'{term}' was in tier {previous_tier}. It is back in tier 0 with {translations} translations."
        ),
        Outcome::AlreadyPresent { tier } => {
            return Ok(format!("'{term}' is already in tier {tier}."));
        }
    };
    collection.save()?;
    Ok(message)
}

pub fn remove_term(collection: &mut Collection, term: &str) -> Fallible<String> {
    match collection.leitner.remove(term) {
        Some(card) => {
            collection.save()?;
            Ok(format!("Removed '{}'.", card.term()))
        }
        None => Ok(format!("'{term}' is not in the box.")),
    }
}

pub fn find_term(collection: &Collection, term: &str) -> Fallible<String> {
    let Some(tier) = collection.leitner.find(term) else {
        return Ok(format!("'{term}' is not in the box."));
    };
    let mut out = format!("'{term}' is in tier {tier}.");
    if let Some(card) = collection.leitner.tier(tier)?.find(|c| c.term() == term) {
        for t in card.translations() {
            out.push_str(&format!("\n  {t}"));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_add_find_remove() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut collection = Collection::new(None, Some(dir.join("box.json")))?;
        let message = add_term(
            &mut collection,
            " house ",
            vec![Translation::new("Haus", "house", "noun")],
            None,
            true,
        )?;
        assert_eq!(message, "Added 'house' to tier 0 with 1 translations.");
        assert!(dir.join("box.json").exists());

        let found = find_term(&collection, "house")?;
        assert_eq!(found, "'house' is in tier 0.\n  Haus (house) [noun]");

        assert_eq!(remove_term(&mut collection, "house")?, "Removed 'house'.");
        assert_eq!(
            find_term(&collection, "house")?,
            "'house' is not in the box."
        );
        assert_eq!(
            remove_term(&mut collection, "house")?,
            "'house' is not in the box."
        );
        Ok(())
    }

    #[test]
    fn test_add_without_dictionary() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = dir.join("leitner.toml");
        std::fs::write(&config, "")?;
        let mut collection = Collection::new(Some(&config), None)?;
        let err = add_term(&mut collection, "house", Vec::new(), None, false)
            .err()
            .unwrap();
        assert!(err.to_string().contains("dict import"));
        assert!(!dir.join("dictionary.db").exists());
        assert!(!dir.join("box.json").exists());

        add_term(&mut collection, "house", Vec::new(), None, true)?;
        assert_eq!(collection.leitner.find("house"), Some(0));
        Ok(())
    }
}

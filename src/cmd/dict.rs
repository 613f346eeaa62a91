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

use std::path::Path;

use crate::collection::Collection;
use crate::error::Fallible;

pub fn import_words(collection: &Collection, file: &Path) -> Fallible<String> {
    let mut dictionary = collection.dictionary_or_create()?;
    let count = dictionary.import_tsv(file)?;
    let total = dictionary.entry_count()?;
    Ok(format!(
        "Imported {count} entries. The dictionary has {total} entries."
    ))
}

pub fn lookup_words(
    collection: &Collection,
    word: &str,
    like: bool,
    reverse: bool,
) -> Fallible<String> {
    let dictionary = collection.dictionary()?;
    let entries = if reverse {
        dictionary.search_translation(word, like)?
    } else {
        dictionary.search_term(word, like)?
    };
    if entries.is_empty() {
        return Ok(format!("No entries for '{word}'."));
    }
    let lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{i}. {} - {} [{}]", e.term, e.translation, e.word_type))
        .collect();
    Ok(lines.join("\n"))
}

pub fn truncate_words(collection: &Collection) -> Fallible<String> {
    collection.dictionary()?.truncate()?;
    Ok("Deleted every dictionary entry.".to_string())
}

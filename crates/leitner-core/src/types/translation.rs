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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// One translation of a term: the translated text, a gloss (usually the
/// source-language form it was looked up under), and a word type such as
/// `noun` or `verb`.
///
/// The three fields are compared as one value. Two entries are equal only if
/// every field matches exactly.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Translation {
    pub translation: String,
    pub gloss: String,
    pub word_type: String,
}

impl Translation {
    pub fn new(
        translation: impl Into<String>,
        gloss: impl Into<String>,
        word_type: impl Into<String>,
    ) -> Self {
        Self {
            translation: translation.into(),
            gloss: gloss.into(),
            word_type: word_type.into(),
        }
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.translation)?;
        if !self.gloss.is_empty() {
            write!(f, " ({})", self.gloss)?;
        }
        if !self.word_type.is_empty() {
            write!(f, " [{}]", self.word_type)?;
        }
        Ok(())
    }
}

impl From<(String, String, String)> for Translation {
    fn from((translation, gloss, word_type): (String, String, String)) -> Self {
        Self {
            translation,
            gloss,
            word_type,
        }
    }
}

impl From<Translation> for (String, String, String) {
    fn from(t: Translation) -> Self {
        (t.translation, t.gloss, t.word_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_as_triple() {
        let t = Translation::new("Haus", "house", "noun");
        let serialized = serde_json::to_string(&t).unwrap();
        assert_eq!(serialized, r#"["Haus","house","noun"]"#);
    }

    #[test]
    fn test_deserialize_from_triple() {
        let t: Translation = serde_json::from_str(r#"["laufen","run","verb"]"#).unwrap();
        assert_eq!(t, Translation::new("laufen", "run", "verb"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Translation::new("Haus", "house", "noun").to_string(),
            "Haus (house) [noun]"
        );
        assert_eq!(Translation::new("Haus", "", "").to_string(), "Haus");
    }
}

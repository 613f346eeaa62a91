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

//! Settings read from `leitner.toml`.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use leitner_core::DEFAULT_TIER_COUNT;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "leitner.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the box snapshot lives.
    pub box_path: PathBuf,
    /// The SQLite dictionary used to look up translations.
    pub dictionary_path: PathBuf,
    /// Tier count for newly created boxes.
    pub tier_count: usize,
    /// When set, a wrong answer in tier 0 puts the card back this many
    /// places from the front rather than at the back.
    pub wrong_answer_limit: Option<i64>,
    /// Directory for timestamped backups.
    pub backup_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            box_path: PathBuf::from("box.json"),
            dictionary_path: PathBuf::from("dictionary.db"),
            tier_count: DEFAULT_TIER_COUNT,
            wrong_answer_limit: None,
            backup_dir: None,
        }
    }
}

impl Config {
    /// Load the config.
    ///
    /// An explicit path must exist. Without one, `leitner.toml` in the
    /// working directory is used if present, and the defaults otherwise.
    /// Relative paths inside a config file are resolved against the file's
    /// directory.
    pub fn load(path: Option<&Path>) -> Fallible<Config> {
        let path: PathBuf = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(CONFIG_FILE_NAME);
                if !path.exists() {
                    log::debug!("No {CONFIG_FILE_NAME} found, using defaults");
                    return Ok(Config::default());
                }
                path
            }
        };
        log::debug!("Loading config from {}", path.display());
        let text = fs::read_to_string(&path)?;
        let config = Config::parse(&text)?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    pub fn parse(text: &str) -> Fallible<Config> {
        let config: Config = toml::from_str(text)?;
        if config.tier_count == 0 {
            return fail("tier_count must be greater than 0.");
        }
        if let Some(limit) = config.wrong_answer_limit {
            if limit < 0 {
                return fail("wrong_answer_limit must not be negative.");
            }
        }
        Ok(config)
    }

    fn relative_to(self, base: &Path) -> Config {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Config {
            box_path: resolve(self.box_path),
            dictionary_path: resolve(self.dictionary_path),
            backup_dir: self.backup_dir.map(resolve),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults() -> Fallible<()> {
        let config = Config::parse("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.tier_count, 5);
        Ok(())
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        let config = Config::parse(
            r#"
            box_path = "/data/box.json"
            tier_count = 7
            wrong_answer_limit = 3
            backup_dir = "/data/backups"
            "#,
        )?;
        assert_eq!(config.box_path, PathBuf::from("/data/box.json"));
        assert_eq!(config.dictionary_path, PathBuf::from("dictionary.db"));
        assert_eq!(config.tier_count, 7);
        assert_eq!(config.wrong_answer_limit, Some(3));
        assert_eq!(config.backup_dir, Some(PathBuf::from("/data/backups")));
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("tier_count = 0").is_err());
        assert!(Config::parse("wrong_answer_limit = -2").is_err());
        assert!(Config::parse("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("leitner.toml");
        fs::write(&path, "box_path = \"boxes/main.json\"\n")?;
        let config = Config::load(Some(&path))?;
        assert_eq!(config.box_path, dir.join("boxes/main.json"));
        assert_eq!(config.dictionary_path, dir.join("dictionary.db"));
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let result = Config::load(Some(&dir.join("nope.toml")));
        assert!(result.is_err());
        Ok(())
    }
}

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
use std::path::PathBuf;

use leitner_core::LeitnerBox;
use leitner_core::snapshot;

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Fallible;
use crate::error::fail;
use crate::utils::now_millis;

/// A box together with the config it was loaded under.
pub struct Collection {
    pub config: Config,
    pub leitner: LeitnerBox,
}

impl Collection {
    /// Load the config and the box it points to. A missing box file means
    /// an empty box.
    pub fn new(config_path: Option<&Path>, box_path: Option<PathBuf>) -> Fallible<Self> {
        let config = Self::load_config(config_path, box_path)?;
        let leitner = snapshot::load_or_create(&config.box_path, config.tier_count)?;
        log::debug!(
            "Loaded box from {} with {} cards",
            config.box_path.display(),
            leitner.total_volume()
        );
        Ok(Self { config, leitner })
    }

    /// Load the config alone, with the `--box` override applied. The box
    /// file is not touched.
    pub fn load_config(config_path: Option<&Path>, box_path: Option<PathBuf>) -> Fallible<Config> {
        let mut config = Config::load(config_path)?;
        if let Some(box_path) = box_path {
            config.box_path = box_path;
        }
        Ok(config)
    }

    pub fn save(&self) -> Fallible<()> {
        snapshot::store(&self.leitner.export(), &self.config.box_path)?;
        log::debug!("Saved box to {}", self.config.box_path.display());
        Ok(())
    }

    /// Write a timestamped copy of the box into the backup directory.
    pub fn backup(&self) -> Fallible<PathBuf> {
        let Some(dir) = &self.config.backup_dir else {
            return fail("no backup_dir is configured.");
        };
        let path = snapshot::store_backup(&self.leitner.export(), dir, now_millis())?;
        log::info!("Backed up box to {}", path.display());
        Ok(path)
    }

    /// Open the configured dictionary, which must already exist.
    pub fn dictionary(&self) -> Fallible<Dictionary> {
        let path = &self.config.dictionary_path;
        if !path.exists() {
            return fail(format!(
                "no dictionary at {}. Import a word list with `leitner dict import <file>`, or pass --no-lookup.",
                path.display()
            ));
        }
        Dictionary::open(path)
    }

    /// Open the configured dictionary, creating an empty one if needed.
    pub fn dictionary_or_create(&self) -> Fallible<Dictionary> {
        Dictionary::open(&self.config.dictionary_path)
    }

    /// The tier index, checked against this box.
    pub fn check_tier(&self, tier: usize) -> Fallible<usize> {
        if tier >= self.leitner.tier_count() {
            return fail(format!(
                "tier {tier} does not exist: the box has tiers 0 to {}.",
                self.leitner.tier_count() - 1
            ));
        }
        Ok(tier)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn config_in(dir: &Path, extra: &str) -> Fallible<PathBuf> {
        let path = dir.join("leitner.toml");
        fs::write(&path, format!("tier_count = 3\n{extra}"))?;
        Ok(path)
    }

    #[test]
    fn test_missing_box_is_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let collection = Collection::new(Some(&config), None)?;
        assert_eq!(collection.leitner.case_volumes(), vec![0, 0, 0]);
        assert_eq!(collection.config.box_path, dir.join("box.json"));
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let mut collection = Collection::new(Some(&config), None)?;
        collection.leitner.insert("house")?;
        collection.save()?;
        let reloaded = Collection::new(Some(&config), None)?;
        assert_eq!(reloaded.leitner.find("house"), Some(0));
        Ok(())
    }

    #[test]
    fn test_box_path_override() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let other = dir.join("other.json");
        let collection = Collection::new(Some(&config), Some(other.clone()))?;
        assert_eq!(collection.config.box_path, other);
        Ok(())
    }

    #[test]
    fn test_backup() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let collection = Collection::new(Some(&config), None)?;
        assert!(collection.backup().is_err());

        let config = config_in(&dir, "backup_dir = \"backups\"\n")?;
        let collection = Collection::new(Some(&config), None)?;
        let path = collection.backup()?;
        assert!(path.starts_with(dir.join("backups")));
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_missing_dictionary_is_not_created() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let collection = Collection::new(Some(&config), None)?;
        let err = collection.dictionary().err().unwrap();
        assert!(err.to_string().contains("--no-lookup"));
        assert!(!dir.join("dictionary.db").exists());

        collection.dictionary_or_create()?;
        assert!(dir.join("dictionary.db").exists());
        collection.dictionary()?;
        Ok(())
    }

    #[test]
    fn test_load_config_ignores_box_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        fs::write(dir.join("box.json"), "{not json")?;
        assert!(Collection::new(Some(&config), None).is_err());
        let config = Collection::load_config(Some(&config), None)?;
        assert_eq!(config.box_path, dir.join("box.json"));
        Ok(())
    }

    #[test]
    fn test_check_tier() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = config_in(&dir, "")?;
        let collection = Collection::new(Some(&config), None)?;
        assert_eq!(collection.check_tier(2)?, 2);
        assert!(collection.check_tier(3).is_err());
        Ok(())
    }
}

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

use leitner_core::LeitnerBox;
use leitner_core::snapshot;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;

/// Write an empty box to the configured box path.
///
/// The existing file is never read, so `force` also recovers from a box
/// file that no longer parses.
pub fn init_box(config: &Config, tiers: Option<usize>, force: bool) -> Fallible<String> {
    let path = &config.box_path;
    if path.exists() && !force {
        return fail(format!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        ));
    }
    let tiers = tiers.unwrap_or(config.tier_count);
    let leitner = LeitnerBox::new(tiers)?;
    snapshot::store(&leitner.export(), path)?;
    log::info!("Created an empty box at {}", path.display());
    Ok(format!(
        "Created an empty box with {tiers} tiers at {}.",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::collection::Collection;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_init_refuses_to_overwrite() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("box.json");
        let config = Collection::load_config(None, Some(path.clone()))?;
        init_box(&config, Some(7), false)?;
        assert!(path.exists());
        assert_eq!(snapshot::load(&path)?.tier_count(), 7);
        assert!(init_box(&config, None, false).is_err());
        init_box(&config, Some(2), true)?;
        let reloaded = Collection::new(None, Some(path))?;
        assert_eq!(reloaded.leitner.tier_count(), 2);
        Ok(())
    }

    #[test]
    fn test_force_replaces_unreadable_box() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("box.json");
        fs::write(&path, "{not json")?;
        assert!(Collection::new(None, Some(path.clone())).is_err());

        let config = Collection::load_config(None, Some(path.clone()))?;
        assert!(init_box(&config, Some(5), false).is_err());
        init_box(&config, Some(5), true)?;
        let reloaded = Collection::new(None, Some(path))?;
        assert_eq!(reloaded.leitner.case_volumes(), vec![0, 0, 0, 0, 0]);
        Ok(())
    }
}

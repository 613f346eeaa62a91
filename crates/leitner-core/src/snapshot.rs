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

//! Snapshots of a box, and reading and writing them as JSON files.

use std::collections::HashSet;
use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::BoxError;
use crate::error::BoxResult;
use crate::leitner::LeitnerBox;
use crate::types::card::VocabularyCard;

/// The full state of a box: its tier count, and for every tier its cards
/// front first, each with its translations in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub tier_count: usize,
    pub tiers: Vec<Vec<VocabularyCard>>,
}

impl Snapshot {
    pub fn to_json(&self) -> BoxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> BoxResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl LeitnerBox {
    pub fn export(&self) -> Snapshot {
        let tiers = self
            .raw_tiers()
            .iter()
            .map(|tier| tier.iter().cloned().collect())
            .collect();
        Snapshot {
            tier_count: self.tier_count(),
            tiers,
        }
    }

    /// Rebuild a box from a snapshot.
    ///
    /// Snapshots come from outside the process, so they are checked against
    /// the same invariants a box maintains.
    pub fn import(snapshot: Snapshot) -> BoxResult<Self> {
        let Snapshot { tier_count, tiers } = snapshot;
        if tier_count == 0 {
            return Err(BoxError::invalid("snapshot has no tiers"));
        }
        if tiers.len() != tier_count {
            return Err(BoxError::invalid(format!(
                "snapshot declares {tier_count} tiers but holds {}",
                tiers.len()
            )));
        }
        let mut seen: HashSet<String> = HashSet::new();
        for card in tiers.iter().flatten() {
            if card.term().trim().is_empty() {
                return Err(BoxError::invalid("snapshot holds a card with a blank term"));
            }
            if !seen.insert(card.term().to_string()) {
                return Err(BoxError::invalid(format!(
                    "snapshot holds the term '{}' more than once",
                    card.term()
                )));
            }
            if card.has_duplicate_translations() {
                return Err(BoxError::invalid(format!(
                    "snapshot card '{}' holds a translation more than once",
                    card.term()
                )));
            }
        }
        let tiers = tiers.into_iter().map(VecDeque::from).collect();
        Ok(LeitnerBox::from_tiers(tiers))
    }
}

/// Read a box from a snapshot file.
pub fn load(path: &Path) -> BoxResult<LeitnerBox> {
    let text = fs::read_to_string(path)?;
    LeitnerBox::import(Snapshot::from_json(&text)?)
}

/// Read a box from a snapshot file, or create an empty box with
/// `tier_count` tiers if the file does not exist.
pub fn load_or_create(path: &Path, tier_count: usize) -> BoxResult<LeitnerBox> {
    match fs::read_to_string(path) {
        Ok(text) => LeitnerBox::import(Snapshot::from_json(&text)?),
        Err(e) if e.kind() == ErrorKind::NotFound => LeitnerBox::new(tier_count),
        Err(e) => Err(e.into()),
    }
}

/// Write a snapshot to a file.
///
/// The snapshot goes to a sibling temporary file first, which is then
/// renamed over the target, so an interrupted write leaves the previous
/// file intact.
pub fn store(snapshot: &Snapshot, path: &Path) -> BoxResult<()> {
    let json = snapshot.to_json()?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Write a snapshot into `dir` under a name derived from `stamp_millis`,
/// creating the directory if needed. Returns the path written.
pub fn store_backup(snapshot: &Snapshot, dir: &Path, stamp_millis: i64) -> BoxResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("backup-{stamp_millis}.json"));
    store(snapshot, &path)?;
    Ok(path)
}

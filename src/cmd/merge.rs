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

use leitner_core::snapshot;

use crate::collection::Collection;
use crate::error::Fallible;

/// Merge the box at `other` into the collection's box.
///
/// With `output`, the merged box is written there and the collection's own
/// file is left alone.
pub fn merge_boxes(
    collection: &mut Collection,
    other: &Path,
    output: Option<&Path>,
) -> Fallible<String> {
    let theirs = snapshot::load(other)?;
    let merged = collection.leitner.merge(&theirs);
    let total = merged.total_volume();
    let message = match output {
        Some(output) => {
            snapshot::store(&merged.export(), output)?;
            format!("Wrote {total} cards to {}.", output.display())
        }
        None => {
            collection.leitner = merged;
            collection.save()?;
            format!(
                "Merged {} into {}: {total} cards.",
                other.display(),
                collection.config.box_path.display()
            )
        }
    };
    log::info!("{message}");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use leitner_core::LeitnerBox;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_merge_into_output() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut theirs = LeitnerBox::new(3)?;
        theirs.insert("tree")?;
        theirs.insert("house")?;
        theirs.answer(0, true)?;
        let other = dir.join("other.json");
        snapshot::store(&theirs.export(), &other)?;

        let mut collection = Collection::new(None, Some(dir.join("box.json")))?;
        collection.leitner = LeitnerBox::new(3)?;
        collection.leitner.insert("house")?;

        let output = dir.join("merged.json");
        merge_boxes(&mut collection, &other, Some(&output))?;
        assert!(!dir.join("box.json").exists());
        let merged = snapshot::load(&output)?;
        assert_eq!(merged.find("house"), Some(0));
        assert_eq!(merged.find("tree"), Some(1));

        merge_boxes(&mut collection, &other, None)?;
        assert_eq!(collection.leitner.total_volume(), 2);
        assert!(dir.join("box.json").exists());
        Ok(())
    }
}

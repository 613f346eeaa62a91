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

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// One line per tier.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct Stats {
    tier_count: usize,
    case_volumes: Vec<usize>,
    total_volume: usize,
}

pub fn print_stats(collection: &Collection, format: StatsFormat) -> Fallible<String> {
    let stats = Stats {
        tier_count: collection.leitner.tier_count(),
        case_volumes: collection.leitner.case_volumes(),
        total_volume: collection.leitner.total_volume(),
    };
    match format {
        StatsFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
        StatsFormat::Text => {
            let mut lines: Vec<String> = stats
                .case_volumes
                .iter()
                .enumerate()
                .map(|(tier, count)| format!("tier {tier}: {count}"))
                .collect();
            lines.push(format!("total: {}", stats.total_volume));
            Ok(lines.join("\n"))
        }
    }
}

/// List a tier front to back, one card per line.
pub fn show_tier(collection: &Collection, tier: usize) -> Fallible<String> {
    let tier = collection.check_tier(tier)?;
    let lines: Vec<String> = collection
        .leitner
        .tier(tier)?
        .enumerate()
        .map(|(pos, card)| {
            let translations: Vec<String> =
                card.translations().iter().map(|t| t.to_string()).collect();
            if translations.is_empty() {
                format!("{pos}. {}", card.term())
            } else {
                format!("{pos}. {}: {}", card.term(), translations.join("; "))
            }
        })
        .collect();
    if lines.is_empty() {
        return Ok(format!("Tier {tier} is empty."));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use leitner_core::LeitnerBox;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_stats_and_show() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut collection = Collection::new(None, Some(dir.join("box.json")))?;
        collection.leitner = LeitnerBox::new(2)?;
        collection.leitner.insert("house")?;
        collection.leitner.insert("tree")?;
        collection.leitner.answer(0, true)?;

        assert_eq!(
            print_stats(&collection, StatsFormat::Text)?,
            "tier 0: 1\ntier 1: 1\ntotal: 2"
        );
        let json: serde_json::Value =
            serde_json::from_str(&print_stats(&collection, StatsFormat::Json)?)?;
        assert_eq!(json["case_volumes"], serde_json::json!([1, 1]));

        assert_eq!(show_tier(&collection, 0)?, "0. tree");
        assert!(show_tier(&collection, 2).is_err());
        Ok(())
    }
}

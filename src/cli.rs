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

use std::path::PathBuf;
use std::process::exit;

use chrono::Local;
use clap::Parser;
use clap::Subcommand;
use clap::builder::RangedU64ValueParser;
use leitner_core::Translation;
use tokio::spawn;

use crate::cmd::add::add_term;
use crate::cmd::add::find_term;
use crate::cmd::add::remove_term;
use crate::cmd::answer::answer_card;
use crate::cmd::answer::shuffle_tier;
use crate::cmd::dict::import_words;
use crate::cmd::dict::lookup_words;
use crate::cmd::dict::truncate_words;
use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::init::init_box;
use crate::cmd::merge::merge_boxes;
use crate::cmd::show::StatsFormat;
use crate::cmd::show::print_stats;
use crate::cmd::show::show_tier;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the config file. By default, `leitner.toml` in the current working directory is used if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the box file. Overrides the config file.
    #[arg(long = "box", global = true)]
    box_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty box.
    Init {
        /// Number of tiers. By default, the configured tier count is used.
        #[arg(long)]
        tiers: Option<usize>,
        /// Overwrite an existing box file.
        #[arg(long)]
        force: bool,
    },
    /// Add a term to tier 0, or move a known term back there.
    Add {
        term: String,
        /// A translation to add, as `translation|gloss|word type`. Gloss and word type are optional.
        #[arg(long = "translation", value_parser = parse_translation)]
        translations: Vec<Translation>,
        /// Keep only these dictionary suggestions, by index (see `dict lookup --like`).
        #[arg(long, value_delimiter = ',')]
        pick: Option<Vec<usize>>,
        /// Do not consult the dictionary.
        #[arg(long)]
        no_lookup: bool,
    },
    /// Remove a term from the box.
    Remove { term: String },
    /// Print the tier a term is in, with its translations.
    Find { term: String },
    /// List the cards of a tier, front first.
    Show { tier: usize },
    /// Print the number of cards in each tier.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Answer the front card of a tier.
    Answer {
        tier: usize,
        /// The card was recalled.
        #[arg(long, conflicts_with = "wrong")]
        correct: bool,
        /// The card was not recalled.
        #[arg(long)]
        wrong: bool,
    },
    /// Randomly reorder a tier.
    Shuffle {
        tier: usize,
        /// Seed for a reproducible order.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Merge another box file into this box.
    Merge {
        other: PathBuf,
        /// Write the merged box here instead of replacing this box.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a timestamped copy of the box to the backup directory.
    Backup,
    /// Commands relating to the translation dictionary.
    Dict {
        #[command(subcommand)]
        command: DictCommand,
    },
    /// Drill a tier through a web interface.
    Drill {
        /// The tier to drill. Default is 0.
        #[arg(long, default_value_t = 0)]
        tier: usize,
        /// Maximum number of answers in a session. By default, every card in the tier is drilled once.
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        card_limit: Option<usize>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Whether to shuffle the tier before drilling. Default is true.
        #[arg(long)]
        shuffle: Option<bool>,
    },
}

#[derive(Subcommand)]
enum DictCommand {
    /// Import a tab-separated word list.
    Import { file: PathBuf },
    /// Look up a word.
    Lookup {
        word: String,
        /// Match any entry containing the word.
        #[arg(long)]
        like: bool,
        /// Search translations instead of terms.
        #[arg(long)]
        reverse: bool,
    },
    /// Delete every entry.
    Truncate,
}

fn parse_translation(s: &str) -> Result<Translation, String> {
    let mut parts = s.splitn(3, '|').map(str::trim);
    let translation = parts.next().unwrap_or("");
    if translation.is_empty() {
        return Err("the translation must not be blank".to_string());
    }
    let gloss = parts.next().unwrap_or("");
    let word_type = parts.next().unwrap_or("");
    Ok(Translation::new(translation, gloss, word_type))
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let Cli {
        config,
        box_path,
        command,
    } = cli;
    if let Command::Drill {
        tier,
        card_limit,
        host,
        port,
        open_browser,
        shuffle,
    } = command
    {
        if open_browser.unwrap_or(true) {
            // Start a separate task to open the browser once the server is up.
            let browser_host = host.clone();
            spawn(async move {
                match wait_for_server(&browser_host, port).await {
                    Ok(_) => {
                        let _ = open::that(format!("http://{browser_host}:{port}/"));
                    }
                    Err(e) => {
                        eprintln!("Failed to connect to server: {e}");
                        exit(-1)
                    }
                }
            });
        }
        let config = ServerConfig {
            config_path: config,
            box_path,
            tier,
            host,
            port,
            session_started_at: Local::now(),
            card_limit,
            shuffle: shuffle.unwrap_or(true),
        };
        return start_server(config).await;
    }

    // The box file may be unreadable here, so init only loads the config.
    if let Command::Init { tiers, force } = command {
        let config = Collection::load_config(config.as_deref(), box_path)?;
        println!("{}", init_box(&config, tiers, force)?);
        return Ok(());
    }

    let mut collection = Collection::new(config.as_deref(), box_path)?;
    let output = match command {
        Command::Add {
            term,
            translations,
            pick,
            no_lookup,
        } => add_term(&mut collection, &term, translations, pick, no_lookup)?,
        Command::Remove { term } => remove_term(&mut collection, &term)?,
        Command::Find { term } => find_term(&collection, &term)?,
        Command::Show { tier } => show_tier(&collection, tier)?,
        Command::Stats { format } => print_stats(&collection, format)?,
        Command::Answer {
            tier,
            correct,
            wrong,
        } => {
            if correct == wrong {
                return fail("pass exactly one of --correct and --wrong.");
            }
            answer_card(&mut collection, tier, correct)?
        }
        Command::Shuffle { tier, seed } => shuffle_tier(&mut collection, tier, seed)?,
        Command::Merge { other, output } => {
            merge_boxes(&mut collection, &other, output.as_deref())?
        }
        Command::Backup => {
            let path = collection.backup()?;
            format!("Wrote {}.", path.display())
        }
        Command::Dict { command } => match command {
            DictCommand::Import { file } => import_words(&collection, &file)?,
            DictCommand::Lookup {
                word,
                like,
                reverse,
            } => lookup_words(&collection, &word, like, reverse)?,
            DictCommand::Truncate => truncate_words(&collection)?,
        },
        Command::Init { .. } | Command::Drill { .. } => {
            unreachable!("init and drill are handled above")
        }
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_translation() {
        assert_eq!(
            parse_translation("Haus|house|noun"),
            Ok(Translation::new("Haus", "house", "noun"))
        );
        assert_eq!(
            parse_translation("Haus"),
            Ok(Translation::new("Haus", "", ""))
        );
        assert!(parse_translation(" |x").is_err());
    }

    #[test]
    fn test_card_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["leitner", "drill", "--card-limit", "0"]).is_err());
        let cli = Cli::try_parse_from(["leitner", "drill", "--card-limit", "3"]).unwrap();
        match cli.command {
            Command::Drill { card_limit, .. } => assert_eq!(card_limit, Some(3)),
            _ => panic!("expected drill"),
        }
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "leitner",
            "--box",
            "b.json",
            "add",
            "house",
            "--translation",
            "Haus|house|noun",
            "--pick",
            "0,2",
        ])
        .unwrap();
        assert_eq!(cli.box_path, Some(PathBuf::from("b.json")));
        match cli.command {
            Command::Add {
                term,
                translations,
                pick,
                no_lookup,
            } => {
                assert_eq!(term, "house");
                assert_eq!(translations.len(), 1);
                assert_eq!(pick, Some(vec![0, 2]));
                assert!(!no_lookup);
            }
            _ => panic!("expected add"),
        }
    }
}

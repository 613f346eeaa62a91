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

//! The translation dictionary: an SQLite table of (term, translation, word
//! type) rows that new cards get their translations from.

use std::fs;
use std::path::Path;

use leitner_core::Translation;
use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::params;

use crate::error::Fallible;

/// The word type given to imported rows that do not name one.
const DEFAULT_WORD_TYPE: &str = "other";

/// Something that can suggest translations for a term.
pub trait Lookup {
    fn lookup(&self, term: &str) -> Fallible<Vec<Translation>>;
}

/// One dictionary row.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub term: String,
    pub translation: String,
    pub word_type: String,
}

impl Entry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Entry {
            term: row.get("term")?,
            translation: row.get("translation")?,
            word_type: row.get("word_type")?,
        })
    }
}

impl From<Entry> for Translation {
    /// The dictionary term becomes the gloss, since a fuzzy lookup may match
    /// a term other than the one asked for.
    fn from(entry: Entry) -> Self {
        Translation::new(entry.translation, entry.term, entry.word_type)
    }
}

pub struct Dictionary {
    conn: Connection,
}

impl Dictionary {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening dictionary at {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Fallible<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        let dict = Self { conn };
        dict.create_table()?;
        Ok(dict)
    }

    fn create_table(&self) -> Fallible<()> {
        self.conn.execute_batch(
            "create table if not exists entries (
                id integer primary key autoincrement not null,
                term text not null,
                translation text not null,
                word_type text not null
            );
            create index if not exists entries_term on entries (term);",
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn insert_entry(&self, term: &str, translation: &str, word_type: &str) -> Fallible<bool> {
        let changed = self.conn.execute(
            "insert into entries (term, translation, word_type) values (?1, ?2, ?3)",
            params![term, translation, word_type],
        )?;
        Ok(changed == 1)
    }

    /// Import a tab-separated word list, returning the number of rows added.
    ///
    /// Each line is `term<TAB>translation[<TAB>word type]`. Blank lines,
    /// lines starting with `#`, and lines without a translation are skipped.
    /// The whole file is imported in one transaction.
    pub fn import_tsv(&mut self, path: &Path) -> Fallible<usize> {
        let text = fs::read_to_string(path)?;
        let tx = self.conn.transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                "insert into entries (term, translation, word_type) values (?1, ?2, ?3)",
            )?;
            for (term, translation, word_type) in text.lines().filter_map(parse_tsv_line) {
                count += stmt.execute(params![term, translation, word_type])?;
            }
        }
        tx.commit()?;
        log::info!("Imported {count} entries from {}", path.display());
        Ok(count)
    }

    /// Find rows by term. With `like`, any term containing `term` matches.
    pub fn search_term(&self, term: &str, like: bool) -> Fallible<Vec<Entry>> {
        self.search("term", term, like)
    }

    /// Find rows by translation, for looking words up in reverse.
    pub fn search_translation(&self, translation: &str, like: bool) -> Fallible<Vec<Entry>> {
        self.search("translation", translation, like)
    }

    fn search(&self, column: &str, needle: &str, like: bool) -> Fallible<Vec<Entry>> {
        let condition = if like {
            "like '%' || ?1 || '%'"
        } else {
            "= ?1"
        };
        let sql = format!(
            "select term, translation, word_type from entries where {column} {condition} order by id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![needle], Entry::from_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Delete every row.
    pub fn truncate(&self) -> Fallible<()> {
        self.conn.execute("delete from entries", [])?;
        Ok(())
    }

    pub fn entry_count(&self) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row("select count(*) from entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl Lookup for Dictionary {
    fn lookup(&self, term: &str) -> Fallible<Vec<Translation>> {
        let entries = self.search_term(term, true)?;
        Ok(entries.into_iter().map(Translation::from).collect())
    }
}

fn parse_tsv_line(line: &str) -> Option<(&str, &str, &str)> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut fields = line.split('\t').filter(|f| !f.is_empty());
    let term = fields.next()?;
    let translation = fields.next()?;
    let word_type = fields.next().unwrap_or(DEFAULT_WORD_TYPE);
    Some((term, translation, word_type))
}

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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// Errors raised by operations on a box, its cards, and its snapshots.
#[derive(Debug, PartialEq)]
pub enum BoxError {
    /// A precondition on an argument was violated: a blank term, a zero tier
    /// count, a negative limit, or a merge between cards with different terms.
    InvalidArgument(String),
    /// A tier index outside `[0, tier_count)`.
    OutOfRange { index: usize, tier_count: usize },
    /// The tier has no card to answer.
    EmptyTier(usize),
    /// Reading or writing a snapshot failed.
    Persistence(String),
    /// A thread panicked while holding the lock on a shared box.
    LockPoisoned,
}

impl BoxError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        BoxError::InvalidArgument(msg.into())
    }
}

impl Display for BoxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            BoxError::OutOfRange { index, tier_count } => write!(
                f,
                "tier {index} is out of range: must be between 0 and {}",
                tier_count.saturating_sub(1)
            ),
            BoxError::EmptyTier(index) => write!(f, "tier {index} is empty"),
            BoxError::Persistence(msg) => write!(f, "persistence error: {msg}"),
            BoxError::LockPoisoned => write!(f, "the box lock is poisoned"),
        }
    }
}

impl Error for BoxError {}

impl From<std::io::Error> for BoxError {
    fn from(value: std::io::Error) -> Self {
        BoxError::Persistence(format!("I/O error: {value}"))
    }
}

impl From<serde_json::Error> for BoxError {
    fn from(value: serde_json::Error) -> Self {
        BoxError::Persistence(format!("JSON error: {value}"))
    }
}

pub type BoxResult<T> = Result<T, BoxError>;

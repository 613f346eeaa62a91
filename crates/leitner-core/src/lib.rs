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

//! leitner-core: Core library for the leitner vocabulary trainer.
//!
//! This library provides the in-memory model of a Leitner box:
//! - Vocabulary cards keyed by their term, carrying translations
//! - The tiered box and its state transitions
//! - Snapshots for persisting and restoring a box
//! - A mutex-guarded handle for sharing a box between callers

pub mod error;
pub mod leitner;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod types;

// Re-exports for convenience
pub use error::{BoxError, BoxResult};
pub use leitner::{DEFAULT_TIER_COUNT, LeitnerBox};
pub use rng::TinyRng;
pub use shared::SharedBox;
pub use snapshot::Snapshot;
pub use types::card::VocabularyCard;
pub use types::translation::Translation;

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
use std::sync::Arc;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::Local;
use leitner_core::SharedBox;
use tokio::sync::oneshot::Sender;

#[derive(Clone)]
pub struct ServerState {
    /// The tier being drilled.
    pub tier: usize,
    pub box_path: PathBuf,
    pub wrong_answer_limit: Option<i64>,
    /// How many answers end the session.
    pub session_length: usize,
    pub session_started_at: DateTime<Local>,
    pub shared: SharedBox,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub reveal: bool,
    pub reviews: Vec<Review>,
    pub finished_at: Option<DateTime<Local>>,
}

pub struct Review {
    pub term: String,
    pub correct: bool,
    /// The tier the card moved to.
    pub tier: usize,
}

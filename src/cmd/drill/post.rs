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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use chrono::Local;
use leitner_core::TinyRng;
use leitner_core::snapshot;
use serde::Deserialize;

use crate::cmd::answer::answer_front;
use crate::cmd::drill::state::Review;
use crate::cmd::drill::state::ServerState;
use crate::error::ErrorReport;
use crate::error::Fallible;

#[derive(Deserialize)]
pub struct FormData {
    action: String,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    if let Err(e) = action_handler(&state, &form.action) {
        log::error!("Failed to handle action {}: {e}", form.action);
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, action: &str) -> Fallible<()> {
    let mut mutable = state
        .mutable
        .lock()
        .map_err(|_| ErrorReport::new("session state lock is poisoned"))?;
    match action {
        "Shutdown" => {
            let tx = state
                .shutdown_tx
                .lock()
                .map_err(|_| ErrorReport::new("shutdown lock is poisoned"))?
                .take();
            if let Some(tx) = tx {
                let _ = tx.send(());
            }
        }
        _ if mutable.finished_at.is_some() => {
            log::debug!("Ignoring {action}: the session is over");
        }
        "Reveal" => {
            mutable.reveal = true;
        }
        "Correct" | "Wrong" => {
            let correct = action == "Correct";
            let tier = state.tier;
            let limit = state.wrong_answer_limit;
            let answered = state
                .shared
                .with_mut(|b| answer_front(b, tier, correct, limit))??;
            log::debug!("'{}' moved to tier {}", answered.term, answered.tier);
            mutable.reviews.push(Review {
                term: answered.term,
                correct,
                tier: answered.tier,
            });
            mutable.reveal = false;
            // Export under the box lock, write after releasing it.
            let snapshot = state.shared.snapshot()?;
            snapshot::store(&snapshot, &state.box_path)?;
            let remaining = state.shared.with(|b| b.case_volumes()[tier])?;
            if mutable.reviews.len() >= state.session_length || remaining == 0 {
                mutable.finished_at = Some(Local::now());
            }
        }
        "Shuffle" => {
            let tier = state.tier;
            state
                .shared
                .with_mut(|b| b.shuffle(tier, &mut TinyRng::from_clock()))??;
            mutable.reveal = false;
            let snapshot = state.shared.snapshot()?;
            snapshot::store(&snapshot, &state.box_path)?;
        }
        "End" => {
            mutable.finished_at = Some(Local::now());
        }
        _ => {
            log::warn!("Unknown action: {action}");
        }
    }
    Ok(())
}

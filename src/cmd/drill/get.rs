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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::action_buttons;
use crate::cmd::drill::template::page_template;
use crate::error::ErrorReport;
use crate::error::Fallible;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    match render_page(&state) {
        Ok(markup) => (StatusCode::OK, Html(markup.into_string())),
        Err(e) => {
            log::error!("Failed to render page: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            )
        }
    }
}

fn render_page(state: &ServerState) -> Fallible<Markup> {
    let mutable = state
        .mutable
        .lock()
        .map_err(|_| ErrorReport::new("session state lock is poisoned"))?;
    let body = if mutable.finished_at.is_some() {
        render_completion(state, &mutable)
    } else {
        render_session(state, &mutable)?
    };
    Ok(page_template(body))
}

fn render_session(state: &ServerState, mutable: &MutableState) -> Fallible<Markup> {
    let tier = state.tier;
    let card = state
        .shared
        .with(|b| b.peek_front(tier).ok().flatten().cloned())?;
    let Some(card) = card else {
        return Ok(html! { p { "Tier " (tier) " is empty." } });
    };
    let done = mutable.reviews.len();
    let body = html! {
        div.header {
            span.tier { "Tier " (tier) }
            span.progress { (done) " / " (state.session_length) }
        }
        div.card {
            div.front { (card.term()) }
            @if mutable.reveal {
                ul.back {
                    @for t in card.translations() {
                        li { (t.to_string()) }
                    }
                    @if card.translations().is_empty() {
                        li.none { "No translations." }
                    }
                }
            }
        }
        @if mutable.reveal {
            (action_buttons(&["Wrong", "Correct"]))
        } @else {
            (action_buttons(&["Reveal"]))
        }
        (action_buttons(&["Shuffle", "End"]))
    };
    Ok(body)
}

fn render_completion(state: &ServerState, mutable: &MutableState) -> Markup {
    let total = mutable.reviews.len();
    let correct = mutable.reviews.iter().filter(|r| r.correct).count();
    let seconds = mutable
        .finished_at
        .map(|end| (end - state.session_started_at).num_seconds())
        .unwrap_or(0);
    html! {
        div.finished {
            h1 { "Session Completed" }
            p { (correct) " of " (total) " answers correct in " (seconds) " seconds." }
            table.reviews {
                @for review in &mutable.reviews {
                    tr {
                        td { (review.term) }
                        td { @if review.correct { "correct" } @else { "wrong" } }
                        td { "tier " (review.tier) }
                    }
                }
            }
            (action_buttons(&["Shutdown"]))
        }
    }
}

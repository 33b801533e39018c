//! JSON interface over the game session

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use chess_duel_core::{ClickResult, Color, GameSession, Move, Piece, Square, Status};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<Option<Piece>>>,
    pub human: Color,
    pub current_player: Color,
    pub selected: Option<Square>,
    pub valid_moves: Vec<Square>,
    pub status: Status,
    pub status_text: String,
    pub notice: Option<String>,
}

impl GameSnapshot {
    pub fn of(session: &GameSession) -> Self {
        let status = session.current_status();
        Self {
            board: session.board().rows().iter().map(|r| r.to_vec()).collect(),
            human: session.config().human,
            current_player: session.current_player(),
            selected: session.selected(),
            valid_moves: session.valid_moves().to_vec(),
            status,
            status_text: status.to_string(),
            notice: session.notice().map(|n| n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub valid_moves: Vec<Square>,
    pub game: GameSnapshot,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub applied: bool,
    pub game: GameSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ClickOutcome {
    Selected { valid_moves: Vec<Square> },
    Moved { from: Square, to: Square },
    Cleared,
    Ignored,
}

impl From<ClickResult> for ClickOutcome {
    fn from(result: ClickResult) -> Self {
        match result {
            ClickResult::Selected(valid_moves) => ClickOutcome::Selected { valid_moves },
            ClickResult::Moved(Move { from, to }) => ClickOutcome::Moved { from, to },
            ClickResult::Cleared => ClickOutcome::Cleared,
            ClickResult::Ignored => ClickOutcome::Ignored,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    #[serde(flatten)]
    pub outcome: ClickOutcome,
    pub game: GameSnapshot,
}

/// Fires the session's timers after `delay`, then re-arms for whatever is
/// still pending. Wakeups that find nothing due do nothing.
pub fn schedule_wakeup(state: &Arc<AppState>, delay: Option<Duration>) {
    let Some(delay) = delay else {
        return;
    };
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let next = {
            let mut session = state.session();
            for event in session.poll() {
                info!(?event, "session event");
            }
            session.next_wakeup()
        };
        schedule_wakeup(&state, next);
    });
}

pub async fn state(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    let mut session = state.session();
    session.poll();
    Json(GameSnapshot::of(&session))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Json(square): Json<Square>,
) -> Json<SelectResponse> {
    let mut session = state.session();
    let valid_moves = session.select_square(square);
    debug!(%square, count = valid_moves.len(), "select");
    Json(SelectResponse {
        valid_moves,
        game: GameSnapshot::of(&session),
    })
}

pub async fn attempt_move(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveRequest>,
) -> Json<MoveResponse> {
    let (applied, game, wakeup) = {
        let mut session = state.session();
        let applied = session.attempt_move(req.from, req.to);
        (applied, GameSnapshot::of(&session), session.next_wakeup())
    };
    if applied {
        schedule_wakeup(&state, wakeup);
    }
    Json(MoveResponse { applied, game })
}

pub async fn click(
    State(state): State<Arc<AppState>>,
    Json(square): Json<Square>,
) -> Json<ClickResponse> {
    let (result, game, wakeup) = {
        let mut session = state.session();
        let result = session.click(square);
        (result, GameSnapshot::of(&session), session.next_wakeup())
    };
    if matches!(result, ClickResult::Moved(_)) {
        schedule_wakeup(&state, wakeup);
    }
    Json(ClickResponse {
        outcome: result.into(),
        game,
    })
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<GameSnapshot> {
    let (game, wakeup) = {
        let mut session = state.session();
        session.reset();
        (GameSnapshot::of(&session), session.next_wakeup())
    };
    schedule_wakeup(&state, wakeup);
    Json(game)
}

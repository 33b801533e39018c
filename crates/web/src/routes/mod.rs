use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use tracing::error;

use chess_duel_core::{Board, GameSession, Square, Status};

use crate::AppState;

pub mod api;

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub status: String,
    pub notice: Option<String>,
    pub thinking: bool,
    pub rows: Vec<Vec<CellView>>,
}

pub struct CellView {
    pub row: u8,
    pub col: u8,
    pub shade: &'static str,
    pub symbol: String,
    pub selected: bool,
    pub target: bool,
}

/// Cell views for the board page, row 0 first.
pub fn board_rows(board: &Board, selected: Option<Square>, targets: &[Square]) -> Vec<Vec<CellView>> {
    (0..8u8)
        .map(|row| {
            (0..8u8)
                .map(|col| {
                    let square = Square { row, col };
                    CellView {
                        row,
                        col,
                        shade: if square.is_light() { "light" } else { "dark" },
                        symbol: board
                            .get(square)
                            .map(|p| p.symbol().to_string())
                            .unwrap_or_default(),
                        selected: selected == Some(square),
                        target: targets.contains(&square),
                    }
                })
                .collect()
        })
        .collect()
}

fn render_board(session: &GameSession) -> BoardTemplate {
    BoardTemplate {
        title: "Chess Duel".to_string(),
        status: session.current_status().to_string(),
        notice: session.notice().map(|n| n.to_string()),
        thinking: session.current_status() == Status::ComputerThinking,
        rows: board_rows(session.board(), session.selected(), session.valid_moves()),
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let template = render_board(&state.session());
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render board: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}

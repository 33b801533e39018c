//! Interactive game session: human input, automated replies, game state

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

use super::clock::{Clock, SystemClock, Timer};
use crate::board::{Board, Color, Move, Square};
use crate::config::GameConfig;
use crate::opponent::{select_move, Selection};
use crate::rules::{game_outcome, is_king_in_check, legal_moves, Outcome};

/// What the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Status {
    AwaitingHuman,
    AwaitingHumanInCheck,
    ComputerThinking,
    GameOver { outcome: Outcome },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::AwaitingHuman => write!(f, "Your move"),
            Status::AwaitingHumanInCheck => write!(f, "Your move - your king is in check"),
            Status::ComputerThinking => write!(f, "Computer is thinking..."),
            Status::GameOver {
                outcome: Outcome::Checkmate { winner },
            } => write!(f, "Checkmate - {} wins", winner),
            Status::GameOver {
                outcome: Outcome::Stalemate,
            } => write!(f, "Stalemate - draw"),
        }
    }
}

/// Transient warning that a king is attacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckNotice {
    pub king: Color,
}

impl fmt::Display for CheckNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} king is in check!", self.king)
    }
}

/// Result of a single board click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickResult {
    Selected(Vec<Square>),
    Moved(Move),
    Cleared,
    Ignored,
}

/// Something that happened during [`GameSession::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ComputerMoved(Selection),
    GameOver(Outcome),
    NoticeDismissed,
}

pub struct GameSession {
    board: Board,
    config: GameConfig,
    current_player: Color,
    selected: Option<Square>,
    valid_moves: Vec<Square>,
    outcome: Option<Outcome>,
    in_check: bool,
    /// Armed while the automated reply is pending; doubles as the input latch
    reply_timer: Timer,
    notice: Option<CheckNotice>,
    notice_timer: Timer,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_parts(
            Board::standard(),
            config,
            Arc::new(SystemClock),
            StdRng::from_os_rng(),
        )
    }

    /// Starts from an arbitrary position with white to move.
    pub fn with_parts(board: Board, config: GameConfig, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let mut session = Self {
            board,
            config,
            current_player: Color::White,
            selected: None,
            valid_moves: Vec::new(),
            outcome: None,
            in_check: false,
            reply_timer: Timer::default(),
            notice: None,
            notice_timer: Timer::default(),
            clock,
            rng,
        };
        session.start_turn();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn is_computer_thinking(&self) -> bool {
        self.reply_timer.is_armed()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the side to move is in check
    pub fn is_check(&self) -> bool {
        self.in_check
    }

    pub fn notice(&self) -> Option<CheckNotice> {
        self.notice
    }

    pub fn current_status(&self) -> Status {
        if let Some(outcome) = self.outcome {
            Status::GameOver { outcome }
        } else if self.is_computer_thinking() {
            Status::ComputerThinking
        } else if self.in_check {
            Status::AwaitingHumanInCheck
        } else {
            Status::AwaitingHuman
        }
    }

    /// Legal destinations if `square` holds one of the human's pieces.
    ///
    /// Anything else clears the selection and yields nothing.
    pub fn select_square(&mut self, square: Square) -> Vec<Square> {
        if !self.accepts_input() {
            self.clear_selection();
            return Vec::new();
        }

        match self.board.get(square) {
            Some(piece) if piece.color == self.config.human => {
                self.selected = Some(square);
                self.valid_moves = legal_moves(&mut self.board, square);
                self.valid_moves.clone()
            }
            _ => {
                self.clear_selection();
                Vec::new()
            }
        }
    }

    /// Plays `from -> to` if it was offered by the last selection.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        let offered = self.selected == Some(from) && self.valid_moves.contains(&to);
        self.clear_selection();
        if !offered || !self.accepts_input() {
            return false;
        }

        self.play(Move::new(from, to));
        true
    }

    /// Select-then-move interaction driven by single clicks.
    pub fn click(&mut self, square: Square) -> ClickResult {
        if !self.accepts_input() {
            return ClickResult::Ignored;
        }

        match self.selected {
            Some(from) => {
                if self.attempt_move(from, square) {
                    ClickResult::Moved(Move::new(from, square))
                } else {
                    ClickResult::Cleared
                }
            }
            None => {
                let moves = self.select_square(square);
                if self.selected.is_some() {
                    ClickResult::Selected(moves)
                } else {
                    ClickResult::Cleared
                }
            }
        }
    }

    /// Fires whichever timers are due.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.notice_timer.fire_if_due(now) {
            trace!("check notice dismissed");
            self.notice = None;
            events.push(SessionEvent::NoticeDismissed);
        }

        if self.reply_timer.fire_if_due(now) {
            trace!("reply timer fired");
            if let Some(selection) = self.play_computer_move() {
                events.push(SessionEvent::ComputerMoved(selection));
            }
            if let Some(outcome) = self.outcome {
                events.push(SessionEvent::GameOver(outcome));
            }
        }

        events
    }

    /// Time until the next pending timer, if any.
    pub fn next_wakeup(&self) -> Option<Duration> {
        let now = self.clock.now();
        [self.reply_timer.remaining(now), self.notice_timer.remaining(now)]
            .into_iter()
            .flatten()
            .min()
    }

    /// Chooses and plays the automated side's move right away.
    ///
    /// With no legal move the game ends and `None` is returned.
    pub fn play_computer_move(&mut self) -> Option<Selection> {
        let color = self.config.computer();
        if self.outcome.is_some() || self.current_player != color {
            return None;
        }
        self.reply_timer.cancel();

        match select_move(&mut self.board, color, &mut self.rng) {
            Some(selection) => {
                self.play(selection.mv);
                Some(selection)
            }
            None => {
                let outcome = if is_king_in_check(&self.board, color) {
                    Outcome::Checkmate {
                        winner: self.config.human,
                    }
                } else {
                    Outcome::Stalemate
                };
                self.finish(outcome);
                None
            }
        }
    }

    /// Back to the starting position with all transient state cleared.
    pub fn reset(&mut self) {
        self.board = Board::standard();
        self.current_player = Color::White;
        self.clear_selection();
        self.outcome = None;
        self.in_check = false;
        self.reply_timer.cancel();
        self.notice = None;
        self.notice_timer.cancel();
        info!(human = %self.config.human, "game reset");
        self.start_turn();
    }

    fn accepts_input(&self) -> bool {
        self.outcome.is_none()
            && !self.is_computer_thinking()
            && self.current_player == self.config.human
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    fn play(&mut self, mv: Move) {
        let mover = self.current_player;
        let captured = self.board.apply(mv);
        debug!(%mv, color = %mover, capture = captured.is_some(), "move applied");
        self.current_player = mover.opponent();
        self.start_turn();
    }

    /// Re-evaluates check state for the side to move and schedules its turn.
    fn start_turn(&mut self) {
        let side = self.current_player;
        self.in_check = is_king_in_check(&self.board, side);
        if self.in_check {
            self.raise_notice(side);
        }

        if side == self.config.computer() {
            let now = self.clock.now();
            self.reply_timer.arm(now, self.config.thinking_delay());
            trace!(delay_ms = self.config.thinking_delay_ms, "reply scheduled");
        } else if let Some(outcome) = game_outcome(&mut self.board, side) {
            self.finish(outcome);
        }
    }

    fn raise_notice(&mut self, king: Color) {
        let notice = CheckNotice { king };
        debug!(%notice, "check");
        self.notice = Some(notice);
        let now = self.clock.now();
        self.notice_timer.arm(now, self.config.notice_duration());
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(?outcome, "game over");
        self.outcome = Some(outcome);
        self.reply_timer.cancel();
        self.clear_selection();
    }
}

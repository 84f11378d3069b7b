//! Application state and logic.

use super::input::{digit_cell, move_cursor};
use super::orchestrator::GameEvent;
use crate::banter::{self, BOMB_REACTION, RESET_LINE};
use crate::games::neon_bomb::{Action, AnyGame, Move, Player, Position};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How long a bombed cell flashes.
pub const EXPLOSION_FLASH: Duration = Duration::from_millis(600);

/// Main application state.
pub struct App {
    game: AnyGame,
    initial_bombs: u8,
    human_name: String,
    opponent_name: String,
    cursor: Position,
    bomb_mode: bool,
    thinking: bool,
    awaiting_reply: bool,
    ai_message: String,
    status_message: String,
    explosion: Option<(Position, Instant)>,
}

impl App {
    /// Creates a new application with `opening` in the speech bubble.
    pub fn new(
        initial_bombs: u8,
        human_name: impl Into<String>,
        opponent_name: impl Into<String>,
        opening: impl Into<String>,
    ) -> Self {
        Self {
            game: AnyGame::new(initial_bombs),
            initial_bombs,
            human_name: human_name.into(),
            opponent_name: opponent_name.into(),
            cursor: Position::Center,
            bomb_mode: false,
            thinking: false,
            awaiting_reply: false,
            ai_message: opening.into(),
            status_message: "Your turn.".to_string(),
            explosion: None,
        }
    }

    /// Gets the current game.
    pub fn game(&self) -> &AnyGame {
        &self.game
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Whether the next action is a bomb.
    pub fn bomb_mode(&self) -> bool {
        self.bomb_mode
    }

    /// Whether the opponent is working on its move.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// What the opponent last said.
    pub fn ai_message(&self) -> &str {
        &self.ai_message
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Name of the X seat.
    pub fn human_name(&self) -> &str {
        &self.human_name
    }

    /// Name of the O seat.
    pub fn opponent_name(&self) -> &str {
        &self.opponent_name
    }

    /// Bombed cell still flashing at `now`, if any.
    pub fn explosion_at(&self, now: Instant) -> Option<Position> {
        self.explosion
            .filter(|(_, at)| now.saturating_duration_since(*at) < EXPLOSION_FLASH)
            .map(|(pos, _)| pos)
    }

    /// True when the human may act.
    ///
    /// False between sending an action and hearing back about it.
    pub fn is_human_turn(&self) -> bool {
        !self.thinking && !self.awaiting_reply && self.game.to_move() == Some(Player::X)
    }

    /// Handles a game event from the orchestrator.
    #[instrument(skip(self, event))]
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::AiThinking { name } => {
                self.thinking = true;
                self.status_message = format!("{} is thinking...", name);
            }
            GameEvent::Rejected { reason } => {
                self.awaiting_reply = false;
                self.status_message = reason;
            }
            GameEvent::MoveApplied {
                name,
                mv,
                game,
                commentary,
            } => {
                self.game = game;
                self.thinking = false;
                self.awaiting_reply = false;
                if let Action::Bomb(pos) = mv.action {
                    self.explosion = Some((pos, Instant::now()));
                }

                match commentary {
                    Some(line) => self.ai_message = line,
                    None if mv.player == Player::X
                        && mv.action.is_bomb()
                        && !self.game.is_over() =>
                    {
                        self.ai_message = BOMB_REACTION.to_string();
                    }
                    None => {}
                }

                self.status_message = format!("{} played {}", name, mv.action);
            }
            GameEvent::GameOver { outcome, game } => {
                self.game = game;
                self.thinking = false;
                self.awaiting_reply = false;
                self.bomb_mode = false;
                self.status_message = format!(
                    "{} Press 'r' to restart or 'q' to quit.",
                    banter::headline(&outcome)
                );
            }
        }
    }

    /// Handles a board key, returning the action for the human seat if
    /// the key completes one.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.act(self.cursor),
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.toggle_bomb_mode();
                None
            }
            other => {
                let cell = digit_cell(other)?;
                self.cursor = cell;
                self.act(cell)
            }
        }
    }

    /// Arms or disarms bomb mode.
    ///
    /// Only possible on the human's turn while X still holds a bomb and
    /// there is an O on the board.
    pub fn toggle_bomb_mode(&mut self) {
        if !self.is_human_turn() {
            return;
        }
        let Some(game) = self.game.in_progress() else {
            return;
        };
        if game.bombs().remaining(Player::X) == 0 {
            self.status_message = "No bombs left.".to_string();
            return;
        }
        if !self.bomb_mode && game.bomb_targets().is_empty() {
            self.status_message = "Nothing to bomb yet.".to_string();
            return;
        }
        self.bomb_mode = !self.bomb_mode;
        self.status_message = if self.bomb_mode {
            "Bomb armed: pick an O to blow up.".to_string()
        } else {
            "Bomb disarmed.".to_string()
        };
    }

    fn act(&mut self, cell: Position) -> Option<Action> {
        if !self.is_human_turn() {
            return None;
        }
        let game = self.game.in_progress()?;

        let action = if self.bomb_mode {
            Action::Bomb(cell)
        } else {
            Action::Place(cell)
        };

        // Illegal clicks are ignored and leave bomb mode armed.
        if let Err(e) = game.check(&Move::new(Player::X, action)) {
            debug!(error = %e, "Ignoring illegal action");
            self.status_message = e.to_string();
            return None;
        }

        self.bomb_mode = false;
        self.awaiting_reply = true;
        Some(action)
    }

    /// Resets to a fresh game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game = AnyGame::new(self.initial_bombs);
        self.bomb_mode = false;
        self.thinking = false;
        self.awaiting_reply = false;
        self.explosion = None;
        self.ai_message = RESET_LINE.to_string();
        self.status_message = "Your turn.".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banter::OPENING_LINE;
    use crate::games::neon_bomb::GameResult;

    fn app() -> App {
        App::new(2, "Human", "Gemini", OPENING_LINE)
    }

    fn apply(app: &mut App, mv: Move, commentary: Option<&str>) {
        let game = app.game().clone().apply(mv).expect("legal move");
        app.handle_event(GameEvent::MoveApplied {
            name: mv.player.to_string(),
            mv,
            game,
            commentary: commentary.map(str::to_string),
        });
    }

    #[test]
    fn test_digit_places_at_cell() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('5')), Some(Action::Place(Position::Center)));
        assert_eq!(app.cursor(), Position::Center);
    }

    #[test]
    fn test_second_keypress_waits_for_reply() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('5')), Some(Action::Place(Position::Center)));
        assert_eq!(app.handle_key(KeyCode::Char('9')), None);
        assert_eq!(app.handle_key(KeyCode::Enter), None);
        assert!(!app.is_human_turn());

        app.handle_event(GameEvent::Rejected {
            reason: "try again".to_string(),
        });
        assert!(app.is_human_turn());
        assert_eq!(app.handle_key(KeyCode::Char('9')), Some(Action::Place(Position::BottomRight)));

        app.restart();
        assert!(app.is_human_turn());
    }

    #[test]
    fn test_human_turn_returns_after_opponent_moves() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('5')).is_some());
        apply(&mut app, Move::place(Player::X, Position::Center), None);
        assert!(!app.is_human_turn());
        apply(&mut app, Move::place(Player::O, Position::TopLeft), Some("Corner."));
        assert_eq!(app.handle_key(KeyCode::Char('9')), Some(Action::Place(Position::BottomRight)));
    }

    #[test]
    fn test_bomb_mode_stays_armed_on_illegal_target() {
        let mut app = app();
        apply(&mut app, Move::place(Player::X, Position::TopLeft), None);
        apply(&mut app, Move::place(Player::O, Position::Center), Some("Mine."));

        app.toggle_bomb_mode();
        assert!(app.bomb_mode());

        assert_eq!(app.handle_key(KeyCode::Char('1')), None);
        assert!(app.bomb_mode());

        assert_eq!(app.handle_key(KeyCode::Char('5')), Some(Action::Bomb(Position::Center)));
        assert!(!app.bomb_mode());
    }

    #[test]
    fn test_bomb_mode_needs_stock() {
        let mut app = App::new(0, "Human", "Gemini", OPENING_LINE);
        app.toggle_bomb_mode();
        assert!(!app.bomb_mode());
        assert_eq!(app.status_message(), "No bombs left.");
    }

    #[test]
    fn test_bomb_mode_needs_a_target() {
        let mut app = app();
        app.toggle_bomb_mode();
        assert!(!app.bomb_mode());
        assert_eq!(app.status_message(), "Nothing to bomb yet.");
    }

    #[test]
    fn test_no_action_while_opponent_moves() {
        let mut app = app();
        apply(&mut app, Move::place(Player::X, Position::TopLeft), None);
        assert_eq!(app.handle_key(KeyCode::Char('2')), None);
        app.toggle_bomb_mode();
        assert!(!app.bomb_mode());
    }

    #[test]
    fn test_speech_bubble_follows_moves() {
        let mut app = app();
        assert_eq!(app.ai_message(), OPENING_LINE);

        apply(&mut app, Move::place(Player::X, Position::TopLeft), None);
        assert_eq!(app.ai_message(), OPENING_LINE);

        apply(&mut app, Move::place(Player::O, Position::Center), Some("Center is mine."));
        assert_eq!(app.ai_message(), "Center is mine.");

        apply(&mut app, Move::bomb(Player::X, Position::Center), None);
        assert_eq!(app.ai_message(), BOMB_REACTION);
        assert_eq!(app.explosion_at(Instant::now()), Some(Position::Center));
        assert_eq!(
            app.explosion_at(Instant::now() + EXPLOSION_FLASH + Duration::from_millis(1)),
            None
        );
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut app = app();
        let moves = [
            Move::place(Player::X, Position::TopLeft),
            Move::place(Player::O, Position::Center),
            Move::place(Player::X, Position::TopCenter),
            Move::place(Player::O, Position::BottomLeft),
            Move::place(Player::X, Position::TopRight),
        ];
        for mv in moves {
            apply(&mut app, mv, None);
        }
        let GameResult::Finished(done) =
            crate::games::neon_bomb::GameInProgress::replay(2, &moves).expect("replay")
        else {
            panic!("expected finished game");
        };
        app.handle_event(GameEvent::GameOver {
            outcome: *done.outcome(),
            game: done.into(),
        });
        assert!(app.status_message().starts_with("X WINS!"));
        assert_eq!(app.handle_key(KeyCode::Char('9')), None);

        app.restart();
        assert!(!app.game().is_over());
        assert_eq!(app.ai_message(), RESET_LINE);
        assert_eq!(app.game().bombs().remaining(Player::X), 2);
    }
}

//! Turning a suggestion into a legal action.

use super::{AdviceRequest, Suggestion};
use crate::games::neon_bomb::{Action, GameInProgress, Square};
use tracing::{debug, instrument, warn};

/// Picks the action the AI seat actually takes in `game`.
///
/// 1. A bomb is honored when bombs are allowed and the bomb is legal.
/// 2. Otherwise the suggested cell is placed if it is empty.
/// 3. Otherwise the first empty cell is placed.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(game), fields(to_move = ?game.to_move()))]
pub fn resolve(suggestion: &Suggestion, game: &GameInProgress, allow_bombs: bool) -> Option<Action> {
    resolve_request(suggestion, &AdviceRequest::for_game(game, allow_bombs))
}

/// [`resolve`] against the position described by `request`.
#[instrument(skip(request), fields(player = ?request.player))]
pub fn resolve_request(suggestion: &Suggestion, request: &AdviceRequest) -> Option<Action> {
    let board = &request.board;

    if let Some(cell) = suggestion.cell {
        if suggestion.bomb {
            let target = board.get(cell);
            if !request.may_bomb() {
                debug!(%cell, "Bomb not available, treating as placement");
            } else if target == Square::Occupied(request.player.opponent()) {
                return Some(Action::Bomb(cell));
            } else {
                warn!(%cell, ?target, "Illegal bomb suggestion, treating as placement");
            }
        }

        if board.is_empty(cell) {
            return Some(Action::Place(cell));
        }
        warn!(%cell, "Suggested cell is occupied");
    }

    let fallback = board.first_empty().map(Action::Place);
    debug!(?fallback, "Using first empty cell");
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::neon_bomb::{Board, GameResult, Move, Player, Position};

    fn game_after(moves: &[Move], bombs: u8) -> GameInProgress {
        match GameInProgress::replay(bombs, moves).expect("valid replay") {
            GameResult::InProgress(g) => g,
            GameResult::Finished(_) => panic!("game should continue"),
        }
    }

    fn suggest(cell: Option<Position>, bomb: bool) -> Suggestion {
        Suggestion {
            cell,
            bomb,
            commentary: "test".to_string(),
        }
    }

    #[test]
    fn test_empty_suggested_cell_is_placed() {
        let game = game_after(&[Move::place(Player::X, Position::Center)], 2);
        assert_eq!(
            resolve(&suggest(Some(Position::TopLeft), false), &game, true),
            Some(Action::Place(Position::TopLeft))
        );
    }

    #[test]
    fn test_occupied_cell_falls_back_to_first_empty() {
        let game = game_after(
            &[
                Move::place(Player::X, Position::TopLeft),
                Move::place(Player::O, Position::Center),
                Move::place(Player::X, Position::TopCenter),
            ],
            2,
        );
        assert_eq!(
            resolve(&suggest(Some(Position::Center), false), &game, true),
            Some(Action::Place(Position::TopRight))
        );
        assert_eq!(
            resolve(&suggest(None, false), &game, true),
            Some(Action::Place(Position::TopRight))
        );
    }

    #[test]
    fn test_legal_bomb_is_honored() {
        let game = game_after(
            &[
                Move::place(Player::X, Position::TopLeft),
                Move::place(Player::O, Position::Center),
                Move::place(Player::X, Position::TopCenter),
            ],
            2,
        );
        assert_eq!(
            resolve(&suggest(Some(Position::TopCenter), true), &game, true),
            Some(Action::Bomb(Position::TopCenter))
        );
    }

    #[test]
    fn test_bomb_on_own_mark_becomes_fallback_placement() {
        let game = game_after(
            &[
                Move::place(Player::X, Position::TopLeft),
                Move::place(Player::O, Position::Center),
                Move::place(Player::X, Position::TopCenter),
            ],
            2,
        );
        assert_eq!(
            resolve(&suggest(Some(Position::Center), true), &game, true),
            Some(Action::Place(Position::TopRight))
        );
    }

    #[test]
    fn test_bomb_on_empty_cell_becomes_placement_there() {
        let game = game_after(&[Move::place(Player::X, Position::TopLeft)], 2);
        assert_eq!(
            resolve(&suggest(Some(Position::BottomRight), true), &game, true),
            Some(Action::Place(Position::BottomRight))
        );
    }

    #[test]
    fn test_bomb_ignored_when_disabled_or_out_of_stock() {
        let moves = [
            Move::place(Player::X, Position::TopLeft),
            Move::place(Player::O, Position::Center),
            Move::place(Player::X, Position::TopCenter),
        ];
        let game = game_after(&moves, 2);
        assert_eq!(
            resolve(&suggest(Some(Position::TopLeft), true), &game, false),
            Some(Action::Place(Position::TopRight))
        );

        let game = game_after(&moves, 0);
        assert_eq!(
            resolve(&suggest(Some(Position::TopLeft), true), &game, true),
            Some(Action::Place(Position::TopRight))
        );
    }

    #[test]
    fn test_request_without_game() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        let request = AdviceRequest::new(board, Player::O, 1, 0, true);
        assert_eq!(
            resolve_request(&suggest(Some(Position::TopLeft), true), &request),
            Some(Action::Bomb(Position::TopLeft))
        );
        assert_eq!(
            resolve_request(&suggest(Some(Position::Center), true), &request),
            Some(Action::Place(Position::Center))
        );
    }
}

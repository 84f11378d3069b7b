//! Prompt and response schema for the model-backed advisor.

use super::AdviceRequest;
use serde_json::json;
use tracing::instrument;

/// The user turn sent with every request.
pub const USER_MESSAGE: &str = "What is your next move?";

/// Builds the system instruction for one move request.
#[instrument(skip(request), fields(player = ?request.player))]
pub fn system_instruction(request: &AdviceRequest) -> String {
    let player = request.player;
    let opponent = player.opponent();

    let mut prompt = format!(
        "You are a competitive, slightly trash-talking, but witty AI playing Tic-Tac-Toe.\n\
         You play as '{player}'.\n\
         The board indices are 0-8 (top-left to bottom-right).\n\
         Current board state: [{cells}].\n\
         If a number is shown, that cell is empty.\n\
         \n\
         Rules:\n\
         1. Win if you can.\n\
         2. Block the opponent if they are about to win.\n\
         3. If neither, take the center or corners.\n\
         \n\
         IMPORTANT: You also know about 'BOMBS'. A player can use a bomb to clear an opponent's cell.\n\
         You should factor in that the opponent has {opponent_bombs} bombs left.\n",
        cells = request.board.prompt_cells(),
        opponent_bombs = request.opponent_bombs,
    );

    if request.may_bomb() {
        prompt.push_str(&format!(
            "You have {own} bombs left. Instead of placing a mark you may set \"isBomb\" to true \
             to clear the '{opponent}' mark at \"move\". A bomb may only target a cell holding \
             '{opponent}' and it uses up your turn. Save bombs for breaking a line that would \
             otherwise win.\n",
            own = request.own_bombs,
        ));
        prompt.push_str(
            "\nYour response must be valid JSON matching this schema:\n\
             {\n  \"move\": number (0-8),\n  \"isBomb\": boolean,\n  \"commentary\": string (max 15 words)\n}\n",
        );
    } else {
        prompt.push_str(
            "You have no bombs available, so you must place a mark on an empty cell.\n\
             \nYour response must be valid JSON matching this schema:\n\
             {\n  \"move\": number (0-8),\n  \"commentary\": string (max 15 words)\n}\n",
        );
    }

    prompt
}

/// Response schema in the provider's structured-output form.
#[instrument]
pub fn response_schema(allow_bombs: bool) -> serde_json::Value {
    let mut schema = json!({
        "type": "OBJECT",
        "properties": {
            "move": {
                "type": "NUMBER",
                "description": "The index of the cell to play (0-8)"
            },
            "commentary": {
                "type": "STRING",
                "description": "A witty remark about the move"
            }
        },
        "required": ["move", "commentary"]
    });

    if allow_bombs {
        schema["properties"]["isBomb"] = json!({
            "type": "BOOLEAN",
            "description": "True to spend a bomb clearing the opponent's mark at `move`"
        });
    }

    schema
}

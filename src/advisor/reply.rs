//! Parsing of the model's JSON answer.

use super::{AdvisorError, Suggestion};
use crate::banter::THINKING_LINE;
use crate::games::neon_bomb::Position;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const MAX_COMMENTARY_WORDS: usize = 15;

#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(rename = "move")]
    cell: serde_json::Value,
    #[serde(default, rename = "isBomb", alias = "is_bomb", alias = "bomb")]
    bomb: bool,
    commentary: String,
}

/// Parses a model answer into a [`Suggestion`].
///
/// Markdown fences and surrounding prose are ignored; the outermost JSON
/// object is used. A `move` that is not an index 0-8 becomes `cell: None`
/// so that resolution can fall back. An empty answer counts as
/// "cell 0, thinking".
#[instrument(skip(text), fields(length = text.len()))]
pub fn parse_reply(text: &str) -> Result<Suggestion, AdvisorError> {
    let text = text.trim();
    if text.is_empty() {
        debug!("Empty reply, using default");
        return Ok(Suggestion {
            cell: Some(Position::TopLeft),
            bomb: false,
            commentary: THINKING_LINE.to_string(),
        });
    }

    let json = extract_object(text)
        .ok_or_else(|| AdvisorError::Malformed(format!("no JSON object in {:?}", text)))?;

    let raw: RawReply = serde_json::from_str(json)
        .map_err(|e| AdvisorError::Malformed(format!("{}: {}", e, json)))?;

    let cell = cell_from_value(&raw.cell);
    if cell.is_none() {
        warn!(value = %raw.cell, "Reply named no usable cell");
    }

    Ok(Suggestion {
        cell,
        bomb: raw.bomb,
        commentary: clip_commentary(&raw.commentary),
    })
}

fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn cell_from_value(value: &serde_json::Value) -> Option<Position> {
    match value {
        serde_json::Value::Number(n) => {
            let f = n.as_f64()?;
            if f.is_finite() && f.fract() == 0.0 && (0.0..=8.0).contains(&f) {
                Position::from_index(f as usize)
            } else {
                None
            }
        }
        serde_json::Value::String(s) => s.trim().parse::<usize>().ok().and_then(Position::from_index),
        _ => None,
    }
}

fn clip_commentary(commentary: &str) -> String {
    let words: Vec<&str> = commentary.split_whitespace().collect();
    if words.is_empty() {
        return THINKING_LINE.to_string();
    }
    words
        .into_iter()
        .take(MAX_COMMENTARY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

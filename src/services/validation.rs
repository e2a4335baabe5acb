use serde_json::Value;

use crate::error::{AppError, MSG_MESSAGE_REQUIRED, MSG_MESSAGE_TOO_LONG};

pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Checks the raw `message` field and returns the trimmed text to forward.
pub fn validate_message(raw: Option<&Value>) -> Result<String, AppError> {
    let text = match raw {
        Some(Value::String(s)) => s.trim(),
        _ => return Err(AppError::InvalidInput(MSG_MESSAGE_REQUIRED)),
    };

    if text.is_empty() {
        return Err(AppError::InvalidInput(MSG_MESSAGE_REQUIRED));
    }

    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::InvalidInput(MSG_MESSAGE_TOO_LONG));
    }

    Ok(text.to_string())
}

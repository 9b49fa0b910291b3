//! Numeric text entry.
//!
//! A field being edited can hold text that is not yet a number, such as `-`
//! or `.` typed as the first keystroke. Instead of coercing the text on every
//! keystroke, the field tracks one of three states and only falls back to a
//! default when the edit is committed.
//!
//! | text            | state            |
//! |-----------------|------------------|
//! | `""`            | `Empty`          |
//! | `-`, `.`, `1.`  | `Partial(text)`  |
//! | `-0.25`, `.5`   | `Valid(value)`   |
//!
//! Text outside the grammar `-?digits.digits` is rejected and leaves the
//! field unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputState {
    Empty,
    /// Prefix of a number that does not parse yet
    Partial(String),
    Valid(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputPolicy {
    /// Lengths and areas are positive; forces and loads may be negative
    pub allow_negative: bool,
}

/// Classify `text`, or `None` if it is not a number prefix under `policy`.
pub fn classify(text: &str, policy: InputPolicy) -> Option<InputState> {
    let digits = match text.strip_prefix('-') {
        Some(rest) if policy.allow_negative => rest,
        Some(_) => return None,
        None => text,
    };

    let mut dots = 0;
    for c in digits.chars() {
        match c {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => return None,
        }
    }
    if dots > 1 {
        return None;
    }

    if text.is_empty() {
        return Some(InputState::Empty);
    }
    if digits.ends_with('.') || !digits.chars().any(|c| c.is_ascii_digit()) {
        return Some(InputState::Partial(text.to_string()));
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(InputState::Valid(value)),
        _ => None,
    }
}

/// One editable numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericInput {
    policy: InputPolicy,
    text: String,
    state: InputState,
}

impl NumericInput {
    pub fn new(policy: InputPolicy) -> Self {
        NumericInput {
            policy,
            text: String::new(),
            state: InputState::Empty,
        }
    }

    /// Field pre-filled with a committed value.
    pub fn with_value(policy: InputPolicy, value: f64) -> Self {
        NumericInput {
            policy,
            text: value.to_string(),
            state: InputState::Valid(value),
        }
    }

    /// Apply the field's full new text. Returns `false` and keeps the
    /// previous state when the text is rejected.
    pub fn accept(&mut self, text: &str) -> bool {
        match classify(text, self.policy) {
            Some(state) => {
                self.text = text.to_string();
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Finish editing: a valid value is kept, anything else becomes `default`.
    pub fn commit(&mut self, default: f64) -> f64 {
        let value = match self.state {
            InputState::Valid(value) => value,
            InputState::Empty | InputState::Partial(_) => default,
        };
        self.text = value.to_string();
        self.state = InputState::Valid(value);
        value
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Current value, if the text is a complete number
    pub fn value(&self) -> Option<f64> {
        match self.state {
            InputState::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// Text to show in the field
    pub fn display(&self) -> &str {
        &self.text
    }
}

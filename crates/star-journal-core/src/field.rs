//! The four narrative sections of a STAR journal entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured field the user composes. Suggestions are requested per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Situation,
    Task,
    Action,
    Result,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Situation, Field::Task, Field::Action, Field::Result];

    /// Parse a wire identifier. Unknown names return `None`; callers still
    /// serve them, just without field-specific augmentation.
    pub fn parse(name: &str) -> Option<Field> {
        match name {
            "situation" => Some(Field::Situation),
            "task" => Some(Field::Task),
            "action" => Some(Field::Action),
            "result" => Some(Field::Result),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Situation => "situation",
            Field::Task => "task",
            Field::Action => "action",
            Field::Result => "result",
        }
    }

    /// Position in [`Field::ALL`], usable as a slot index.
    pub fn index(self) -> usize {
        match self {
            Field::Situation => 0,
            Field::Task => 1,
            Field::Action => 2,
            Field::Result => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{InilexError, Result};

/// Which characters may follow the `$` of a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableNames {
    /// Letters and underscores.
    #[default]
    Alphabetic,
    /// Letters and underscores, then digits as well after the first name character.
    Alphanumeric,
}

impl VariableNames {
    /// Rule for the first character after `$`.
    pub fn first(self) -> fn(char) -> bool {
        |c: char| c.is_alphabetic() || c == '_'
    }

    /// Rule for every later character of the name.
    pub fn rest(self) -> fn(char) -> bool {
        match self {
            VariableNames::Alphabetic => |c: char| c.is_alphabetic() || c == '_',
            VariableNames::Alphanumeric => |c: char| c.is_alphanumeric() || c == '_',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    pub variable_names: VariableNames,
    /// One level of indentation in pretty-printed output.
    pub indent: String,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            variable_names: VariableNames::default(),
            indent: String::from("  "),
        }
    }
}

impl LexerConfig {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(InilexError::Config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(InilexError::Serialize)
    }
}

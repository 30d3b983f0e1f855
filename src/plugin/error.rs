use thiserror::Error;

use crate::model::label::LabelError;
use crate::plugin::keyword::Keyword;

/// Coarse classification of a rejected directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value could not be parsed as the type its keyword requires.
    Parse,
    /// The directive itself is not acceptable (unknown keyword, missing value).
    Validation,
}

/// A directive that could not be applied. The record it targeted is unchanged.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("{keyword} {value:?}: {source}")]
    Parse {
        keyword: Keyword,
        value: String,
        #[source]
        source: ValueError,
    },

    #[error("invalid directive {directive:?}: unknown parameter {param:?}")]
    UnknownParameter { directive: String, param: String },

    #[error("invalid directive {directive:?}: option name must not be empty")]
    EmptyOption { directive: String },

    #[error("invalid directive {directive:?}: expected <name> <param> <value>")]
    Malformed { directive: String },
}

impl DirectiveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectiveError::Parse { .. } => ErrorKind::Parse,
            DirectiveError::UnknownParameter { .. }
            | DirectiveError::EmptyOption { .. }
            | DirectiveError::Malformed { .. } => ErrorKind::Validation,
        }
    }
}

/// The underlying parser failure carried by [`DirectiveError::Parse`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error(transparent)]
    Bool(#[from] ParseBoolError),

    #[error(transparent)]
    Label(#[from] LabelError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid boolean literal {0:?}")]
pub struct ParseBoolError(pub String);

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and the matching false
/// spellings `0`, `f`, `F`, `FALSE`, `false`, `False`. No trimming is done.
pub fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError(value.to_string())),
    }
}

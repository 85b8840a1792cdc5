/// A compile failure, tagged with the source position of the token that
/// triggered it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column} error: {detail}")]
pub struct CompileError {
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub column: usize,
    pub detail: ErrorDetail,
}

impl CompileError {
    pub fn new(line: usize, column: usize, detail: ErrorDetail) -> Self {
        CompileError {
            line,
            column,
            detail,
        }
    }
}

/// The failure taxonomy. The first failure aborts the whole compile; no
/// partial output is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorDetail {
    #[error("No field named \"{field_name}\" in proto {message_name}")]
    UnknownField {
        message_name: String,
        field_name: String,
    },

    #[error("Saw non-repeating field '{field_name}' more than once")]
    DuplicateField { field_name: String },

    #[error(
        "Expected value of type {expected} for field {field_name} in proto \
         {message_name} instead saw '{literal}'"
    )]
    TypeMismatch {
        field_name: String,
        message_name: String,
        expected: &'static str,
        literal: String,
    },

    #[error(
        "Expected 'true' or 'false' for boolean field {field_name} in proto \
         {message_name} instead saw '{literal}'"
    )]
    BadBoolean {
        field_name: String,
        message_name: String,
        literal: String,
    },

    #[error("Unexpected value '{literal}' for enum field {field_name} in proto {message_name}")]
    UnknownEnumValue {
        field_name: String,
        message_name: String,
        literal: String,
    },

    #[error("Unknown string escape in {field_name} in proto {message_name}: '\\{escape}'")]
    BadEscape {
        field_name: String,
        message_name: String,
        escape: char,
    },

    #[error("Unmatched closing brace")]
    UnmatchedBrace,

    #[error("Nested message not closed")]
    UnterminatedMessage,

    #[error("Unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char },

    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Unknown message type {name}")]
    UnknownMessageType { name: String },
}

/// Result type alias for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;

use thiserror::Error;

use crate::{lexer::prelude::TokenKind, utils::prelude::SrcSpan};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
    },
    #[error("no prefix parse function for {token} found")]
    NoPrefixParseFn {
        token: TokenKind,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger {
        literal: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    /// Short label shown under the offending source span.
    pub fn label(&self) -> String {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, .. } => format!("expected `{expected}` here"),
            ParseErrorType::NoPrefixParseFn { token } if token.is_operator() => {
                format!("`{token}` cannot start an expression")
            },
            ParseErrorType::NoPrefixParseFn { token } if token.is_reserved_word() => {
                format!("the keyword `{token}` cannot start an expression")
            },
            ParseErrorType::NoPrefixParseFn { .. } => "not an expression".to_string(),
            ParseErrorType::InvalidInteger { .. } => "does not fit in a 64-bit integer".to_string(),
        }
    }

    pub fn is_unexpected_eof(&self) -> bool {
        matches!(
            self.error,
            ParseErrorType::UnexpectedToken { got: TokenKind::Eof, .. }
                | ParseErrorType::NoPrefixParseFn { token: TokenKind::Eof }
        )
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}

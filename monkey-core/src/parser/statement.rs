use tracing::trace;

use crate::{lexer::prelude::{Token, TokenKind}, utils::prelude::SrcSpan};
use super::ast::{
    BlockStatement, ExpressionStatement, Identifier, LetStatement, ReturnStatement, Statement
};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::parser::{Parse, Parser, Precedence};

impl<T: Iterator<Item = Token>> Parse<T> for Statement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let res = match parser.current_token.kind {
            TokenKind::Let => Self::Let(LetStatement::parse(parser)?),
            TokenKind::Return => Self::Return(ReturnStatement::parse(parser)?),
            _ => Self::Expression(ExpressionStatement::parse(parser)?),
        };

        Ok(res)
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for LetStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        trace!("parsing let statement");
        let token = parser.current_token.clone();

        parser.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from(parser.current_token.clone());

        parser.expect_peek(TokenKind::Assign)?;
        parser.advance();

        let value = parser.parse_expression(Precedence::Lowest)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.advance();
        }

        Ok(Self {
            location: SrcSpan::from(token.location.start, parser.current_token.location.end),
            token,
            name,
            value
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for ReturnStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        trace!("parsing return statement");
        let token = parser.current_token.clone();

        parser.advance();

        let value = parser.parse_expression(Precedence::Lowest)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.advance();
        }

        Ok(Self {
            location: SrcSpan::from(token.location.start, parser.current_token.location.end),
            token,
            value
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for ExpressionStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        trace!(token = %parser.current_token.kind, "parsing expression statement");
        let token = parser.current_token.clone();

        let expression = parser.parse_expression(Precedence::Lowest)?;

        if parser.peek_is(TokenKind::Semicolon) {
            parser.advance();
        }

        Ok(Self {
            location: SrcSpan::from(token.location.start, parser.current_token.location.end),
            token,
            expression
        })
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for BlockStatement {
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        trace!("parsing block statement");
        let token = parser.current_token.clone();
        let mut statements = vec![];

        parser.advance();

        while !parser.current_is(TokenKind::RBrace) && !parser.current_is(TokenKind::Eof) {
            match Statement::parse(parser) {
                Ok(statement) => statements.push(statement),
                Err(error) => parser.recover(error),
            }

            parser.advance();
        }

        if parser.current_is(TokenKind::Eof) {
            return parse_error(
                ParseErrorType::UnexpectedToken {
                    expected: TokenKind::RBrace,
                    got: TokenKind::Eof,
                },
                parser.current_token.location
            );
        }

        Ok(Self {
            location: SrcSpan::from(token.location.start, parser.current_token.location.end),
            token,
            statements
        })
    }
}

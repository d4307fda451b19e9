use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{lexer::prelude::{Lexer, Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{
    BlockStatement, BooleanLiteral, CallExpression, Expression, FunctionLiteral,
    Identifier, IfExpression, InfixExpression, IntegerLiteral, PrefixExpression, Program, Statement
};

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

pub type PrefixParseFn<T> = fn(&mut Parser<T>) -> Result<Expression, ParseError>;
pub type InfixParseFn<T> = fn(&mut Parser<T>, Expression) -> Result<Expression, ParseError>;

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub peek_token: Token,
    pub errors: Vec<ParseError>,

    prefix_parse_fns: HashMap<TokenKind, PrefixParseFn<T>>,
    infix_parse_fns: HashMap<TokenKind, InfixParseFn<T>>,
    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: Token::eof(0),
            peek_token: Token::eof(0),
            errors: vec![],

            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
            tokens: input,
        };

        parser.register_prefix(TokenKind::Ident, Self::parse_identifier);
        parser.register_prefix(TokenKind::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenKind::True, Self::parse_boolean);
        parser.register_prefix(TokenKind::False, Self::parse_boolean);
        parser.register_prefix(TokenKind::Bang, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Self::parse_grouped_expression);
        parser.register_prefix(TokenKind::If, Self::parse_if_expression);
        parser.register_prefix(TokenKind::Function, Self::parse_function_literal);

        for operator in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
        ] {
            parser.register_infix(operator, Self::parse_infix_expression);
        }
        parser.register_infix(TokenKind::LParen, Self::parse_call_expression);

        parser.advance();
        parser.advance();

        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, function: PrefixParseFn<T>) {
        self.prefix_parse_fns.insert(kind, function);
    }

    fn register_infix(&mut self, kind: TokenKind, function: InfixParseFn<T>) {
        self.infix_parse_fns.insert(kind, function);
    }

    /// Shifts the lookahead into the current token and pulls a new lookahead.
    pub fn advance(&mut self) {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => Token::eof(self.peek_token.location.end),
        };

        self.current_token = std::mem::replace(&mut self.peek_token, next);
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Advances only if the lookahead has the expected kind.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            parse_error(
                ParseErrorType::UnexpectedToken {
                    expected: kind,
                    got: self.peek_token.kind,
                },
                self.peek_token.location
            )
        }
    }

    pub fn record(&mut self, error: ParseError) {
        debug!(%error, span = %error.span, "parse error");
        self.errors.push(error);
    }

    /// Records the error of a dropped statement and skips its terminator.
    pub fn recover(&mut self, error: ParseError) {
        self.record(error);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(self.current_token.kind)
    }

    pub fn peek_precedence(&self) -> Precedence {
        Precedence::from(self.peek_token.kind)
    }

    pub fn parse_program(&mut self) -> Program {
        trace!("parsing program");
        let mut program = Program::default();

        while !self.current_is(TokenKind::Eof) {
            match Statement::parse(self) {
                Ok(statement) => program.statements.push(statement),
                Err(error) => self.recover(error),
            }

            self.advance();
        }

        trace!(statements = program.statements.len(), "finished parsing");
        program
    }

    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        trace!(?precedence, token = %self.current_token.kind, "parsing expression");

        let prefix = match self.prefix_parse_fns.get(&self.current_token.kind) {
            Some(prefix) => *prefix,
            None => return parse_error(
                ParseErrorType::NoPrefixParseFn { token: self.current_token.kind },
                self.current_token.location
            )
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_parse_fns.get(&self.peek_token.kind) {
                Some(infix) => *infix,
                None => return Ok(left)
            };

            self.advance();

            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn parse_identifier(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Identifier(Identifier::from(self.current_token.clone())))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current_token.clone();

        match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expression::Integer(IntegerLiteral { token, value })),
            Err(_) => parse_error(
                ParseErrorType::InvalidInteger { literal: token.literal.clone() },
                token.location
            )
        }
    }

    fn parse_boolean(&mut self) -> Result<Expression, ParseError> {
        let token = self.current_token.clone();
        let value = token.is(TokenKind::True);

        Ok(Expression::Boolean(BooleanLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        trace!(operator = %self.current_token.literal, "parsing prefix expression");
        let token = self.current_token.clone();

        self.advance();

        let right = self.parse_expression(Precedence::Prefix)?;
        let location = SrcSpan::from(token.location.start, right.location().end);

        Ok(Expression::Prefix(PrefixExpression {
            operator: token.literal.clone(),
            token,
            right: Box::new(right),
            location
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression, ParseError> {
        trace!(operator = %self.current_token.literal, "parsing infix expression");
        let token = self.current_token.clone();
        let precedence = self.current_precedence();

        self.advance();

        let right = self.parse_expression(precedence)?;
        let location = SrcSpan::from(left.location().start, right.location().end);

        Ok(Expression::Infix(InfixExpression {
            operator: token.literal.clone(),
            token,
            left: Box::new(left),
            right: Box::new(right),
            location
        }))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        self.advance();

        let expression = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen)?;

        Ok(expression)
    }

    fn parse_if_expression(&mut self) -> Result<Expression, ParseError> {
        trace!("parsing if expression");
        let token = self.current_token.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.advance();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;

        let consequence = BlockStatement::parse(self)?;
        let mut end = consequence.location.end;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            self.expect_peek(TokenKind::LBrace)?;

            let alternative = BlockStatement::parse(self)?;
            end = alternative.location.end;

            Some(alternative)
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            location: SrcSpan::from(token.location.start, end),
            token,
            condition: Box::new(condition),
            consequence,
            alternative
        }))
    }

    fn parse_function_literal(&mut self) -> Result<Expression, ParseError> {
        trace!("parsing function literal");
        let token = self.current_token.clone();

        self.expect_peek(TokenKind::LParen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;

        let body = BlockStatement::parse(self)?;

        Ok(Expression::Function(FunctionLiteral {
            location: SrcSpan::from(token.location.start, body.location.end),
            token,
            parameters,
            body
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut parameters = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(Identifier::from(self.current_token.clone()));

        while self.peek_is(TokenKind::Comma) {
            self.advance();

            if self.peek_is(TokenKind::RParen) {
                break;
            }

            self.expect_peek(TokenKind::Ident)?;
            parameters.push(Identifier::from(self.current_token.clone()));
        }

        self.expect_peek(TokenKind::RParen)?;

        Ok(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression, ParseError> {
        trace!("parsing call expression");
        let token = self.current_token.clone();
        let arguments = self.parse_call_arguments()?;
        let location = SrcSpan::from(function.location().start, self.current_token.location.end);

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
            location
        }))
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut arguments = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Ok(arguments);
        }

        self.advance();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.advance();

            if self.peek_is(TokenKind::RParen) {
                break;
            }

            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen)?;

        Ok(arguments)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call
}

impl From<TokenKind> for Precedence {
    fn from(value: TokenKind) -> Self {
        match value {
            TokenKind::Equal | TokenKind::NotEqual => Self::Equals,
            TokenKind::LessThan | TokenKind::GreaterThan => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

/// Parses a complete source text, returning the program together with every
/// error encountered along the way.
pub fn parse(src: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::from_source(src));
    let program = parser.parse_program();

    (program, parser.errors)
}

pub fn parse_from_stream(stream: impl Iterator<Item = char>) -> (Program, Vec<ParseError>) {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    (program, parser.errors)
}

use super::token::{Token, TokenKind};
use crate::utils::prelude::SrcSpan;

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
	Some(match word {
		"fn" => TokenKind::Function,
		"let" => TokenKind::Let,
		"true" => TokenKind::True,
		"false" => TokenKind::False,
		"if" => TokenKind::If,
		"else" => TokenKind::Else,
		"return" => TokenKind::Return,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<'a> Lexer<std::iter::Map<std::str::CharIndices<'a>, fn((usize, char)) -> (u32, char)>> {
	pub fn from_source(src: &'a str) -> Self {
		let offsets: fn((usize, char)) -> (u32, char) = |(i, c)| (i as u32, c);

		Lexer::new(src.char_indices().map(offsets))
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	/// Produces the next token. Once the input is exhausted every call
	/// returns an `EOF` token located at the end of the source.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();

		match self.ch {
			Some(ch) => match ch {
				'=' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::Equal),
				'=' => self.eat_one_char(TokenKind::Assign),
				'!' if self.next_ch == Some('=') => self.eat_two_chars(TokenKind::NotEqual),
				'!' => self.eat_one_char(TokenKind::Bang),
				'+' => self.eat_one_char(TokenKind::Plus),
				'-' => self.eat_one_char(TokenKind::Minus),
				'*' => self.eat_one_char(TokenKind::Asterisk),
				'/' => self.eat_one_char(TokenKind::Slash),
				'<' => self.eat_one_char(TokenKind::LessThan),
				'>' => self.eat_one_char(TokenKind::GreaterThan),
				',' => self.eat_one_char(TokenKind::Comma),
				';' => self.eat_one_char(TokenKind::Semicolon),
				'(' => self.eat_one_char(TokenKind::LParen),
				')' => self.eat_one_char(TokenKind::RParen),
				'{' => self.eat_one_char(TokenKind::LBrace),
				'}' => self.eat_one_char(TokenKind::RBrace),
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' => self.lex_number(),
				_ => self.eat_one_char(TokenKind::Illegal),
			},
			None => Token::eof(self.position)
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let (pos, next) = match self.input.next() {
			Some((pos, ch)) => (pos, Some(ch)),
			None => {
				let width = self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				(self.next_position + width, None)
			}
		};

		self.ch = self.next_ch;
		self.position = self.next_position;
		self.next_ch = next;
		self.next_position = pos;

		ch
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
			self.next_char();
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start_pos = self.position;
		let literal = self.next_char().map(String::from).unwrap_or_default();
		let end_pos = self.position;

		Token::new(kind, literal, SrcSpan::from(start_pos, end_pos))
	}

	fn eat_two_chars(&mut self, kind: TokenKind) -> Token {
		let start_pos = self.position;
		let literal: String = [self.next_char(), self.next_char()]
			.into_iter()
			.flatten()
			.collect();
		let end_pos = self.position;

		Token::new(kind, literal, SrcSpan::from(start_pos, end_pos))
	}

	fn lex_ident(&mut self) -> Token {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;
		let kind = str_to_keyword(&ident).unwrap_or(TokenKind::Ident);

		Token::new(kind, ident, SrcSpan::from(start_pos, end_pos))
	}

	fn lex_number(&mut self) -> Token {
		let start_pos = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		Token::new(TokenKind::Int, value, SrcSpan::from(start_pos, end_pos))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}

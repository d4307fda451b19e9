use monkey_core::lexer::prelude::{Lexer, TokenKind};

use crate::cli::read_input;

pub fn start() -> std::io::Result<()> {
	let mut stdin = std::io::stdin().lock();

	while let Some(input) = read_input(&mut stdin)? {
		for token in Lexer::from_source(&input) {
			println!("{token:?}");

			if token.is(TokenKind::Eof) {
				break;
			}
		}
	}

	Ok(())
}

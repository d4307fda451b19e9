use monkey_core::parser::prelude::parse;

use crate::cli::{print_parser_errors, read_input};

pub fn start() -> std::io::Result<()> {
	let mut stdin = std::io::stdin().lock();

	while let Some(input) = read_input(&mut stdin)? {
		let (program, errors) = parse(&input);

		if errors.is_empty() {
			println!("{program}");
		} else {
			print_parser_errors(&errors);
		}
	}

	Ok(())
}

use monkey_core::{
	environment::prelude::Environment,
	eval::eval,
	parser::prelude::parse
};
use tracing::debug;

use crate::cli::{print_parser_errors, read_input};

pub fn start() -> std::io::Result<()> {
	let mut stdin = std::io::stdin().lock();
	let env = Environment::new_root();

	while let Some(input) = read_input(&mut stdin)? {
		let (program, errors) = parse(&input);

		if !errors.is_empty() {
			print_parser_errors(&errors);
			continue;
		}

		let value = eval(&program, &env);
		debug!(value_type = %value._type(), "evaluated");

		println!("{}", value.inspect());
	}

	Ok(())
}

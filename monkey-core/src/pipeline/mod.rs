
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Env, Value},
    eval::eval,
    parser::prelude::{parse, parse_from_stream, ParseError, Program},
    utils::prelude::Error
};

/// Reads and parses the file at `path`, streaming it through the lexer.
pub fn load(path: &Path) -> Result<Program, Error> {
    let file = std::fs::File::open(path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut io_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                io_error = Some(std::io::Error::from(err));
                None
            }
        });

    let (program, errors) = parse_from_stream(stream);

    if let Some(err) = io_error {
        return Err(Error::from(err));
    }

    info!(path = %path.display(), statements = program.statements.len(), "loaded");

    check(path, src, program, errors)
}

/// Parses and evaluates `src` in `env`.
pub fn run_source(path: &Path, src: &str, env: &Env) -> Result<Value, Error> {
    let (program, errors) = parse(src);
    let program = check(path, src.to_string(), program, errors)?;

    evaluate(path, &program, env)
}

pub fn run(path: &Path, env: &Env) -> Result<Value, Error> {
    let program = load(path)?;

    evaluate(path, &program, env)
}

fn check(
    path: &Path,
    src: String,
    program: Program,
    errors: Vec<ParseError>
) -> Result<Program, Error> {
    if errors.is_empty() {
        return Ok(program);
    }

    debug!(path = %path.display(), errors = errors.len(), "rejecting program");

    Err(Error::Parse {
        path: PathBuf::from(path),
        src,
        errors
    })
}

/// Evaluates an already parsed program. Runtime error values become
/// [`Error::Runtime`].
pub fn evaluate(path: &Path, program: &Program, env: &Env) -> Result<Value, Error> {
    match eval(program, env) {
        Value::Error { message } => Err(Error::Runtime {
            path: PathBuf::from(path),
            message
        }),
        value => Ok(value),
    }
}

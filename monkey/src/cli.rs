use std::{
    io::{BufRead, IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use monkey_core::parser::prelude::ParseError;

pub(crate) const PROMPT: &str = ">> ";
pub(crate) const EXIT_COMMAND: &str = ".exit";

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

/// Prompts for one line of input. Returns `None` once the user asks to
/// leave or stdin is closed. Blank lines are skipped.
pub(crate) fn read_input(stdin: &mut impl BufRead) -> std::io::Result<Option<String>> {
    loop {
        let mut input = String::new();

        print!("{PROMPT}");
        std::io::stdout().flush()?;

        if stdin.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let input = input.trim_end_matches(['\n', '\r']);

        match input {
            "" => continue,
            EXIT_COMMAND => return Ok(None),
            _ => return Ok(Some(input.to_string())),
        }
    }
}

pub(crate) fn print_parser_errors(errors: &[ParseError]) {
    println!("parser errors:");

    for error in errors {
        println!("\t{error}");
    }
}

fn colour_forced() -> bool {
    std::env::var("FORCE_COLOR").is_ok_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

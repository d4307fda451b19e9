use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{utils::prelude::SrcSpan, parser::prelude::ParseError};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("evaluation failed: {message}")]
    Runtime {
        path: PathBuf,
        message: String
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::StdIo { err: err.kind() }
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, errors } => errors.iter()
                .map(|error| {
                    // point at the end of the text rather than past it
                    let span = if error.is_unexpected_eof() {
                        SrcSpan::at(src.trim_end().len() as u32)
                    } else {
                        error.span
                    };

                    Diagnostic {
                        title: "Syntax error".into(),
                        text: error.to_string(),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(error.label()),
                                span,
                            },
                        }),
                    }
                })
                .collect(),
            Error::Runtime { path, message } => {
                vec![Diagnostic {
                    title: format!("Runtime error in {}", path.display()),
                    text: message.clone(),
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    location: None,
                }]
            }
        }
    }
}

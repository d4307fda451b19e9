use std::{fmt::Display, rc::Rc};

use crate::parser::prelude::{BlockStatement, Identifier};

use super::environment::Env;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    Function(Rc<Function>),
    /// Carries a `return`ed value up through enclosing blocks.
    ReturnValue(Box<Value>),
    Error {
        message: String
    },
    Null,
}

pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

// the captured environment may contain this very function
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.value.clone())
            .collect::<Vec<String>>();

        write!(f, "fn({}) {}", parameters.join(", "), self.body)
    }
}

// functions compare by identity
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Function(function) => write!(f, "{function}"),
            Value::ReturnValue(value) => write!(f, "{value}"),
            Value::Error { message } => write!(f, "ERROR: {message}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Function(_) => ValueType::Function,
            Self::ReturnValue(_) => ValueType::ReturnValue,
            Self::Error { .. } => ValueType::Error,
            Self::Null => ValueType::Null,
        }
    }

    /// Human readable rendering, as printed by the shells.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// Errors and `return`ed values abort whatever expression contains them.
    pub fn is_unwinding(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::ReturnValue(_))
    }

    /// Everything except `false` and `null` counts as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, &FALSE | &NULL)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Boolean,
    Function,
    ReturnValue,
    Error,
    Null,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "INTEGER",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Function => "FUNCTION",
            ValueType::ReturnValue => "RETURN_VALUE",
            ValueType::Error => "ERROR",
            ValueType::Null => "NULL",
        };

        write!(f, "{name}")
    }
}

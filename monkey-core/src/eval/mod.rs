#[cfg(test)]
mod tests;

use std::rc::Rc;

use tracing::debug;

use crate::{
    parser::prelude::{
        BlockStatement, CallExpression, Expression, IfExpression, InfixExpression,
        PrefixExpression, Program, Statement
    },
    environment::prelude::{Env, Environment, Function, Value, FALSE, NULL, TRUE},
};

/// Evaluates every statement of `program` in `env`, returning the value of
/// the last one. A `return` at the top level ends the program early.
pub fn eval(program: &Program, env: &Env) -> Value {
    let mut result = NULL;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Value::ReturnValue(value) => return *value,
            Value::Error { .. } => return result,
            _ => {}
        }
    }

    result
}

fn eval_block(block: &BlockStatement, env: &Env) -> Value {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        // leave ReturnValue wrapped so enclosing blocks stop too
        if result.is_unwinding() {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Value {
    match statement {
        Statement::Expression(statement) => eval_expression(&statement.expression, env),
        Statement::Return(statement) => {
            let value = eval_expression(&statement.value, env);

            if value.is_unwinding() {
                return value;
            }

            Value::ReturnValue(Box::new(value))
        },
        Statement::Let(statement) => {
            let value = eval_expression(&statement.value, env);

            if value.is_unwinding() {
                return value;
            }

            env.borrow_mut().set(statement.name.value.clone(), value);

            NULL
        }
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Value {
    match expression {
        Expression::Integer(literal) => Value::from(literal.value),
        Expression::Boolean(literal) => Value::from(literal.value),
        Expression::Identifier(ident) => match env.borrow().get(&ident.value) {
            Some(value) => value,
            None => error(format!("identifier not found: {}", ident.value)),
        },
        Expression::Prefix(prefix) => eval_prefix(prefix, env),
        Expression::Infix(infix) => eval_infix(infix, env),
        Expression::If(if_expression) => eval_if(if_expression, env),
        Expression::Function(literal) => Value::Function(Rc::new(Function {
            parameters: literal.parameters.clone(),
            body: literal.body.clone(),
            env: env.clone()
        })),
        Expression::Call(call) => eval_call(call, env),
    }
}

fn eval_prefix(prefix: &PrefixExpression, env: &Env) -> Value {
    let right = eval_expression(&prefix.right, env);

    if right.is_unwinding() {
        return right;
    }

    match prefix.operator.as_str() {
        "!" => match right {
            TRUE => FALSE,
            FALSE => TRUE,
            NULL => TRUE,
            _ => FALSE,
        },
        "-" => match right {
            Value::Integer { value } => Value::from(value.wrapping_neg()),
            _ => error(format!("unknown operator: -{}", right._type())),
        },
        operator => error(format!("unknown operator: {operator}{}", right._type())),
    }
}

fn eval_infix(infix: &InfixExpression, env: &Env) -> Value {
    let left = eval_expression(&infix.left, env);

    if left.is_unwinding() {
        return left;
    }

    let right = eval_expression(&infix.right, env);

    if right.is_unwinding() {
        return right;
    }

    let operator = infix.operator.as_str();

    match (&left, &right) {
        (
            Value::Integer { value: left_value },
            Value::Integer { value: right_value }
        ) => eval_integer_infix(operator, *left_value, *right_value),
        (
            Value::Boolean { value: left_value },
            Value::Boolean { value: right_value }
        ) => match operator {
            "==" => Value::from(left_value == right_value),
            "!=" => Value::from(left_value != right_value),
            _ => error(format!("unknown operator: {} {operator} {}", left._type(), right._type())),
        },
        (left, right) if left._type() != right._type() => {
            error(format!("type mismatch: {} {operator} {}", left._type(), right._type()))
        },
        (left, right) => {
            error(format!("unknown operator: {} {operator} {}", left._type(), right._type()))
        }
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::from(left.wrapping_add(right)),
        "-" => Value::from(left.wrapping_sub(right)),
        "*" => Value::from(left.wrapping_mul(right)),
        "/" => match right {
            0 => error(format!("division by zero: {left} / {right}")),
            _ => Value::from(left.wrapping_div(right)),
        },
        "<" => Value::from(left < right),
        ">" => Value::from(left > right),
        "==" => Value::from(left == right),
        "!=" => Value::from(left != right),
        _ => error(format!("unknown operator: INTEGER {operator} INTEGER")),
    }
}

fn eval_if(if_expression: &IfExpression, env: &Env) -> Value {
    let condition = eval_expression(&if_expression.condition, env);

    if condition.is_unwinding() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block(&if_expression.consequence, env)
    } else {
        match &if_expression.alternative {
            Some(alternative) => eval_block(alternative, env),
            None => NULL,
        }
    }
}

fn eval_call(call: &CallExpression, env: &Env) -> Value {
    let function = eval_expression(&call.function, env);

    if function.is_unwinding() {
        return function;
    }

    let mut arguments = Vec::with_capacity(call.arguments.len());

    for argument in &call.arguments {
        let value = eval_expression(argument, env);

        if value.is_unwinding() {
            return value;
        }

        arguments.push(value);
    }

    apply_function(function, arguments)
}

#[tracing::instrument(level = "trace", skip_all, fields(arity = arguments.len()))]
fn apply_function(function: Value, arguments: Vec<Value>) -> Value {
    let function = match function {
        Value::Function(function) => function,
        other => return error(format!("not a function: {}", other._type())),
    };

    if function.parameters.len() != arguments.len() {
        return error(format!(
            "wrong number of arguments: want={}, got={}",
            function.parameters.len(),
            arguments.len()
        ));
    }

    let extended = Environment::new_enclosed(function.env.clone());

    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        extended.borrow_mut().set(parameter.value.clone(), argument);
    }

    match eval_block(&function.body, &extended) {
        Value::ReturnValue(value) => *value,
        value => value,
    }
}

fn error(message: String) -> Value {
    debug!(%message, "evaluation error");

    Value::error(message)
}

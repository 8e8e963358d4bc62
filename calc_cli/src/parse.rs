//! Input line parsing.
//!
//! A line is either a JSON command (`{"op": "add", "a": 1, "b": 2}`) or a
//! text command: an operation name followed by whitespace-separated
//! arguments (`add 1 2`, `mean 1 2 3`, `chain_divide 0`).
//!
//! Argument tokens are read as integers (`true`/`false` are 1 and 0),
//! floats (`inf`, `-inf` and `nan` included), `null`, JSON lists or objects
//! written without spaces, and anything else as a string. Non-numeric arguments are not
//! rejected here; the calculator reports them as type errors.

use calc_core::{Command, Number, Operand};
use serde_json::Value;
use thiserror::Error;

/// Problems with the shape of an input line (as opposed to calculation errors)
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("'{op}' takes {expected} argument(s), got {actual}")]
    Arity {
        op: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid JSON command: {0}")]
    Json(String),
}

/// A parsed input line
#[derive(Debug, PartialEq)]
pub enum Line {
    /// Blank line or `#` comment
    Skip,
    /// `quit` or `exit`
    Quit,
    Command(Command),
}

pub fn parse_line(line: &str) -> Result<Line, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Line::Command)
            .map_err(|e| ParseError::Json(e.to_string()));
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["quit"] | ["exit"] => Ok(Line::Quit),
        _ => parse_words(&words).map(Line::Command),
    }
}

/// Read one argument token.
pub fn parse_token(token: &str) -> Operand {
    if let Ok(i) = token.parse::<i64>() {
        return Operand::Number(Number::Integer(i));
    }
    if let Ok(f) = token.parse::<f64>() {
        return Operand::Number(Number::Float(f));
    }
    match token {
        "null" => Operand::Other(Value::Null),
        "true" => Operand::Number(Number::Integer(1)),
        "false" => Operand::Number(Number::Integer(0)),
        _ if token.starts_with('[') || token.starts_with('{') => serde_json::from_str::<Value>(token)
            .map(Operand::from)
            .unwrap_or_else(|_| Operand::Other(Value::String(token.to_string()))),
        _ => Operand::Other(Value::String(token.to_string())),
    }
}

/// Build a command from an operation name and its argument tokens.
pub fn parse_words(words: &[&str]) -> Result<Command, ParseError> {
    let Some((&op, tokens)) = words.split_first() else {
        return Err(ParseError::UnknownOperation(String::new()));
    };
    let args: Vec<Operand> = tokens.iter().map(|t| parse_token(t)).collect();

    let command = match op {
        "add" => {
            let [a, b] = take::<2>(op, args)?;
            Command::Add { a, b }
        }
        "subtract" => {
            let [a, b] = take::<2>(op, args)?;
            Command::Subtract { a, b }
        }
        "multiply" => {
            let [a, b] = take::<2>(op, args)?;
            Command::Multiply { a, b }
        }
        "divide" => {
            let [a, b] = take::<2>(op, args)?;
            Command::Divide { a, b }
        }
        "power" => {
            let [base, exponent] = take::<2>(op, args)?;
            Command::Power { base, exponent }
        }
        "sqrt" => {
            let [n] = take::<1>(op, args)?;
            Command::Sqrt { n }
        }
        "factorial" => {
            let [n] = take::<1>(op, args)?;
            Command::Factorial { n }
        }
        "memory_store" => {
            let [value] = take::<1>(op, args)?;
            Command::MemoryStore { value }
        }
        "memory_recall" => {
            let [] = take::<0>(op, args)?;
            Command::MemoryRecall
        }
        "memory_add" => {
            let [value] = take::<1>(op, args)?;
            Command::MemoryAdd { value }
        }
        "memory_subtract" => {
            let [value] = take::<1>(op, args)?;
            Command::MemorySubtract { value }
        }
        "memory_clear" => {
            let [] = take::<0>(op, args)?;
            Command::MemoryClear
        }
        "chain" => {
            let [initial] = take::<1>(op, args)?;
            Command::Chain { initial }
        }
        "chain_add" => {
            let [value] = take::<1>(op, args)?;
            Command::ChainAdd { value }
        }
        "chain_subtract" => {
            let [value] = take::<1>(op, args)?;
            Command::ChainSubtract { value }
        }
        "chain_multiply" => {
            let [value] = take::<1>(op, args)?;
            Command::ChainMultiply { value }
        }
        "chain_divide" => {
            let [value] = take::<1>(op, args)?;
            Command::ChainDivide { value }
        }
        "chain_power" => {
            let [value] = take::<1>(op, args)?;
            Command::ChainPower { value }
        }
        "get_result" | "result" => {
            let [] = take::<0>(op, args)?;
            Command::GetResult
        }
        "reset_chain" => {
            let [] = take::<0>(op, args)?;
            Command::ResetChain
        }
        "pi" | "get_pi" => {
            let [] = take::<0>(op, args)?;
            Command::Pi
        }
        "e" | "get_e" => {
            let [] = take::<0>(op, args)?;
            Command::E
        }
        "mean" => Command::Mean {
            numbers: list_argument(args),
        },
        "median" => Command::Median {
            numbers: list_argument(args),
        },
        "mode" => Command::Mode {
            numbers: list_argument(args),
        },
        other => return Err(ParseError::UnknownOperation(other.to_string())),
    };
    Ok(command)
}

fn take<const N: usize>(op: &str, args: Vec<Operand>) -> Result<[Operand; N], ParseError> {
    <[Operand; N]>::try_from(args).map_err(|args| ParseError::Arity {
        op: op.to_string(),
        expected: N,
        actual: args.len(),
    })
}

/// `mean 1 2 3` and `mean [1,2,3]` both mean the list `[1, 2, 3]`.
fn list_argument(mut args: Vec<Operand>) -> Operand {
    if args.len() == 1 && matches!(args[0], Operand::List(_)) {
        return args.remove(0);
    }
    Operand::List(args)
}

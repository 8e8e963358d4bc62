//! # Commands and Sessions
//!
//! A JSON-serializable request/response layer over [`Calculator`]. Each
//! [`Command`] names one calculator operation and carries its arguments as
//! untyped [`Operand`]s, so this is where non-numeric input is caught and
//! reported as `TypeKind`.
//!
//! Check order matches the typed API's contract:
//!
//! - chain steps verify the chain is active before looking at their operand
//! - statistics report an empty list before inspecting element types
//! - every check runs before any state is touched
//!
//! ## JSON Example
//!
//! ```json
//! {"op": "chain", "initial": 10}
//! {"op": "chain_add", "value": 5}
//! {"op": "mean", "numbers": [1, 2, 3]}
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::session::{Command, Output, Session};
//!
//! let mut session = Session::new();
//! let cmd: Command = serde_json::from_str(r#"{"op": "add", "a": 2, "b": 3}"#).unwrap();
//! assert_eq!(session.execute(&cmd).unwrap(), Output::Value { value: 5.0 });
//!
//! let bad: Command = serde_json::from_str(r#"{"op": "sqrt", "n": "four"}"#).unwrap();
//! assert_eq!(session.execute(&bad).unwrap_err().error_code(), "TYPE_ERROR");
//! ```

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calculator::{Calculator, ChainState};
use crate::errors::CalcResult;
use crate::number::{Number, Operand};

/// One calculator operation with untyped arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Add { a: Operand, b: Operand },
    Subtract { a: Operand, b: Operand },
    Multiply { a: Operand, b: Operand },
    Divide { a: Operand, b: Operand },
    Power { base: Operand, exponent: Operand },
    Sqrt { n: Operand },
    Factorial { n: Operand },
    MemoryStore { value: Operand },
    MemoryRecall,
    MemoryAdd { value: Operand },
    MemorySubtract { value: Operand },
    MemoryClear,
    Chain { initial: Operand },
    ChainAdd { value: Operand },
    ChainSubtract { value: Operand },
    ChainMultiply { value: Operand },
    ChainDivide { value: Operand },
    ChainPower { value: Operand },
    GetResult,
    ResetChain,
    Pi,
    E,
    Mean { numbers: Operand },
    Median { numbers: Operand },
    Mode { numbers: Operand },
}

/// Result of a successfully executed [`Command`].
///
/// Non-finite floats are written as the strings `"inf"`, `"-inf"` and
/// `"nan"`, and exact integers as decimal strings, so no result is lost in
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    /// A floating-point result
    Value {
        #[serde(with = "wire::float")]
        value: f64,
    },
    /// An exact integer result (factorial)
    Integer {
        #[serde(with = "wire::big_integer")]
        value: BigUint,
    },
    /// A value returned in its original representation (mode)
    Number {
        #[serde(with = "wire::number")]
        value: Number,
    },
    /// Running value after a chain step
    Chain {
        #[serde(with = "wire::float")]
        value: f64,
    },
    /// The command only changed state
    Done,
}

impl Command {
    /// The command's `op` tag
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Subtract { .. } => "subtract",
            Command::Multiply { .. } => "multiply",
            Command::Divide { .. } => "divide",
            Command::Power { .. } => "power",
            Command::Sqrt { .. } => "sqrt",
            Command::Factorial { .. } => "factorial",
            Command::MemoryStore { .. } => "memory_store",
            Command::MemoryRecall => "memory_recall",
            Command::MemoryAdd { .. } => "memory_add",
            Command::MemorySubtract { .. } => "memory_subtract",
            Command::MemoryClear => "memory_clear",
            Command::Chain { .. } => "chain",
            Command::ChainAdd { .. } => "chain_add",
            Command::ChainSubtract { .. } => "chain_subtract",
            Command::ChainMultiply { .. } => "chain_multiply",
            Command::ChainDivide { .. } => "chain_divide",
            Command::ChainPower { .. } => "chain_power",
            Command::GetResult => "get_result",
            Command::ResetChain => "reset_chain",
            Command::Pi => "pi",
            Command::E => "e",
            Command::Mean { .. } => "mean",
            Command::Median { .. } => "median",
            Command::Mode { .. } => "mode",
        }
    }

    /// Validate the operands and run the operation against `calc`.
    pub fn execute(&self, calc: &mut Calculator) -> CalcResult<Output> {
        let output = match self {
            Command::Add { a, b } => Output::Value {
                value: calc.add(a.to_number()?, b.to_number()?),
            },
            Command::Subtract { a, b } => Output::Value {
                value: calc.subtract(a.to_number()?, b.to_number()?),
            },
            Command::Multiply { a, b } => Output::Value {
                value: calc.multiply(a.to_number()?, b.to_number()?),
            },
            Command::Divide { a, b } => Output::Value {
                value: calc.divide(a.to_number()?, b.to_number()?)?,
            },
            Command::Power { base, exponent } => Output::Value {
                value: calc.power(base.to_number()?, exponent.to_number()?),
            },
            Command::Sqrt { n } => Output::Value {
                value: calc.sqrt(n.to_number()?)?,
            },
            Command::Factorial { n } => Output::Integer {
                value: calc.factorial(n.to_number()?)?,
            },
            Command::MemoryStore { value } => {
                calc.memory_store(value.to_number()?);
                Output::Done
            }
            Command::MemoryRecall => Output::Value {
                value: calc.memory_recall(),
            },
            Command::MemoryAdd { value } => {
                calc.memory_add(value.to_number()?);
                Output::Done
            }
            Command::MemorySubtract { value } => {
                calc.memory_subtract(value.to_number()?);
                Output::Done
            }
            Command::MemoryClear => {
                calc.memory_clear();
                Output::Done
            }
            Command::Chain { initial } => chain_output(calc.chain(initial.to_number()?))?,
            Command::ChainAdd { value } => {
                let value = chain_operand(calc, "chain_add", value)?;
                chain_output(calc.chain_add(value)?)?
            }
            Command::ChainSubtract { value } => {
                let value = chain_operand(calc, "chain_subtract", value)?;
                chain_output(calc.chain_subtract(value)?)?
            }
            Command::ChainMultiply { value } => {
                let value = chain_operand(calc, "chain_multiply", value)?;
                chain_output(calc.chain_multiply(value)?)?
            }
            Command::ChainDivide { value } => {
                let value = chain_operand(calc, "chain_divide", value)?;
                chain_output(calc.chain_divide(value)?)?
            }
            Command::ChainPower { value } => {
                let value = chain_operand(calc, "chain_power", value)?;
                chain_output(calc.chain_power(value)?)?
            }
            Command::GetResult => Output::Value {
                value: calc.get_result()?,
            },
            Command::ResetChain => {
                calc.reset_chain();
                Output::Done
            }
            Command::Pi => Output::Value {
                value: Calculator::get_pi(),
            },
            Command::E => Output::Value {
                value: Calculator::get_e(),
            },
            Command::Mean { numbers } => Output::Value {
                value: calc.mean(&numbers.to_numbers()?)?,
            },
            Command::Median { numbers } => Output::Value {
                value: calc.median(&numbers.to_numbers()?)?,
            },
            Command::Mode { numbers } => Output::Number {
                value: calc.mode(&numbers.to_numbers()?)?,
            },
        };
        Ok(output)
    }
}

/// Chain steps report an inactive chain ahead of a bad operand.
fn chain_operand(calc: &Calculator, operation: &str, value: &Operand) -> CalcResult<Number> {
    calc.ensure_chain_active(operation)?;
    value.to_number()
}

fn chain_output(calc: &mut Calculator) -> CalcResult<Output> {
    Ok(Output::Chain {
        value: calc.get_result()?,
    })
}

/// A calculator plus bookkeeping for a sequence of commands.
#[derive(Debug, Clone, Default)]
pub struct Session {
    calculator: Calculator,
    executed: usize,
    failed: usize,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Run one command; failures are counted and returned unchanged.
    pub fn execute(&mut self, command: &Command) -> CalcResult<Output> {
        let before = self.calculator.chain_state();
        debug!(op = command.name(), "executing command");

        self.executed += 1;
        let result = command.execute(&mut self.calculator);

        match &result {
            Ok(_) => {
                let after = self.calculator.chain_state();
                if before.is_active() != after.is_active() {
                    trace!(
                        op = command.name(),
                        active = after.is_active(),
                        "chain state changed"
                    );
                }
            }
            Err(e) => {
                self.failed += 1;
                debug!(op = command.name(), code = e.error_code(), "command failed");
            }
        }
        result
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn chain_state(&self) -> ChainState {
        self.calculator.chain_state()
    }

    /// Number of commands executed, including failed ones
    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}

/// JSON encodings for values serde_json cannot represent as numbers.
mod wire {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    fn non_finite_name(value: f64) -> Option<&'static str> {
        if value.is_nan() {
            Some("nan")
        } else if value == f64::INFINITY {
            Some("inf")
        } else if value == f64::NEG_INFINITY {
            Some("-inf")
        } else {
            None
        }
    }

    fn parse_non_finite<E: serde::de::Error>(name: &str) -> Result<f64, E> {
        match name {
            "nan" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => Err(E::custom(format!("expected a number, \"inf\", \"-inf\" or \"nan\", got \"{other}\""))),
        }
    }

    pub mod float {
        use super::*;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Name(String),
        }

        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            match non_finite_name(*value) {
                Some(name) => serializer.serialize_str(name),
                None => serializer.serialize_f64(*value),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Number(value) => Ok(value),
                Repr::Name(name) => parse_non_finite(&name),
            }
        }
    }

    pub mod number {
        use super::*;
        use crate::number::Number;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Number),
            Name(String),
        }

        pub fn serialize<S: Serializer>(value: &Number, serializer: S) -> Result<S::Ok, S::Error> {
            match *value {
                Number::Float(f) if !f.is_finite() => super::float::serialize(&f, serializer),
                other => other.serialize(serializer),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Number(value) => Ok(value),
                Repr::Name(name) => parse_non_finite(&name).map(Number::Float),
            }
        }
    }

    pub mod big_integer {
        use super::*;
        use num_bigint::BigUint;
        use serde::de::Error as _;

        pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(value)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
            let digits = String::deserialize(deserializer)?;
            digits
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid integer \"{digits}\"")))
        }
    }
}

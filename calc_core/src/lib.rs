//! # calc_core - Calculator Engine
//!
//! `calc_core` provides arithmetic, memory-register, chained and statistical
//! operations behind a small typed API, plus a JSON command layer for
//! callers whose input arrives untyped.
//!
//! ## Design Philosophy
//!
//! - **Typed at the edge**: operands are [`Number`]s, so non-numeric input
//!   cannot reach the arithmetic
//! - **Explicit failures**: every fallible operation returns [`CalcResult`]
//! - **No partial updates**: validation runs before any state changes
//! - **JSON-First**: commands, outputs, errors and state are all serializable
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::Calculator;
//!
//! let mut calc = Calculator::new();
//! assert_eq!(calc.add(2, 3), 5.0);
//! assert!(calc.divide(1, 0).is_err());
//!
//! calc.memory_store(10);
//! calc.memory_add(5);
//! calc.memory_subtract(3);
//! assert_eq!(calc.memory_recall(), 12.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - The `Calculator` and its chain state machine
//! - [`statistics`] - Mean, median and mode
//! - [`number`] - Typed and dynamic operand types
//! - [`session`] - JSON-serializable commands and sessions
//! - [`errors`] - Structured error types

pub mod calculator;
pub mod errors;
pub mod number;
pub mod session;
pub mod statistics;

// Re-export commonly used types at crate root for convenience
pub use calculator::{Calculator, ChainState};
pub use errors::{CalcError, CalcResult};
pub use number::{Number, Operand};
pub use session::{Command, Output, Session};

// Exact factorial results
pub use num_bigint::BigUint;

//! # Calculator
//!
//! A stateful value object with pure arithmetic operations plus two
//! independent pieces of session state:
//!
//! - **memory register**: an `f64` that starts at 0 and is only touched by
//!   the `memory_*` operations
//! - **chain accumulator**: a [`ChainState`] driven by `chain()` and the
//!   `chain_*` steps, read with `get_result()`
//!
//! Operations that can fail return [`CalcResult`]; a failed call never
//! mutates state.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::{Calculator, CalcResult};
//!
//! fn run() -> CalcResult<f64> {
//!     let mut calc = Calculator::new();
//!     calc.chain(10)
//!         .chain_add(5)?
//!         .chain_multiply(2)?
//!         .chain_subtract(10)?
//!         .chain_divide(4)?
//!         .get_result()
//! }
//!
//! assert_eq!(run().unwrap(), 5.0);
//! ```

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::number::Number;
use crate::statistics;

/// State of the chain accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ChainState {
    /// No chain started, or the chain was reset
    #[default]
    Uninitialized,
    /// A chain is in progress with the given running value
    Active(f64),
}

impl ChainState {
    /// Running value, if a chain is active
    pub fn value(self) -> Option<f64> {
        match self {
            ChainState::Uninitialized => None,
            ChainState::Active(v) => Some(v),
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, ChainState::Active(_))
    }
}

/// Calculator with a memory register and a chain accumulator.
///
/// Instances are independent; nothing is shared between them and nothing
/// outlives the instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calculator {
    memory: f64,
    chain: ChainState,
}

/// Apply an integer operation exactly when it fits in i64, otherwise fall
/// back to the float operation.
fn exact_or_float(
    a: Number,
    b: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> f64 {
    if let (Number::Integer(x), Number::Integer(y)) = (a, b) {
        if let Some(v) = int_op(x, y) {
            return v as f64;
        }
    }
    float_op(a.as_f64(), b.as_f64())
}

impl Calculator {
    /// Create a calculator with memory 0 and no active chain.
    pub fn new() -> Self {
        Calculator::default()
    }

    // ------------------------------------------------------------------
    // Basic arithmetic
    // ------------------------------------------------------------------

    /// Sum of `a` and `b`.
    pub fn add(&self, a: impl Into<Number>, b: impl Into<Number>) -> f64 {
        exact_or_float(a.into(), b.into(), i64::checked_add, |x, y| x + y)
    }

    /// Difference `a - b`.
    pub fn subtract(&self, a: impl Into<Number>, b: impl Into<Number>) -> f64 {
        exact_or_float(a.into(), b.into(), i64::checked_sub, |x, y| x - y)
    }

    /// Product of `a` and `b`.
    pub fn multiply(&self, a: impl Into<Number>, b: impl Into<Number>) -> f64 {
        exact_or_float(a.into(), b.into(), i64::checked_mul, |x, y| x * y)
    }

    /// Quotient `a / b`.
    ///
    /// Fails with [`CalcError::DivisionByZero`] when `b` is exactly zero,
    /// whatever `a` is (including `0` and `inf`).
    pub fn divide(&self, a: impl Into<Number>, b: impl Into<Number>) -> CalcResult<f64> {
        let (a, b) = (a.into(), b.into());
        if b.is_zero() {
            return Err(CalcError::division_by_zero("divide"));
        }
        Ok(a.as_f64() / b.as_f64())
    }

    // ------------------------------------------------------------------
    // Advanced operations
    // ------------------------------------------------------------------

    /// `base` raised to `exponent` using real floating-point exponentiation.
    ///
    /// A negative base with a fractional exponent yields NaN.
    pub fn power(&self, base: impl Into<Number>, exponent: impl Into<Number>) -> f64 {
        base.into().as_f64().powf(exponent.into().as_f64())
    }

    /// Non-negative square root of `n`.
    pub fn sqrt(&self, n: impl Into<Number>) -> CalcResult<f64> {
        let n = n.into().as_f64();
        if n < 0.0 {
            return Err(CalcError::invalid_operation(
                "sqrt",
                "Cannot calculate square root of negative number",
            ));
        }
        Ok(n.sqrt())
    }

    /// Exact factorial of a non-negative integral value.
    ///
    /// Floats are accepted when they have no fractional part (`5.0` is 5).
    pub fn factorial(&self, n: impl Into<Number>) -> CalcResult<BigUint> {
        let n = n.into();
        if n.as_f64() < 0.0 {
            return Err(CalcError::invalid_operation(
                "factorial",
                "Factorial is not defined for negative numbers",
            ));
        }
        if !n.is_integral() {
            return Err(CalcError::invalid_operation(
                "factorial",
                "Factorial is only defined for integers",
            ));
        }
        let k = match n {
            Number::Integer(i) => i as u64,
            Number::Float(f) => f as u64,
        };
        Ok((2..=k).fold(BigUint::from(1u32), |acc, i| acc * i))
    }

    // ------------------------------------------------------------------
    // Memory register
    // ------------------------------------------------------------------

    /// Overwrite the memory register.
    pub fn memory_store(&mut self, value: impl Into<Number>) {
        self.memory = value.into().as_f64();
    }

    /// Current memory value (0 if nothing was stored).
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    pub fn memory_add(&mut self, value: impl Into<Number>) {
        self.memory += value.into().as_f64();
    }

    pub fn memory_subtract(&mut self, value: impl Into<Number>) {
        self.memory -= value.into().as_f64();
    }

    /// Reset memory to 0.
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    // ------------------------------------------------------------------
    // Chain accumulator
    // ------------------------------------------------------------------

    /// Start (or restart) a chain with `initial` as the running value.
    pub fn chain(&mut self, initial: impl Into<Number>) -> &mut Self {
        self.chain = ChainState::Active(initial.into().as_f64());
        self
    }

    pub fn chain_add(&mut self, value: impl Into<Number>) -> CalcResult<&mut Self> {
        let value = value.into().as_f64();
        self.apply_chain("chain_add", |current| current + value)
    }

    pub fn chain_subtract(&mut self, value: impl Into<Number>) -> CalcResult<&mut Self> {
        let value = value.into().as_f64();
        self.apply_chain("chain_subtract", |current| current - value)
    }

    pub fn chain_multiply(&mut self, value: impl Into<Number>) -> CalcResult<&mut Self> {
        let value = value.into().as_f64();
        self.apply_chain("chain_multiply", |current| current * value)
    }

    /// Divide the running value; a zero divisor is reported only once the
    /// chain is known to be active.
    pub fn chain_divide(&mut self, value: impl Into<Number>) -> CalcResult<&mut Self> {
        let value = value.into();
        self.ensure_chain_active("chain_divide")?;
        if value.is_zero() {
            return Err(CalcError::division_by_zero("chain_divide"));
        }
        let divisor = value.as_f64();
        self.apply_chain("chain_divide", |current| current / divisor)
    }

    pub fn chain_power(&mut self, value: impl Into<Number>) -> CalcResult<&mut Self> {
        let exponent = value.into().as_f64();
        self.apply_chain("chain_power", |current| current.powf(exponent))
    }

    /// Running value of the active chain.
    pub fn get_result(&self) -> CalcResult<f64> {
        self.chain
            .value()
            .ok_or_else(|| CalcError::chain_not_initialized("get_result"))
    }

    /// Return the chain to its uninitialized state. Never fails.
    pub fn reset_chain(&mut self) {
        self.chain = ChainState::Uninitialized;
    }

    pub fn chain_state(&self) -> ChainState {
        self.chain
    }

    /// Fail with `InvalidOperation` unless a chain is active.
    pub fn ensure_chain_active(&self, operation: &str) -> CalcResult<()> {
        if self.chain.is_active() {
            Ok(())
        } else {
            Err(CalcError::chain_not_initialized(operation))
        }
    }

    fn apply_chain(&mut self, operation: &str, step: impl FnOnce(f64) -> f64) -> CalcResult<&mut Self> {
        let current = self
            .chain
            .value()
            .ok_or_else(|| CalcError::chain_not_initialized(operation))?;
        self.chain = ChainState::Active(step(current));
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Constants
    // ------------------------------------------------------------------

    pub fn get_pi() -> f64 {
        std::f64::consts::PI
    }

    pub fn get_e() -> f64 {
        std::f64::consts::E
    }

    // ------------------------------------------------------------------
    // Statistics (stateless, see [`crate::statistics`])
    // ------------------------------------------------------------------

    pub fn mean(&self, numbers: &[Number]) -> CalcResult<f64> {
        statistics::mean(numbers)
    }

    pub fn median(&self, numbers: &[Number]) -> CalcResult<f64> {
        statistics::median(numbers)
    }

    pub fn mode(&self, numbers: &[Number]) -> CalcResult<Number> {
        statistics::mode(numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> Calculator {
        Calculator::new()
    }

    #[test]
    fn test_add() {
        let c = calc();
        assert_eq!(c.add(2, 3), 5.0);
        assert_eq!(c.add(-2, -3), -5.0);
        assert_eq!(c.add(10, -15), -5.0);
        assert_eq!(c.add(1.5, 2.5), 4.0);
        assert!((c.add(0.1, 0.2) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_add_large_integers_is_exact_before_conversion() {
        let c = calc();
        let big = 9_007_199_254_740_993i64; // 2^53 + 1
        assert_eq!(c.subtract(big, 1), 9_007_199_254_740_992.0);
        // Overflowing i64 falls back to float arithmetic
        assert_eq!(c.add(i64::MAX, i64::MAX), 2.0 * i64::MAX as f64);
    }

    #[test]
    fn test_subtract_and_multiply() {
        let c = calc();
        assert_eq!(c.subtract(5, 3), 2.0);
        assert_eq!(c.subtract(-5, 5), -10.0);
        assert_eq!(c.multiply(3, 4), 12.0);
        assert_eq!(c.multiply(-3, 4), -12.0);
        assert_eq!(c.multiply(2.5, 4), 10.0);
    }

    #[test]
    fn test_divide() {
        let c = calc();
        assert_eq!(c.divide(10, 2).unwrap(), 5.0);
        assert_eq!(c.divide(7, 2).unwrap(), 3.5);
        assert!((c.divide(1, 3).unwrap() - 0.333_333_333_333).abs() < 1e-9);
        assert_eq!(c.divide(-10, 2).unwrap(), -5.0);
    }

    #[test]
    fn test_divide_by_zero() {
        let c = calc();
        for numerator in [Number::Integer(10), Number::Integer(0), Number::Float(f64::INFINITY)] {
            assert_eq!(
                c.divide(numerator, 0).unwrap_err(),
                CalcError::division_by_zero("divide")
            );
        }
        assert!(c.divide(1, 0.0).is_err());
        assert!(c.divide(1, -0.0).is_err());
    }

    #[test]
    fn test_special_floats_propagate() {
        let c = calc();
        assert_eq!(c.add(f64::INFINITY, 1), f64::INFINITY);
        assert!(c.add(f64::NAN, 1).is_nan());
        assert!(c.multiply(f64::INFINITY, 0).is_nan());
        assert_eq!(c.divide(1, f64::INFINITY).unwrap(), 0.0);
    }

    #[test]
    fn test_power() {
        let c = calc();
        assert_eq!(c.power(2, 3), 8.0);
        assert_eq!(c.power(5, 0), 1.0);
        assert_eq!(c.power(2, -1), 0.5);
        assert!((c.power(4, 0.5) - 2.0).abs() < 1e-12);
        assert!(c.power(-8, 1.0 / 3.0).is_nan());
    }

    #[test]
    fn test_sqrt() {
        let c = calc();
        assert_eq!(c.sqrt(4).unwrap(), 2.0);
        assert_eq!(c.sqrt(0).unwrap(), 0.0);
        assert!((c.sqrt(2).unwrap() - std::f64::consts::SQRT_2).abs() < 1e-12);

        let err = c.sqrt(-1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_OPERATION");
        assert!(err.to_string().contains("square root of negative number"));
    }

    #[test]
    fn test_factorial() {
        let c = calc();
        assert_eq!(c.factorial(0).unwrap(), BigUint::from(1u32));
        assert_eq!(c.factorial(1).unwrap(), BigUint::from(1u32));
        assert_eq!(c.factorial(5).unwrap(), BigUint::from(120u32));
        assert_eq!(c.factorial(10).unwrap(), BigUint::from(3_628_800u32));
        assert_eq!(c.factorial(5.0).unwrap(), BigUint::from(120u32));
    }

    #[test]
    fn test_factorial_beyond_machine_integers() {
        let c = calc();
        assert_eq!(
            c.factorial(35).unwrap().to_string(),
            "10333147966386144929666651337523200000000"
        );
        assert_eq!(
            c.factorial(100).unwrap().to_string(),
            "93326215443944152681699238856266700490715968264381621468592963895217599993229915608941463976156518286253697920827223758251185210916864000000000000000000000000"
        );
        assert_eq!(c.factorial(100.0).unwrap(), c.factorial(100).unwrap());
    }

    #[test]
    fn test_factorial_rejects_invalid_input() {
        let c = calc();
        let negative = c.factorial(-1).unwrap_err();
        assert!(negative.to_string().contains("negative"));

        let fractional = c.factorial(5.5).unwrap_err();
        assert!(fractional.to_string().contains("only defined for integers"));

        assert!(c.factorial(f64::NAN).is_err());
        assert!(c.factorial(f64::INFINITY).is_err());
    }

    #[test]
    fn test_memory_operations() {
        let mut c = calc();
        assert_eq!(c.memory_recall(), 0.0);

        c.memory_store(10);
        c.memory_add(5);
        c.memory_subtract(3);
        assert_eq!(c.memory_recall(), 12.0);

        c.memory_store(2.5);
        assert_eq!(c.memory_recall(), 2.5);

        c.memory_clear();
        assert_eq!(c.memory_recall(), 0.0);
    }

    #[test]
    fn test_memory_and_chain_are_independent() {
        let mut c = calc();
        c.memory_store(42);
        c.chain(1).chain_add(1).unwrap();
        c.reset_chain();
        assert_eq!(c.memory_recall(), 42.0);

        c.chain(7);
        c.memory_clear();
        assert_eq!(c.get_result().unwrap(), 7.0);
    }

    #[test]
    fn test_chain_operations() {
        let mut c = calc();
        let result = c
            .chain(10)
            .chain_add(5)
            .and_then(|c| c.chain_multiply(2))
            .and_then(|c| c.chain_subtract(10))
            .and_then(|c| c.chain_divide(4))
            .and_then(|c| c.get_result())
            .unwrap();
        assert_eq!(result, 5.0);

        c.chain(2).chain_power(3).unwrap();
        assert_eq!(c.get_result().unwrap(), 8.0);
    }

    #[test]
    fn test_chain_requires_initialization() {
        let mut c = calc();
        assert_eq!(c.chain_state(), ChainState::Uninitialized);
        assert_eq!(
            c.chain_add(1).unwrap_err(),
            CalcError::chain_not_initialized("chain_add")
        );
        assert!(c.chain_subtract(1).is_err());
        assert!(c.chain_multiply(1).is_err());
        assert!(c.chain_power(1).is_err());
        assert!(c.get_result().is_err());
        assert_eq!(c.chain_state(), ChainState::Uninitialized);
    }

    #[test]
    fn test_chain_divide_checks_state_before_zero() {
        let mut c = calc();
        assert_eq!(
            c.chain_divide(0).unwrap_err().error_code(),
            "INVALID_OPERATION"
        );

        c.chain(10);
        assert_eq!(
            c.chain_divide(0).unwrap_err(),
            CalcError::division_by_zero("chain_divide")
        );
        // Failed step leaves the running value untouched
        assert_eq!(c.get_result().unwrap(), 10.0);
    }

    #[test]
    fn test_reset_chain() {
        let mut c = calc();
        c.reset_chain();
        assert!(c.get_result().is_err());

        c.chain(5);
        c.reset_chain();
        assert!(c.get_result().is_err());
        assert!(c.chain_add(1).is_err());

        c.chain(3);
        assert_eq!(c.get_result().unwrap(), 3.0);
    }

    #[test]
    fn test_constants() {
        assert!((Calculator::get_pi() - 3.141_592_653_589_793).abs() < 1e-15);
        assert!((Calculator::get_e() - 2.718_281_828_459_045).abs() < 1e-15);
    }

    #[test]
    fn test_state_serialization() {
        let mut c = calc();
        c.memory_store(3);
        c.chain(1.5);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"memory":3.0,"chain":{"state":"active","value":1.5}}"#);

        let roundtrip: Calculator = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.chain_state(), ChainState::Active(1.5));

        let empty = serde_json::to_string(&ChainState::Uninitialized).unwrap();
        assert_eq!(empty, r#"{"state":"uninitialized"}"#);
    }
}

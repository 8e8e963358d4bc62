//! Property tests for the calculator's arithmetic and state contracts.

use calc_core::{CalcError, Calculator, Number};
use proptest::prelude::*;

fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * scale
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn number() -> impl Strategy<Value = Number> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(Number::Integer),
        finite().prop_map(Number::Float),
    ]
}

proptest! {
    #[test]
    fn subtract_inverts_add(a in number(), b in number()) {
        let calc = Calculator::new();
        let sum = calc.add(a, b);
        prop_assert!(approx_eq(calc.subtract(sum, b), a.as_f64()));
    }

    #[test]
    fn multiply_inverts_divide(a in number(), b in number()) {
        prop_assume!(!b.is_zero());
        let calc = Calculator::new();
        let quotient = calc.divide(a, b).unwrap();
        prop_assert!(approx_eq(calc.multiply(quotient, b), a.as_f64()));
    }

    #[test]
    fn divide_by_zero_always_fails(a in number()) {
        let calc = Calculator::new();
        prop_assert_eq!(calc.divide(a, 0).unwrap_err(), CalcError::division_by_zero("divide"));
        prop_assert!(calc.divide(a, 0.0).is_err());
    }

    #[test]
    fn sqrt_squares_back(n in 0.0..1.0e9f64) {
        let calc = Calculator::new();
        let root = calc.sqrt(n).unwrap();
        prop_assert!(root >= 0.0);
        prop_assert!(approx_eq(root * root, n));
    }

    #[test]
    fn sqrt_rejects_negatives(n in -1.0e9..-1.0e-9f64) {
        let calc = Calculator::new();
        prop_assert_eq!(calc.sqrt(n).unwrap_err().error_code(), "INVALID_OPERATION");
    }

    #[test]
    fn factorial_rejects_negative_and_fractional(n in -100i64..0, frac in 0.01..0.99f64) {
        let calc = Calculator::new();
        prop_assert!(calc.factorial(n).is_err());
        prop_assert!(calc.factorial(n.unsigned_abs() as f64 + frac).is_err());
    }

    #[test]
    fn factorial_recurrence(n in 1u32..200) {
        let calc = Calculator::new();
        let prev = calc.factorial(n - 1).unwrap();
        prop_assert_eq!(calc.factorial(n).unwrap(), prev * n);
    }

    #[test]
    fn memory_tracks_running_total(values in prop::collection::vec(-1000i64..1000, 0..20)) {
        let mut calc = Calculator::new();
        for v in &values {
            calc.memory_add(*v);
        }
        prop_assert_eq!(calc.memory_recall(), values.iter().sum::<i64>() as f64);
    }

    #[test]
    fn chain_steps_fail_until_initialized(value in number()) {
        let mut calc = Calculator::new();
        prop_assert!(calc.chain_add(value).is_err());
        prop_assert!(calc.chain_subtract(value).is_err());
        prop_assert!(calc.chain_multiply(value).is_err());
        prop_assert!(calc.chain_divide(value).is_err());
        prop_assert!(calc.chain_power(value).is_err());
        prop_assert!(calc.get_result().is_err());

        calc.chain(value);
        prop_assert_eq!(calc.get_result().unwrap(), value.as_f64());

        calc.reset_chain();
        prop_assert!(calc.chain_add(value).is_err());
        prop_assert!(calc.get_result().is_err());
    }

    #[test]
    fn mode_is_a_most_frequent_element(values in prop::collection::vec(0i64..5, 1..30)) {
        let calc = Calculator::new();
        let numbers: Vec<Number> = values.iter().copied().map(Number::from).collect();
        let mode = calc.mode(&numbers).unwrap();

        let count_of = |x: i64| values.iter().filter(|&&v| v == x).count();
        let Number::Integer(m) = mode else {
            panic!("integer input produced a float mode");
        };
        let best = values.iter().map(|&v| count_of(v)).max().unwrap();
        prop_assert_eq!(count_of(m), best);

        // First-occurrence tie-break
        let first = values.iter().copied().find(|&v| count_of(v) == best).unwrap();
        prop_assert_eq!(m, first);
    }

    #[test]
    fn median_is_bounded(values in prop::collection::vec(finite(), 1..30)) {
        let calc = Calculator::new();
        let numbers: Vec<Number> = values.iter().copied().map(Number::from).collect();
        let median = calc.median(&numbers).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(min <= median && median <= max);
    }
}

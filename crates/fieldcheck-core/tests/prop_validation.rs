//! Property-based tests for rule evaluation and traversal
//!
//! These tests verify that built-in rules and dives behave consistently
//! across a wide range of inputs.

use fieldcheck_core::{FieldRules, Validator};
use proptest::prelude::*;

/// Strategy for text that may or may not be empty
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 ]{1,20}",
        "[äöüß]{1,5}",
    ]
}

/// Strategy for arbitrary rule expressions built from grammar fragments
fn expression_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("required".to_string()),
        Just("dive".to_string()),
        Just("keys".to_string()),
        Just("endkeys".to_string()),
        Just("omitempty".to_string()),
        Just("-".to_string()),
        Just(String::new()),
        "[a-z]{1,6}(=[a-z0-9]{0,3})?",
        "[a-z]{1,4}\\|[a-z]{1,4}",
        "[ ,|=a-z]{0,6}",
    ];
    proptest::collection::vec(fragment, 0..8).prop_map(|parts| parts.join(","))
}

proptest! {
    #[test]
    fn prop_required_matches_emptiness(value in text_strategy()) {
        let validator = Validator::new();
        let errors = validator.validate_var(&value, "required").unwrap();
        prop_assert_eq!(errors.is_empty(), !value.is_empty());
    }

    #[test]
    fn prop_min_max_count_characters(value in text_strategy(), bound in 0usize..25) {
        let validator = Validator::new();
        let length = value.chars().count();

        let min = validator.validate_var(&value, &format!("min={}", bound)).unwrap();
        prop_assert_eq!(min.is_empty(), length >= bound);

        let max = validator.validate_var(&value, &format!("max={}", bound)).unwrap();
        prop_assert_eq!(max.is_empty(), length <= bound);
    }

    #[test]
    fn prop_numeric_comparisons(value in any::<i64>(), bound in any::<i64>()) {
        let validator = Validator::new();

        let gt = validator.validate_var(&value, &format!("gt={}", bound)).unwrap();
        prop_assert_eq!(gt.is_empty(), value > bound);

        let lte = validator.validate_var(&value, &format!("lte={}", bound)).unwrap();
        prop_assert_eq!(lte.is_empty(), value <= bound);
    }

    #[test]
    fn prop_dive_reports_one_error_per_empty_element(
        values in proptest::collection::vec(text_strategy(), 0..10)
    ) {
        let validator = Validator::new();
        let errors = validator.validate_var(&values, "dive,required").unwrap();

        let empty: Vec<String> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_empty())
            .map(|(index, _)| format!("[{}]", index))
            .collect();
        let paths: Vec<String> = errors.iter().map(|error| error.path.clone()).collect();
        prop_assert_eq!(paths, empty);
    }

    #[test]
    fn prop_parser_never_panics(expression in expression_strategy()) {
        let _ = FieldRules::parse(&expression);
    }

    #[test]
    fn prop_compile_agrees_with_parse(expression in expression_strategy()) {
        let validator = Validator::new();
        if FieldRules::parse(&expression).is_err() {
            prop_assert!(validator.compile(&expression).is_err());
        }
    }
}

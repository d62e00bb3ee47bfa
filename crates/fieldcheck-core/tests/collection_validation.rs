//! Integration tests for dives into sequences and mappings


use fieldcheck_core::{Error, Validate, Validator};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use test_support::*;

#[derive(Validate)]
struct Student {
    #[validate("required,dive,required,min=3")]
    hobbies: Vec<String>,
    #[validate("required,min=1,dive,keys,required,min=2,endkeys")]
    schools: HashMap<String, String>,
    #[validate("dive,keys,required,endkeys,required,gt=1000")]
    wallets: HashMap<String, i64>,
}

fn valid_student() -> Student {
    let mut schools = HashMap::new();
    schools.insert("SD".to_string(), "SD Indonesia".to_string());
    schools.insert("SMP".to_string(), "SMP Indonesia".to_string());

    let mut wallets = HashMap::new();
    wallets.insert("BCA".to_string(), 5_000);

    Student {
        hobbies: vec!["Reading".to_string(), "Gaming".to_string()],
        schools,
        wallets,
    }
}

#[test]
fn test_valid_collections() {
    let validator = Validator::new();
    let errors = validator.validate_struct(&valid_student()).unwrap();
    assert!(errors.is_empty(), "unexpected errors: {}", errors);
}

#[test]
fn test_dive_reports_each_failing_element() {
    let validator = Validator::new();
    let mut student = valid_student();
    student.hobbies = vec![
        "Reading".to_string(),
        "Gaming".to_string(),
        "X".to_string(),
        String::new(),
    ];

    let errors = validator.validate_struct(&student).unwrap();
    assert_eq!(
        failures(&errors),
        expected(&[("hobbies[2]", "min"), ("hobbies[3]", "required")])
    );
    assert_eq!(errors.errors()[0].field, "hobbies[2]");
}

#[test]
fn test_required_collection_stops_before_dive() {
    let validator = Validator::new();
    let mut student = valid_student();
    student.hobbies.clear();

    let errors = validator.validate_struct(&student).unwrap();
    assert_eq!(failures(&errors), expected(&[("hobbies", "required")]));
}

#[test]
fn test_key_rules_only_apply_to_keys() {
    let validator = Validator::new();
    let mut student = valid_student();
    student.schools.insert(String::new(), "SMA Indonesia".to_string());

    let errors = validator.validate_struct(&student).unwrap();
    assert_eq!(failures(&errors), expected(&[("schools{}", "required")]));
}

#[test]
fn test_value_rules_after_endkeys() {
    let validator = Validator::new();
    let mut student = valid_student();
    student.wallets.insert("BRI".to_string(), 0);
    student.wallets.insert("MANDIRI".to_string(), 1_000);

    let errors = validator.validate_struct(&student).unwrap();
    assert_eq!(
        failures(&errors),
        expected(&[("wallets[BRI]", "required"), ("wallets[MANDIRI]", "gt")])
    );
    assert_eq!(errors.errors()[1].param, "1000");
}

#[test]
fn test_elements_are_not_visited_without_dive() {
    #[derive(Validate)]
    struct History {
        #[validate("min=1")]
        addresses: Vec<Address>,
    }

    let validator = Validator::new();
    let history = History {
        addresses: vec![Address::default()],
    };
    assert!(validator.validate_struct(&history).unwrap().is_empty());
}

#[test]
fn test_dive_into_root_sequence() {
    let validator = Validator::new();
    let errors = validator
        .validate_var(&vec!["go", "", "rust"], "dive,required")
        .unwrap();
    assert_eq!(failures(&errors), expected(&[("[1]", "required")]));
}

#[test]
fn test_dive_into_optional_elements() {
    let validator = Validator::new();
    let values = vec![Some("a".to_string()), None, Some(String::new())];
    let errors = validator.validate_var(&values, "dive,required").unwrap();
    assert_eq!(
        failures(&errors),
        expected(&[("[1]", "required"), ("[2]", "required")])
    );
}

#[test]
fn test_nested_dives() {
    let validator = Validator::new();
    let matrix = vec![vec!["a".to_string(), String::new()], vec![]];
    let errors = validator
        .validate_var(&matrix, "dive,min=1,dive,required")
        .unwrap();
    assert_eq!(
        failures(&errors),
        expected(&[("[0][1]", "required"), ("[1]", "min")])
    );
}

#[test]
fn test_sets() {
    let validator = Validator::new();
    let tags: BTreeSet<String> = ["ab", "rust", "x"].iter().map(|s| s.to_string()).collect();
    let errors = validator.validate_var(&tags, "max=5,dive,min=2").unwrap();
    assert_eq!(failures(&errors), expected(&[("[2]", "min")]));
}

#[test]
fn test_dive_on_scalar_is_type_mismatch() {
    let validator = Validator::new();
    assert!(matches!(
        validator.validate_var("text", "dive,required"),
        Err(Error::TypeMismatch { rule, found, .. }) if rule == "dive" && found == "string"
    ));
}

#[test]
fn test_keys_on_sequence_is_type_mismatch() {
    let validator = Validator::new();
    assert!(matches!(
        validator.validate_var(&vec!["a"], "dive,keys,required,endkeys"),
        Err(Error::TypeMismatch { rule, .. }) if rule == "keys"
    ));
}

#[test]
fn test_json_documents() {
    let validator = Validator::new();
    let document = json!({
        "name": "Taufik",
        "email": "",
        "tags": ["a", ""],
        "manager": null
    });

    let errors = validator.validate_var(&document, "dive,required").unwrap();
    assert_eq!(
        failures(&errors),
        expected(&[("[email]", "required"), ("[manager]", "required")])
    );

    let errors = validator
        .validate_var(&document["tags"], "dive,required")
        .unwrap();
    assert_eq!(failures(&errors), expected(&[("[1]", "required")]));
}

#[test]
fn test_struct_elements_use_parent_for_cross_field_rules() {
    #[derive(Validate)]
    struct Team {
        #[validate("required")]
        lead: String,
        #[validate("dive,nefield=lead")]
        members: Vec<String>,
    }

    let validator = Validator::new();
    let team = Team {
        lead: "taufik".to_string(),
        members: vec!["akuu".to_string(), "taufik".to_string()],
    };
    let errors = validator.validate_struct(&team).unwrap();
    assert_eq!(failures(&errors), expected(&[("members[1]", "nefield")]));
}

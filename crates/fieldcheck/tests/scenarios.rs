//! End-to-end scenarios through `#[derive(Record)]`.

use fieldcheck::{Error, Record, validate};
use pretty_assertions::assert_eq;

fn message<R: Record>(record: &R) -> String {
    match validate(record) {
        Err(Error::Validation(error)) => error.to_string(),
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[derive(Record)]
struct Person {
    #[validator(rules = "required", name = "Age")]
    age: i32,
}

#[derive(Record)]
struct Named {
    #[validator(rules = "min=3", name = "Name")]
    name: String,
}

#[derive(Record)]
struct Contact {
    #[validator(rules = "email", name = "Email")]
    email: String,
}

#[derive(Record)]
struct Credentials {
    #[validator(rules = "password", name = "Pwd")]
    pwd: String,
}

#[derive(Record)]
struct Counter {
    #[validator(rules = "min=1,max=10", name = "Count")]
    count: i64,
}

#[test]
fn zero_age_is_required() {
    assert_eq!(message(&Person { age: 0 }), "Age is required");
}

#[test]
fn short_name_is_below_minimum_length() {
    assert_eq!(
        message(&Named { name: "ab".into() }),
        "Name length (2) is lower than minimum length (3)"
    );
}

#[test]
fn malformed_email_is_invalid() {
    assert_eq!(
        message(&Contact {
            email: "not-an-email".into()
        }),
        "e-mail is invalid"
    );
}

#[test]
fn password_without_digit_reports_number_first() {
    assert_eq!(
        message(&Credentials {
            pwd: "abcdefgh".into()
        }),
        "Pwd must contain at least one number"
    );
}

#[test]
fn strong_password_passes() {
    assert!(
        Credentials {
            pwd: "Abcdef1!".into()
        }
        .validate()
        .is_ok()
    );
}

#[test]
fn count_within_bounds_passes() {
    assert!(Counter { count: 5 }.validate().is_ok());
}

#[test]
fn count_outside_bounds_fails() {
    assert_eq!(
        message(&Counter { count: 0 }),
        "Count value (0) is lower than minimum value (1)"
    );
    assert_eq!(
        message(&Counter { count: 11 }),
        "Count value (11) is higher than maximum value (10)"
    );
}

#[test]
fn repeated_validation_is_identical() {
    let record = Named { name: "ab".into() };
    assert_eq!(validate(&record), validate(&record));
}

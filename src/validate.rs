//! Field validation rule sets.
//!
//! Pure functions: each takes a deserialized request body and returns the list
//! of human-readable failures, empty when the payload passes. Store-level
//! constraints (unique email, foreign keys) are still checked at insert time;
//! these rules are only the first line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::courses::dto::{CreateCourseRequest, UpdateCourseRequest};
use crate::users::dto::CreateUserRequest;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Missing or empty counts as absent, like a falsy check.
fn require(value: Option<&str>, label: &str, errors: &mut Vec<String>) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => true,
        _ => {
            errors.push(format!("Please provide a value for \"{label}\""));
            false
        }
    }
}

pub fn new_course(req: &CreateCourseRequest) -> Vec<String> {
    let mut errors = Vec::new();
    require(req.title.as_deref(), "Title", &mut errors);
    require(req.description.as_deref(), "Description", &mut errors);
    errors
}

pub fn course_update(req: &UpdateCourseRequest) -> Vec<String> {
    let mut errors = Vec::new();
    require(req.title.as_deref(), "Title", &mut errors);
    require(req.description.as_deref(), "Description", &mut errors);
    errors
}

pub fn new_user(req: &CreateUserRequest) -> Vec<String> {
    let mut errors = Vec::new();
    require(req.first_name.as_deref(), "firstName", &mut errors);
    require(req.last_name.as_deref(), "lastName", &mut errors);
    if require(req.email_address.as_deref(), "emailAddress", &mut errors) {
        let email = req.email_address.as_deref().unwrap_or_default();
        if !is_valid_email(email) {
            errors.push("Please enter a valid email address".into());
        }
    }
    if require(req.password.as_deref(), "password", &mut errors) {
        // Characters, not bytes: a multibyte password must be measured the
        // way the client counts it.
        let len = req.password.as_deref().unwrap_or_default().chars().count();
        if !(8..=20).contains(&len) {
            errors.push("Please enter a password between 8 and 20 characters long".into());
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_req(
        first: Option<&str>,
        last: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> CreateUserRequest {
        CreateUserRequest {
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            email_address: email.map(Into::into),
            password: password.map(Into::into),
        }
    }

    #[test]
    fn valid_user_passes() {
        let req = user_req(Some("Joe"), Some("Smith"), Some("joe@x.com"), Some("longenough1"));
        assert!(new_user(&req).is_empty());
    }

    #[test]
    fn missing_user_fields_each_get_a_message() {
        let errors = new_user(&user_req(None, None, None, None));
        assert_eq!(
            errors,
            vec![
                "Please provide a value for \"firstName\"",
                "Please provide a value for \"lastName\"",
                "Please provide a value for \"emailAddress\"",
                "Please provide a value for \"password\"",
            ]
        );
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let errors = new_user(&user_req(Some(""), Some("Smith"), Some("joe@x.com"), Some("longenough1")));
        assert_eq!(errors, vec!["Please provide a value for \"firstName\""]);
    }

    #[test]
    fn bad_email_syntax_is_rejected() {
        let errors = new_user(&user_req(Some("Joe"), Some("Smith"), Some("not-an-email"), Some("longenough1")));
        assert_eq!(errors, vec!["Please enter a valid email address"]);
    }

    #[test]
    fn password_length_bounds_are_inclusive() {
        let at_min = user_req(Some("J"), Some("S"), Some("j@x.com"), Some("12345678"));
        assert!(new_user(&at_min).is_empty());
        let at_max = user_req(Some("J"), Some("S"), Some("j@x.com"), Some("12345678901234567890"));
        assert!(new_user(&at_max).is_empty());

        let short = user_req(Some("J"), Some("S"), Some("j@x.com"), Some("1234567"));
        assert_eq!(
            new_user(&short),
            vec!["Please enter a password between 8 and 20 characters long"]
        );
        let long = user_req(Some("J"), Some("S"), Some("j@x.com"), Some("123456789012345678901"));
        assert_eq!(
            new_user(&long),
            vec!["Please enter a password between 8 and 20 characters long"]
        );
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // 7 characters but 14 UTF-8 bytes: still too short.
        let short = user_req(Some("J"), Some("S"), Some("j@x.com"), Some("äääääää"));
        assert_eq!(
            new_user(&short),
            vec!["Please enter a password between 8 and 20 characters long"]
        );

        // 20 characters but 40 bytes: still within bounds.
        let max = "ä".repeat(20);
        let ok = user_req(Some("J"), Some("S"), Some("j@x.com"), Some(&max));
        assert!(new_user(&ok).is_empty());
    }

    #[test]
    fn course_create_requires_title_and_description() {
        let req = CreateCourseRequest {
            title: None,
            description: Some("How to build".into()),
            estimated_time: None,
            materials_needed: None,
            user_id: None,
        };
        assert_eq!(new_course(&req), vec!["Please provide a value for \"Title\""]);
    }

    #[test]
    fn course_update_requires_both_fields() {
        let req = UpdateCourseRequest {
            title: Some("".into()),
            description: None,
            estimated_time: None,
            materials_needed: None,
        };
        assert_eq!(
            course_update(&req),
            vec![
                "Please provide a value for \"Title\"",
                "Please provide a value for \"Description\"",
            ]
        );
    }
}

/// Unit tests for feed-service input validators
///
/// This test module covers:
/// - Email format validation
/// - Registration field validation and error aggregation
/// - Password length boundary conditions
/// - Profile picture URL shape

use feed_service::validators::{
    validate_email, validate_image_url, validate_registration, RegistrationInput,
};

fn input<'a>(
    name: &'a str,
    email: &'a str,
    password: &'a str,
    confirmation: &'a str,
) -> RegistrationInput<'a> {
    RegistrationInput {
        name,
        email,
        password,
        password_confirmation: confirmation,
        profile_picture_url: None,
    }
}

// ============================================================================
// Email Validation Tests
// ============================================================================

#[test]
fn test_valid_email_formats() {
    assert!(validate_email("user@example.com"));
    assert!(validate_email("test.user@example.com"));
    assert!(validate_email("user_name@sub.domain.com"));
    assert!(validate_email("a@b.co"));
    assert!(validate_email("test123@example.com"));
}

#[test]
fn test_invalid_email_missing_at() {
    assert!(!validate_email("userexample.com"));
}

#[test]
fn test_invalid_email_missing_domain() {
    assert!(!validate_email("user@"));
}

#[test]
fn test_invalid_email_missing_local_part() {
    assert!(!validate_email("@example.com"));
}

#[test]
fn test_invalid_email_missing_tld() {
    assert!(!validate_email("user@example"));
}

#[test]
fn test_invalid_email_empty_string() {
    assert!(!validate_email(""));
}

#[test]
fn test_invalid_email_spaces() {
    assert!(!validate_email("user @example.com"));
    assert!(!validate_email("user@ example.com"));
}

#[test]
fn test_invalid_email_exceeds_max_length() {
    let too_long_email = format!("{}@example.com", "a".repeat(250));
    assert!(!validate_email(&too_long_email));
}

// ============================================================================
// Registration Validation Tests
// ============================================================================

#[test]
fn test_valid_registration_passes() {
    let errors = validate_registration(&input(
        "Alice",
        "alice@x.com",
        "password123",
        "password123",
    ));
    assert!(errors.is_empty());
}

#[test]
fn test_missing_name_reported() {
    let errors = validate_registration(&input("", "alice@x.com", "password123", "password123"));
    assert_eq!(errors, vec!["Name is required".to_string()]);
}

#[test]
fn test_name_over_255_chars_rejected() {
    let name = "a".repeat(256);
    let errors = validate_registration(&input(&name, "alice@x.com", "password123", "password123"));
    assert_eq!(errors, vec!["Name cannot exceed 255 characters".to_string()]);
}

#[test]
fn test_short_password_rejected() {
    let errors = validate_registration(&input("Alice", "alice@x.com", "seven77", "seven77"));
    assert_eq!(
        errors,
        vec!["Password must be at least 8 characters".to_string()]
    );
}

#[test]
fn test_exactly_eight_character_password_accepted() {
    let errors = validate_registration(&input("Alice", "alice@x.com", "eight888", "eight888"));
    assert!(errors.is_empty());
}

#[test]
fn test_confirmation_mismatch_rejected() {
    let errors = validate_registration(&input(
        "Alice",
        "alice@x.com",
        "password123",
        "password124",
    ));
    assert_eq!(errors, vec!["Passwords do not match".to_string()]);
}

#[test]
fn test_every_problem_reported_in_one_pass() {
    let errors = validate_registration(&input("", "nope", "short", ""));
    assert_eq!(errors.len(), 4);
}

// ============================================================================
// Profile Picture URL Tests
// ============================================================================

#[test]
fn test_valid_image_urls() {
    assert!(validate_image_url("https://example.com/avatar.jpg"));
    assert!(validate_image_url("http://cdn.example.com/a/b/c.png"));
    assert!(validate_image_url("https://example.com/pic.WEBP"));
}

#[test]
fn test_invalid_image_urls() {
    assert!(!validate_image_url("ftp://example.com/avatar.jpg"));
    assert!(!validate_image_url("https://example.com/avatar"));
    assert!(!validate_image_url("https://example.com/script.js"));
    assert!(!validate_image_url("example.com/avatar.jpg"));
}

#[test]
fn test_bad_profile_url_is_a_registration_error() {
    let mut reg = input("Alice", "alice@x.com", "password123", "password123");
    reg.profile_picture_url = Some("not-a-url");
    let errors = validate_registration(&reg);
    assert_eq!(
        errors,
        vec!["Please provide a valid image URL (http/https).".to_string()]
    );
}

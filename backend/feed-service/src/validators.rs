use once_cell::sync::Lazy;
use regex::Regex;

/// Input validation for the feed service
///
/// Validation runs at the HTTP boundary before any persistence call, and
/// returns the full list of field-level problems rather than stopping at the
/// first one, so a client gets every correction in a single round trip.

// Compile regex patterns once at startup
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,})+$")
        .expect("hardcoded email regex is invalid - fix source code")
});

static IMAGE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://.*\.(?:png|jpg|jpeg|gif|webp|svg|bmp|tiff?)$")
        .expect("hardcoded image URL regex is invalid - fix source code")
});

pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate email format
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate an optional profile picture URL (http/https, image extension)
pub fn validate_image_url(url: &str) -> bool {
    IMAGE_URL_REGEX.is_match(url)
}

/// Registration input after boundary trimming
#[derive(Debug)]
pub struct RegistrationInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
    pub profile_picture_url: Option<&'a str>,
}

/// Validate a registration request, returning every field-level error
pub fn validate_registration(input: &RegistrationInput<'_>) -> Vec<String> {
    let mut errors = Vec::new();

    if input.name.is_empty() {
        errors.push("Name is required".to_string());
    } else if input.name.len() > MAX_NAME_LENGTH {
        errors.push("Name cannot exceed 255 characters".to_string());
    }

    if input.email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !validate_email(input.email) {
        errors.push("Please enter a valid email".to_string());
    }

    if input.password.is_empty() {
        errors.push("Password is required".to_string());
    } else if input.password.len() < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 8 characters".to_string());
    }

    if input.password_confirmation.is_empty() {
        errors.push("Password confirmation is required".to_string());
    } else if input.password != input.password_confirmation {
        errors.push("Passwords do not match".to_string());
    }

    if let Some(url) = input.profile_picture_url {
        if !url.is_empty() && !validate_image_url(url) {
            errors.push("Please provide a valid image URL (http/https).".to_string());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RegistrationInput<'static> {
        RegistrationInput {
            name: "Alice",
            email: "alice@x.com",
            password: "password123",
            password_confirmation: "password123",
            profile_picture_url: None,
        }
    }

    #[test]
    fn test_valid_registration_has_no_errors() {
        assert!(validate_registration(&valid_input()).is_empty());
    }

    #[test]
    fn test_all_errors_reported_at_once() {
        let input = RegistrationInput {
            name: "",
            email: "not-an-email",
            password: "short",
            password_confirmation: "",
            profile_picture_url: None,
        };
        let errors = validate_registration(&input);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&"Name is required".to_string()));
        assert!(errors.contains(&"Please enter a valid email".to_string()));
        assert!(errors.contains(&"Password must be at least 8 characters".to_string()));
        assert!(errors.contains(&"Password confirmation is required".to_string()));
    }

    #[test]
    fn test_name_length_boundary() {
        let long_name = "a".repeat(256);
        let mut input = valid_input();
        input.name = &long_name;
        assert!(validate_registration(&input)
            .contains(&"Name cannot exceed 255 characters".to_string()));

        let max_name = "a".repeat(255);
        input.name = &max_name;
        assert!(validate_registration(&input).is_empty());
    }

    #[test]
    fn test_password_confirmation_mismatch() {
        let mut input = valid_input();
        input.password_confirmation = "password124";
        assert_eq!(
            validate_registration(&input),
            vec!["Passwords do not match".to_string()]
        );
    }

    #[test]
    fn test_eight_character_password_accepted() {
        let mut input = valid_input();
        input.password = "12345678";
        input.password_confirmation = "12345678";
        assert!(validate_registration(&input).is_empty());
    }

    #[test]
    fn test_profile_picture_url_shape() {
        let mut input = valid_input();
        input.profile_picture_url = Some("https://example.com/avatar.jpg");
        assert!(validate_registration(&input).is_empty());

        input.profile_picture_url = Some("ftp://example.com/avatar.jpg");
        assert_eq!(validate_registration(&input).len(), 1);

        input.profile_picture_url = Some("https://example.com/avatar.exe");
        assert_eq!(validate_registration(&input).len(), 1);
    }

    #[test]
    fn test_valid_email_formats() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user@sub.example.co.uk"));
        assert!(validate_email("user_name@example.io"));
    }

    #[test]
    fn test_invalid_email_formats() {
        assert!(!validate_email(""));
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user@example"));
        assert!(!validate_email("user @example.com"));
    }
}

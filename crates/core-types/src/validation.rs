//! Server-side checks applied to every submission before it reaches storage.

use crate::error::ValidationError;
use crate::structs::{NewSchool, SchoolSubmission};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static CONTACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("contact pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// 7 to 15 ASCII digits, nothing else.
pub fn is_valid_contact(contact: &str) -> bool {
    CONTACT.is_match(contact)
}

/// A stored image is either a path below the site root or an http(s) URL.
pub fn is_valid_image_ref(image: &str) -> bool {
    if image.chars().any(char::is_whitespace) {
        return false;
    }
    let lower = image.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return image.len() > image.find("://").map_or(0, |i| i + 3);
    }
    image.starts_with('/')
        && !image.starts_with("//")
        && !image.contains('\\')
        && image.split('/').all(|segment| segment != "..")
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_submission(submission: SchoolSubmission) -> Result<NewSchool, ValidationError> {
    // Presence of every required field is checked before any format check.
    let name = required("name", submission.name)?;
    let address = required("address", submission.address)?;
    let city = required("city", submission.city)?;
    let state = required("state", submission.state)?;
    let contact = required("contact", submission.contact)?;
    let email_id = required("email_id", submission.email_id)?;
    let board = required("board", submission.board)?;

    if !is_valid_email(&email_id) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_contact(&contact) {
        return Err(ValidationError::InvalidContact);
    }
    let contact = contact
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidContact)?;
    let board = board.parse()?;
    let image = optional(submission.image).unwrap_or_default();
    if !image.is_empty() && !is_valid_image_ref(&image) {
        return Err(ValidationError::InvalidImage(image));
    }

    Ok(NewSchool {
        name,
        address,
        city,
        state,
        contact,
        email_id,
        board,
        website: optional(submission.website).unwrap_or_default(),
        image,
        description: optional(submission.description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Board;

    fn oak_hall() -> SchoolSubmission {
        SchoolSubmission {
            name: Some("Oak Hall".into()),
            address: Some("12 Elm St".into()),
            city: Some("Pune".into()),
            state: Some("MH".into()),
            contact: Some("9876543210".into()),
            email_id: Some("a@b.com".into()),
            board: Some("CBSE".into()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_a_complete_submission_with_defaults() {
        let school = oak_hall().validate().unwrap();
        assert_eq!(school.contact, 9876543210);
        assert_eq!(school.board, Board::Cbse);
        assert_eq!(school.website, "");
        assert_eq!(school.image, "");
        assert_eq!(school.description, None);
    }

    #[test]
    fn reports_the_first_missing_field() {
        let mut submission = oak_hall();
        submission.city = None;
        submission.board = Some("   ".into());
        assert_eq!(
            submission.validate(),
            Err(ValidationError::MissingField("city"))
        );
    }

    #[test]
    fn rejects_email_without_a_domain_suffix() {
        for email in ["foo@bar", "foo bar@x.com", "@x.com", "plain"] {
            let mut submission = oak_hall();
            submission.email_id = Some(email.into());
            assert_eq!(submission.validate(), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn rejects_non_numeric_or_badly_sized_contact() {
        for contact in ["abc", "123456", "1234567890123456", "98765-43210", "+919876543210"] {
            let mut submission = oak_hall();
            submission.contact = Some(contact.into());
            assert_eq!(
                submission.validate(),
                Err(ValidationError::InvalidContact),
                "{contact}"
            );
        }
    }

    #[test]
    fn accepts_contact_length_bounds() {
        assert!(is_valid_contact("1234567"));
        assert!(is_valid_contact("123456789012345"));
        let mut submission = oak_hall();
        submission.contact = Some("999999999999999".into());
        assert_eq!(submission.validate().unwrap().contact, 999_999_999_999_999);
    }

    #[test]
    fn rejects_board_outside_the_fixed_set() {
        let mut submission = oak_hall();
        submission.board = Some("Montessori".into());
        assert_eq!(
            submission.validate(),
            Err(ValidationError::InvalidBoard("Montessori".into()))
        );
    }

    #[test]
    fn accepts_rooted_paths_and_web_urls_as_image() {
        for image in [
            "/schoolImages/1718000000000_3f9c2a7d1e.png",
            "https://cdn.example.com/oak.jpg",
            "http://example.com/a.png",
        ] {
            let mut submission = oak_hall();
            submission.image = Some(image.into());
            assert_eq!(submission.validate().unwrap().image, image);
        }
    }

    #[test]
    fn rejects_image_refs_outside_the_site_root() {
        for image in [
            "../../etc/passwd",
            "/schoolImages/../../etc/passwd",
            "schoolImages/a.png",
            "//evil.example/a.png",
            "file:///etc/passwd",
            "javascript:alert(1)",
            "https://",
            "/school Images/a.png",
        ] {
            let mut submission = oak_hall();
            submission.image = Some(image.into());
            assert_eq!(
                submission.validate(),
                Err(ValidationError::InvalidImage(image.into())),
                "{image}"
            );
        }
    }

    #[test]
    fn trims_fields_and_drops_blank_optionals() {
        let mut submission = oak_hall();
        submission.name = Some("  Oak Hall ".into());
        submission.website = Some("https://oak.example".into());
        submission.description = Some("  ".into());
        let school = submission.validate().unwrap();
        assert_eq!(school.name, "Oak Hall");
        assert_eq!(school.website, "https://oak.example");
        assert_eq!(school.description, None);
    }
}

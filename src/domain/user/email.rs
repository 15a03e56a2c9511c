//! Email normalization

/// Lower-case the domain part of an email address.
///
/// The local part keeps its casing, so `Test2@Example.com` becomes
/// `Test2@example.com`. Surrounding whitespace is dropped. Input without an
/// `@` is only trimmed.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_domain_only() {
        let cases = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_email(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn splits_on_last_at_sign() {
        assert_eq!(normalize_email("\"a@b\"@Example.ORG"), "\"a@b\"@example.org");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_email("  user@Example.com "), "user@example.com");
    }

    #[test]
    fn leaves_input_without_at_sign_alone() {
        assert_eq!(normalize_email("NotAnEmail"), "NotAnEmail");
        assert_eq!(normalize_email(""), "");
        assert_eq!(normalize_email("  NotAnEmail "), "NotAnEmail");
    }
}

//! WhatsApp JID (network address) handling.
//!
//! A JID is the platform's chat address: digits plus a chat-type suffix,
//! e.g. `15551234567@c.us` for an individual chat or `1234-5678@g.us` for a
//! group.

/// Suffix for individual (person-to-person) chats.
pub const INDIVIDUAL_SUFFIX: &str = "@c.us";

/// Suffix for group chats.
pub const GROUP_SUFFIX: &str = "@g.us";

/// Normalize a recipient identifier into a JID.
///
/// Accepts free-form input: `"(555) 123-4567"` becomes
/// `"5551234567@c.us"`, while an already-qualified JID passes through
/// unchanged. Input with no digits at all is returned as-is; the bridge
/// will reject it as an invalid address downstream.
///
/// Idempotent: normalizing a normalized value yields the same value.
pub fn normalize(recipient: &str) -> String {
    if recipient.ends_with(INDIVIDUAL_SUFFIX) || recipient.ends_with(GROUP_SUFFIX) {
        return recipient.to_string();
    }
    let digits: String = recipient.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return recipient.to_string();
    }
    format!("{digits}{INDIVIDUAL_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number() {
        assert_eq!(normalize("1234567890"), "1234567890@c.us");
    }

    #[test]
    fn test_digit_extraction() {
        assert_eq!(normalize("(123) 456-7890"), "1234567890@c.us");
        assert_eq!(normalize("+1 555 123 4567"), "15551234567@c.us");
    }

    #[test]
    fn test_suffix_passthrough() {
        assert_eq!(normalize("555@c.us"), "555@c.us");
        assert_eq!(normalize("123@g.us"), "123@g.us");
    }

    #[test]
    fn test_no_digits_unchanged() {
        assert_eq!(normalize("abc"), "abc");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["1234567890", "(123) 456-7890", "123@g.us", "abc", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}

//! Account-form validation rules.
//!
//! These mirror the server's registration rules so the account view can
//! reject input before a round-trip: email shape, password policy, nickname
//! shape, and the 4-digit verification-code comparison.

/// Allowed separator characters inside email atoms.
const EMAIL_SEPARATORS: &[char] = &['-', '_', '.'];

/// Special characters the password policy accepts.
const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Password length bounds (inclusive).
const PASSWORD_MIN: usize = 10;
const PASSWORD_MAX: usize = 15;

/// An atom is alphanumeric runs optionally joined by single separators:
/// it starts and ends alphanumeric and never has two separators in a row.
fn is_atom(s: &str) -> bool {
    let mut prev_was_separator = true; // Leading separator is invalid
    let mut saw_any = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            prev_was_separator = false;
            saw_any = true;
        } else if EMAIL_SEPARATORS.contains(&c) {
            if prev_was_separator {
                return false;
            }
            prev_was_separator = true;
        } else {
            return false;
        }
    }

    saw_any && !prev_was_separator // Trailing separator is invalid
}

/// Validate an email address: `atom@atom.tld` with a 2-3 letter TLD.
pub fn is_email_valid(email: &str) -> bool {
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    if host.contains('@') {
        return false;
    }
    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };

    is_atom(local)
        && is_atom(domain)
        && (2..=3).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validate a password: 10-15 characters with at least one digit, one
/// letter, and one special character.
pub fn is_password_valid(password: &str) -> bool {
    let len = password.chars().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&len)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Validate a nickname: at least 2 Hangul syllables, or at least 3 Latin
/// letters. Mixed scripts are rejected.
pub fn is_nickname_valid(nickname: &str) -> bool {
    let is_hangul = |c: char| ('가'..='힣').contains(&c);

    let count = nickname.chars().count();
    if count >= 2 && nickname.chars().all(is_hangul) {
        return true;
    }
    count >= 3 && nickname.chars().all(|c| c.is_ascii_alphabetic())
}

/// Compare a user-entered verification code against the one the server
/// issued. Both must be exactly four digits.
pub fn code_matches(entered: &str, issued: &str) -> bool {
    entered.len() == 4 && entered.chars().all(|c| c.is_ascii_digit()) && entered == issued
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_plain_addresses() {
        assert!(is_email_valid("cook@example.com"));
        assert!(is_email_valid("a@b.co"));
        assert!(is_email_valid("user.name@mail-host.net"));
        assert!(is_email_valid("u_1@example.kr"));
    }

    #[test]
    fn test_email_rejects_bad_shapes() {
        assert!(!is_email_valid(""));
        assert!(!is_email_valid("no-at-sign.com"));
        assert!(!is_email_valid("two@@example.com"));
        assert!(!is_email_valid("a@b@c.com"));
        assert!(!is_email_valid(".leading@example.com"));
        assert!(!is_email_valid("trailing.@example.com"));
        assert!(!is_email_valid("dou..ble@example.com"));
        assert!(!is_email_valid("user@example.c")); // TLD too short
        assert!(!is_email_valid("user@example.info")); // TLD too long
        assert!(!is_email_valid("user@example.c0m")); // Digit in TLD
        assert!(!is_email_valid("user@nodot"));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_password_valid("abc123!@#x"));
        assert!(is_password_valid("a1!aaaaaaaaaaaa")); // 15 chars, at max

        assert!(!is_password_valid("a1!abcdef")); // 9 chars, too short
        assert!(!is_password_valid("a1!aaaaaaaaaaaaa")); // 16 chars, too long
        assert!(!is_password_valid("abcdefgh!@")); // No digit
        assert!(!is_password_valid("1234567!@#")); // No letter
        assert!(!is_password_valid("abcd123456")); // No special
    }

    #[test]
    fn test_nickname_hangul() {
        assert!(is_nickname_valid("창욱"));
        assert!(is_nickname_valid("김치볶음밥"));
        assert!(!is_nickname_valid("김")); // One syllable
    }

    #[test]
    fn test_nickname_latin() {
        assert!(is_nickname_valid("kim"));
        assert!(is_nickname_valid("ChefKim"));
        assert!(!is_nickname_valid("ab")); // Too short
        assert!(!is_nickname_valid("chef kim")); // Space
        assert!(!is_nickname_valid("chef1")); // Digit
        assert!(!is_nickname_valid("김c")); // Mixed scripts
    }

    #[test]
    fn test_code_comparison() {
        assert!(code_matches("0417", "0417"));
        assert!(!code_matches("0417", "0418"));
        assert!(!code_matches("041", "041")); // Not four digits
        assert!(!code_matches("abcd", "abcd")); // Not digits
    }
}

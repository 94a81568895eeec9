//! Shared password verification

/// Compare a submitted password with the configured one.
///
/// Runs over the whole input regardless of where the first mismatch is.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    let a = submitted.as_bytes();
    let b = expected.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches() {
        assert!(password_matches("melk og brød", "melk og brød"));
        assert!(!password_matches("melk og brod", "melk og brød"));
        assert!(!password_matches("", "secret"));
        assert!(!password_matches("secret ", "secret"));
    }
}

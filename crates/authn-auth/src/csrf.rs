//! CSRF token comparison.

/// Whether the caller-supplied token matches the session's token.
///
/// A missing or empty header never matches. Equal-length inputs are
/// compared without early exit.
pub fn token_matches(expected: &str, supplied: Option<&str>) -> bool {
    match supplied {
        Some(supplied) if !supplied.is_empty() => {
            constant_time_eq(expected.as_bytes(), supplied.as_bytes())
        }
        _ => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

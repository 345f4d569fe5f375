//! Display formatting helpers.

/// Characters kept visible at each end of a masked token.
const VISIBLE_EDGE: usize = 4;

/// Mask a secret for display.
///
/// Tokens long enough keep their first and last four characters
/// (`figd…c123`); shorter ones are fully hidden. Empty stays empty.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= VISIBLE_EDGE * 3 {
        return "•".repeat(chars.len());
    }
    let head: String = chars[..VISIBLE_EDGE].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_EDGE..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_long_token() {
        assert_eq!(mask_token("figd_0123456789abcdef"), "figd…cdef");
    }

    #[test]
    fn mask_short_token_fully() {
        assert_eq!(mask_token("abc123"), "••••••");
    }

    #[test]
    fn mask_empty() {
        assert_eq!(mask_token(""), "");
    }

    #[test]
    fn mask_counts_chars_not_bytes() {
        assert_eq!(mask_token("ééééééééééééé"), "éééé…éééé");
    }
}

//! Price text normalisation.
//!
//! Listing prices are scraped as display text (`"1,700"`, `"1,700원"`). The
//! store keeps them as whole won.

/// Keep only ASCII digits and parse as whole won.
///
/// Returns `None` when the text contains no digits or the value does not
/// fit in an `i32`.
///
/// # Examples
///
/// ```
/// use gs25_core::price::try_parse_price;
/// assert_eq!(try_parse_price("1,700원"), Some(1700));
/// assert_eq!(try_parse_price("무료"), None);
/// ```
pub fn try_parse_price(text: &str) -> Option<i32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Remove the trailing currency marker from a displayed price.
pub fn strip_won(text: &str) -> String {
    text.replace('원', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only() {
        assert_eq!(try_parse_price("1,700"), Some(1700));
        assert_eq!(try_parse_price(" 12,300 원 "), Some(12300));
        assert_eq!(try_parse_price("0"), Some(0));
    }

    #[test]
    fn empty_or_non_numeric_is_none() {
        assert_eq!(try_parse_price(""), None);
        assert_eq!(try_parse_price("가격문의"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(try_parse_price("99999999999"), None);
    }

    #[test]
    fn strip_won_trims() {
        assert_eq!(strip_won("1,700원"), "1,700");
        assert_eq!(strip_won(" 900 원 "), "900");
    }
}

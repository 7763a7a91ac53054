pub const MAX_PHONE_DIGITS: usize = 11;
/// Length of `(DD) DDDDD-DDD`, the shortest mask accepted for submission.
pub const MIN_COMPLETE_PHONE_LEN: usize = 14;

pub fn phone_digits(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit())
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Masks up to 11 digits as `(DD) DDDDD-DDDD`. Shorter input yields a
/// partial mask; non-digits are dropped.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    match digits.len() {
        0..=2 => digits,
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

pub fn is_phone_complete(formatted: &str) -> bool {
    formatted.chars().count() >= MIN_COMPLETE_PHONE_LEN
}

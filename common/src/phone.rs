/// Minimum number of digits a phone number needs (area code + number).
pub const MIN_PHONE_DIGITS: usize = 10;

/// Digits used from the end of the phone number as pickup code.
pub const PICKUP_CODE_LEN: usize = 4;

/// Pickup code used when the user has no phone on file.
pub const FALLBACK_PICKUP_CODE: &str = "0000";

/// Strip everything except ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_phone(raw: &str) -> bool {
    digits_only(raw).len() >= MIN_PHONE_DIGITS
}

/// Mask a phone number while it is typed.
///
/// Up to ten digits: `(DD) DDDD-DDDD` (landline); eleven: `(DD) DDDDD-DDDD`
/// (mobile). Partial input is masked as far as it goes.
pub fn format_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    let digits: String = digits.chars().take(11).collect();
    let n = digits.len();
    if n < 6 {
        return digits;
    }
    let middle_len = if n <= 10 { 4 } else { 5 };
    let (area, rest) = digits.split_at(2);
    let (middle, tail) = rest.split_at(middle_len.min(rest.len()));
    format!("({area}) {middle}-{tail}")
}

/// Code a student reads out at the counter: the last digits of their phone.
pub fn pickup_code_for(phone: Option<&str>) -> String {
    let digits = phone.map(digits_only).unwrap_or_default();
    if digits.is_empty() {
        return FALLBACK_PICKUP_CODE.to_string();
    }
    let start = digits.len().saturating_sub(PICKUP_CODE_LEN);
    digits[start..].to_string()
}

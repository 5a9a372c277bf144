//! Phone number canonicalization.

/// Number of digits in a canonical phone number.
pub const PHONE_DIGITS: usize = 10;

/// Normalize raw phone input into `DDD-DDD-DDDD` form.
///
/// Every non-digit character is dropped and the digits are truncated to ten.
/// Hyphens go after the third and sixth digit, each only once a digit follows
/// it, so partial input formats progressively while the user types:
///
/// ```
/// use client_book::format_phone;
///
/// assert_eq!(format_phone("(555) 123 4567"), "555-123-4567");
/// assert_eq!(format_phone("5551"), "555-1");
/// assert_eq!(format_phone("555"), "555");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    let mut out = String::with_capacity(PHONE_DIGITS + 2);
    for (i, digit) in digits.iter().enumerate() {
        if i == 3 || i == 6 {
            out.push('-');
        }
        out.push(*digit);
    }
    out
}

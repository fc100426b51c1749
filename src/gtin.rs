//! GS1 mod-10 check digits for product codes.

/// Compute the GS1 check digit for `body` (all digits but the check digit).
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost digit. Returns
/// `None` if `body` is empty or contains a non-digit.
pub fn compute_check_digit(body: &str) -> Option<u8> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit * 3 } else { digit }
        })
        .sum();

    Some(((10 - sum % 10) % 10) as u8)
}

/// True when `code` is 14 ASCII digits ending in a correct check digit.
pub fn gtin_check_digit_valid(code: &str) -> bool {
    if code.len() != 14 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let (body, check) = code.split_at(13);
    compute_check_digit(body) == Some(check.as_bytes()[0] - b'0')
}

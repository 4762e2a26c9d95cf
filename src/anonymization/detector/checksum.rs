//! Luhn checksum for SIRET business identifiers

/// Number of digits in a SIRET
pub const SIRET_LENGTH: usize = 14;

/// Luhn sum of an all-digit string, or `None` if a non-digit is present
///
/// Every second digit from the right is doubled; doubled values above 9
/// contribute the sum of their digits (`d * 2 - 9`).
pub fn luhn_sum(number: &str) -> Option<u32> {
    number
        .chars()
        .rev()
        .enumerate()
        .map(|(i, c)| {
            let digit = c.to_digit(10)?;
            if i % 2 == 1 {
                let doubled = digit * 2;
                Some(if doubled > 9 { doubled - 9 } else { doubled })
            } else {
                Some(digit)
            }
        })
        .sum()
}

/// Validate a 14-digit SIRET with the Luhn algorithm
///
/// Fails closed: anything that is not exactly 14 ASCII digits is invalid.
pub fn is_valid_luhn(number: &str) -> bool {
    if number.len() != SIRET_LENGTH || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    luhn_sum(number).is_some_and(|sum| sum % 10 == 0)
}

//! Structural validators for detected candidates
//!
//! One pure predicate per PII type. A validator never panics; anything
//! malformed simply evaluates to `false`.

use crate::domain::PiiType;

/// Signature shared by all validators
pub type Validator = fn(&str) -> bool;

/// Look up the validator for a PII type, if it has one
pub fn validator_for(pii_type: &PiiType) -> Option<Validator> {
    match pii_type {
        PiiType::Email => Some(validate_email),
        PiiType::Phone => Some(validate_phone),
        PiiType::Ssn => Some(validate_ssn),
        PiiType::CreditCard => Some(validate_credit_card),
        PiiType::IpAddress => Some(validate_ip_address),
        _ => None,
    }
}

/// Run the validator for `pii_type` against `value`; types without a validator pass
pub fn validate(pii_type: &PiiType, value: &str) -> bool {
    validator_for(pii_type).map_or(true, |validator| validator(value))
}

/// Email: `local@domain.tld` with a letters-only TLD of at least two characters
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Phone: 10 digits, 11 digits starting with `1`, or `+` and 10-15 digits
pub fn validate_phone(phone: &str) -> bool {
    let international = phone.trim_start().starts_with('+');
    let Some(digits) = strip_separators(phone, |c| "-.()+".contains(c) || c.is_whitespace())
    else {
        return false;
    };

    match digits.len() {
        10 => true,
        11 if digits.starts_with('1') => true,
        10..=15 => international,
        _ => false,
    }
}

/// SSN: nine digits outside the never-issued area, group and serial ranges
pub fn validate_ssn(ssn: &str) -> bool {
    let Some(digits) = strip_separators(ssn, |c| c == '-' || c == '.' || c.is_whitespace())
    else {
        return false;
    };

    if digits.len() != 9 {
        return false;
    }

    let (area, rest) = digits.split_at(3);
    let (group, serial) = rest.split_at(2);

    !(area == "000" || area == "666" || area.starts_with('9') || group == "00" || serial == "0000")
}

/// Credit card: 13-19 digits passing the Luhn checksum
pub fn validate_credit_card(number: &str) -> bool {
    let Some(digits) = strip_separators(number, |c| c == '-' || c.is_whitespace()) else {
        return false;
    };

    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    luhn_checksum_valid(&digits)
}

/// IPv4: four dot-separated components, each in `0..=255`
pub fn validate_ip_address(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    parts.len() == 4
        && parts.iter().all(|part| {
            !part.is_empty()
                && part.chars().all(|c| c.is_ascii_digit())
                && part.parse::<u32>().is_ok_and(|n| n <= 255)
        })
}

/// Luhn mod-10 check over a string of ASCII digits
fn luhn_checksum_valid(digits: &str) -> bool {
    let mut total = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut n) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        total += n;
    }
    total % 10 == 0
}

/// Remove separator characters, returning `None` if anything but ASCII digits remains
fn strip_separators(value: &str, is_separator: impl Fn(char) -> bool) -> Option<String> {
    let digits: String = value.chars().filter(|&c| !is_separator(c)).collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

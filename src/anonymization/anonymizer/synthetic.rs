//! Synthetic substitution strategy
//!
//! Fixed, obviously fake values that keep the text readable.

use crate::domain::PiiType;

/// Fake name
pub const SYNTHETIC_NAME: &str = "John Smith";
/// Fake email address
pub const SYNTHETIC_EMAIL: &str = "user@domain.com";
/// Fake phone number, parenthesized form
pub const SYNTHETIC_PHONE_PAREN: &str = "(123) 456-7890";
/// Fake phone number, dashed form
pub const SYNTHETIC_PHONE: &str = "123-456-7890";
/// Fake SSN, dashed form
pub const SYNTHETIC_SSN: &str = "111-11-1111";
/// Fake SSN, compact form
pub const SYNTHETIC_SSN_COMPACT: &str = "111111111";
/// Fake street address
pub const SYNTHETIC_ADDRESS: &str = "123 Main Street";
/// Fake date
pub const SYNTHETIC_DATE: &str = "01/01/1970";

/// Every value this strategy can emit
pub const SYNTHETIC_VALUES: [&str; 8] = [
    SYNTHETIC_NAME,
    SYNTHETIC_EMAIL,
    SYNTHETIC_PHONE_PAREN,
    SYNTHETIC_PHONE,
    SYNTHETIC_SSN,
    SYNTHETIC_SSN_COMPACT,
    SYNTHETIC_ADDRESS,
    SYNTHETIC_DATE,
];

/// Fake value for `pii_type`, or `None` if the type has no synthetic form
pub fn synthetic_value(pii_type: &PiiType, value: &str) -> Option<String> {
    let fake = match pii_type {
        PiiType::Name => SYNTHETIC_NAME,
        PiiType::Email => SYNTHETIC_EMAIL,
        PiiType::Phone if value.contains('(') => SYNTHETIC_PHONE_PAREN,
        PiiType::Phone => SYNTHETIC_PHONE,
        PiiType::Ssn if value.contains('-') => SYNTHETIC_SSN,
        PiiType::Ssn => SYNTHETIC_SSN_COMPACT,
        PiiType::Address => SYNTHETIC_ADDRESS,
        PiiType::Date => SYNTHETIC_DATE,
        _ => return None,
    };
    Some(fake.to_string())
}

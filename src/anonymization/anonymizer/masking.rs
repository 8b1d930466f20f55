//! Masking strategy

use super::AnonymizationPolicy;
use crate::domain::PiiType;

/// Width of the mask used when length is not preserved
const FIXED_MASK_WIDTH: usize = 5;

/// Characters left in place by length-preserving masks
const STRUCTURAL_CHARS: &str = "-()/@";

/// Mask `value` according to the policy
///
/// Format preservation wins over length preservation for the identifier
/// types that have a canonical shape.
pub fn mask_value(pii_type: &PiiType, value: &str, policy: &AnonymizationPolicy) -> String {
    if policy.preserve_format {
        if let Some(shape) = format_mask(pii_type, value) {
            return shape.to_string();
        }
    }

    if policy.preserve_length {
        return value
            .chars()
            .map(|c| {
                if c.is_whitespace() || STRUCTURAL_CHARS.contains(c) {
                    c
                } else {
                    policy.mask_character
                }
            })
            .collect();
    }

    std::iter::repeat(policy.mask_character)
        .take(FIXED_MASK_WIDTH)
        .collect()
}

/// Canonical masked shape for SSNs, phone numbers and card numbers
fn format_mask(pii_type: &PiiType, value: &str) -> Option<&'static str> {
    let shape = match pii_type {
        PiiType::Ssn if value.contains('-') => "XXX-XX-XXXX",
        PiiType::Ssn => "XXXXXXXXX",
        PiiType::Phone if value.contains('(') && value.contains(')') => "(XXX) XXX-XXXX",
        PiiType::Phone if value.split('-').count() == 3 => "XXX-XXX-XXXX",
        PiiType::Phone => "XXXXXXXXXX",
        PiiType::CreditCard if value.contains('-') || value.contains(' ') => {
            "XXXX-XXXX-XXXX-XXXX"
        }
        PiiType::CreditCard => "XXXXXXXXXXXXXXXX",
        _ => return None,
    };
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn format_policy() -> AnonymizationPolicy {
        AnonymizationPolicy {
            preserve_format: true,
            ..AnonymizationPolicy::default()
        }
    }

    #[test_case(PiiType::Ssn, "123-45-6789", "XXX-XX-XXXX" ; "dashed ssn")]
    #[test_case(PiiType::Ssn, "123456789", "XXXXXXXXX" ; "compact ssn")]
    #[test_case(PiiType::Phone, "(555) 123-4567", "(XXX) XXX-XXXX" ; "parenthesized phone")]
    #[test_case(PiiType::Phone, "555-123-4567", "XXX-XXX-XXXX" ; "dashed phone")]
    #[test_case(PiiType::Phone, "555.123.4567", "XXXXXXXXXX" ; "dotted phone")]
    #[test_case(PiiType::CreditCard, "4111 1111 1111 1111", "XXXX-XXXX-XXXX-XXXX" ; "spaced card")]
    #[test_case(PiiType::CreditCard, "4111111111111111", "XXXXXXXXXXXXXXXX" ; "compact card")]
    fn test_preserve_format(pii_type: PiiType, value: &str, expected: &str) {
        assert_eq!(mask_value(&pii_type, value, &format_policy()), expected);
    }

    #[test]
    fn test_preserve_format_other_types_use_length_mask() {
        assert_eq!(
            mask_value(&PiiType::Email, "jo@x.io", &format_policy()),
            "**@****"
        );
    }

    #[test]
    fn test_preserve_length_keeps_structure() {
        let policy = AnonymizationPolicy::default();
        assert_eq!(
            mask_value(&PiiType::Phone, "(555) 123-4567", &policy),
            "(***) ***-****"
        );
        assert_eq!(mask_value(&PiiType::Date, "01/02/2020", &policy), "**/**/****");
    }

    #[test]
    fn test_preserve_length_counts_characters() {
        let policy = AnonymizationPolicy::default();
        let masked = mask_value(&PiiType::Name, "José Núñez", &policy);
        assert_eq!(masked, "**** *****");
        assert_eq!(masked.chars().count(), "José Núñez".chars().count());
    }

    #[test]
    fn test_fixed_width_mask() {
        let policy = AnonymizationPolicy {
            preserve_length: false,
            mask_character: '#',
            ..AnonymizationPolicy::default()
        };
        assert_eq!(
            mask_value(&PiiType::Email, "someone@example.com", &policy),
            "#####"
        );
    }
}

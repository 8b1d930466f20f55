//! PII type vocabulary
//!
//! A fixed set of built-in types plus [`PiiType::Custom`] for types registered
//! at runtime. Every type serializes to its snake_case tag.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of personally identifiable information a match represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PiiType {
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// US Social Security Numbers
    Ssn,
    /// Payment card numbers
    CreditCard,
    /// IPv4 addresses
    IpAddress,
    /// Personal names
    Name,
    /// Street addresses
    Address,
    /// Calendar dates
    Date,
    /// Passport numbers
    Passport,
    /// Driver license numbers
    DriverLicense,
    /// Any type registered at runtime
    Custom(String),
}

impl PiiType {
    /// All built-in types, in default registry order
    pub const BUILTIN: [PiiType; 10] = [
        PiiType::Email,
        PiiType::Phone,
        PiiType::Ssn,
        PiiType::CreditCard,
        PiiType::IpAddress,
        PiiType::Name,
        PiiType::Address,
        PiiType::Date,
        PiiType::DriverLicense,
        PiiType::Passport,
    ];

    /// Snake_case tag used in configuration and serialized output
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::CreditCard => "credit_card",
            Self::IpAddress => "ip_address",
            Self::Name => "name",
            Self::Address => "address",
            Self::Date => "date",
            Self::Passport => "passport",
            Self::DriverLicense => "driver_license",
            Self::Custom(tag) => tag,
        }
    }

    /// Upper-case label used in replacement tags, e.g. `CREDIT_CARD`
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Whether this type is one of the built-in identifiers
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Parse a tag, mapping unknown tags to [`PiiType::Custom`]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "ssn" => Self::Ssn,
            "credit_card" => Self::CreditCard,
            "ip_address" => Self::IpAddress,
            "name" => Self::Name,
            "address" => Self::Address,
            "date" => Self::Date,
            "passport" => Self::Passport,
            "driver_license" => Self::DriverLicense,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for PiiType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<&str> for PiiType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<PiiType> for String {
    fn from(pii_type: PiiType) -> Self {
        pii_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags_round_trip() {
        for pii_type in PiiType::BUILTIN {
            assert_eq!(PiiType::from_tag(pii_type.as_str()), pii_type);
            assert!(pii_type.is_builtin());
        }
    }

    #[test]
    fn test_unknown_tag_is_custom() {
        let pii_type = PiiType::from_tag("Employee_ID");
        assert_eq!(pii_type, PiiType::Custom("employee_id".to_string()));
        assert!(!pii_type.is_builtin());
        assert_eq!(pii_type.label(), "EMPLOYEE_ID");
    }

    #[test]
    fn test_label() {
        assert_eq!(PiiType::CreditCard.label(), "CREDIT_CARD");
        assert_eq!(PiiType::IpAddress.to_string(), "ip_address");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&PiiType::DriverLicense).unwrap();
        assert_eq!(json, "\"driver_license\"");
        let parsed: PiiType = serde_json::from_str("\"ssn\"").unwrap();
        assert_eq!(parsed, PiiType::Ssn);
    }
}

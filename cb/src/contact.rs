//! Contact record and field validation

use std::cmp::Ordering;
use std::fmt;

use crate::error::ValidationError;

/// Lowest accepted age
pub const MIN_AGE: u32 = 1;

/// Highest accepted age
pub const MAX_AGE: u32 = 150;

/// Number of digits in a phone number
pub const PHONE_DIGITS: usize = 10;

/// A single address book entry
///
/// `phone` and `age` use 0 as the "unset" sentinel for values that could not
/// be read from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub first_name: String,
    pub family_name: String,
    pub phone: u64,
    pub address: String,
    pub age: u32,
}

/// An editable field of a [`Contact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    FamilyName,
    Address,
    Phone,
    Age,
}

impl ContactField {
    /// All fields, in edit-menu order
    pub const ALL: [ContactField; 5] = [
        ContactField::FirstName,
        ContactField::FamilyName,
        ContactField::Address,
        ContactField::Phone,
        ContactField::Age,
    ];

    /// Human-readable field name
    pub fn label(self) -> &'static str {
        match self {
            ContactField::FirstName => "first name",
            ContactField::FamilyName => "family name",
            ContactField::Address => "address",
            ContactField::Phone => "phone number",
            ContactField::Age => "age",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Contact {
    /// Create a contact from already-validated values
    pub fn new(
        first_name: impl Into<String>,
        family_name: impl Into<String>,
        phone: u64,
        address: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            family_name: family_name.into(),
            phone,
            address: address.into(),
            age,
        }
    }

    /// Sort key: family name first, then first name
    pub fn name_key(&self) -> (&str, &str) {
        (&self.family_name, &self.first_name)
    }

    /// Exact, case-sensitive match on both name fields
    pub fn has_name(&self, first_name: &str, family_name: &str) -> bool {
        self.first_name == first_name && self.family_name == family_name
    }

    /// True when `other` has the same first and family name
    pub fn same_name(&self, other: &Contact) -> bool {
        self.has_name(&other.first_name, &other.family_name)
    }

    /// "First Family"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    /// Phone number as listed and reported; an unset phone shows as `0`
    pub fn phone_display(&self) -> String {
        if self.phone == 0 {
            return "0".to_string();
        }
        self.phone.to_string()
    }

    /// Replace one field, validating the raw value first
    ///
    /// The contact is untouched when validation fails.
    pub fn set_field(&mut self, field: ContactField, raw: &str) -> Result<(), ValidationError> {
        match field {
            ContactField::FirstName => self.first_name = validate_text(field, raw)?,
            ContactField::FamilyName => self.family_name = validate_text(field, raw)?,
            ContactField::Address => self.address = validate_text(field, raw)?,
            ContactField::Phone => self.phone = validate_phone(raw)?,
            ContactField::Age => self.age = validate_age(raw)?,
        }
        Ok(())
    }
}

/// Alphabetical order by (family name, first name), case-sensitive
pub fn cmp_by_name(a: &Contact, b: &Contact) -> Ordering {
    a.name_key().cmp(&b.name_key())
}

/// Parse a phone number: exactly 10 ASCII digits, first digit not 0
pub fn validate_phone(raw: &str) -> Result<u64, ValidationError> {
    let s = raw.trim();
    let valid = s.len() == PHONE_DIGITS && !s.starts_with('0') && s.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(ValidationError::InvalidPhone(s.to_string()));
    }
    s.parse().map_err(|_| ValidationError::InvalidPhone(s.to_string()))
}

/// Parse an age in the range 1..=150
pub fn validate_age(raw: &str) -> Result<u32, ValidationError> {
    let s = raw.trim();
    match s.parse::<u32>() {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(age),
        _ => Err(ValidationError::InvalidAge(s.to_string())),
    }
}

/// Trim a text field and reject empty values or embedded line breaks
pub fn validate_text(field: ContactField, raw: &str) -> Result<String, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidText {
            field: field.label(),
            reason: "must not be empty",
        });
    }
    if s.contains(['\n', '\r']) {
        return Err(ValidationError::InvalidText {
            field: field.label(),
            reason: "must not contain line breaks",
        });
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Contact {
        Contact::new("Ada", "Lovelace", 2025551234, "1 Main St", 36)
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("2025551234"), Ok(2025551234));
        assert_eq!(validate_phone(" 2025551234\n"), Ok(2025551234));
        assert!(validate_phone("0025551234").is_err());
        assert!(validate_phone("202555123").is_err());
        assert!(validate_phone("20255512345").is_err());
        assert!(validate_phone("202-555-12").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_phone_display() {
        assert_eq!(ada().phone_display(), "2025551234");
        let unset = Contact {
            phone: 0,
            ..ada()
        };
        assert_eq!(unset.phone_display(), "0");
    }

    #[test]
    fn test_validate_age_bounds() {
        assert_eq!(validate_age("1"), Ok(1));
        assert_eq!(validate_age("150"), Ok(150));
        assert!(validate_age("0").is_err());
        assert!(validate_age("151").is_err());
        assert!(validate_age("-4").is_err());
        assert!(validate_age("forty").is_err());
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text(ContactField::Address, "  1 Main St "), Ok("1 Main St".to_string()));
        assert!(validate_text(ContactField::FirstName, "   ").is_err());
        assert!(validate_text(ContactField::FirstName, "Ada\nLovelace").is_err());
    }

    #[test]
    fn test_cmp_by_name_family_first() {
        let a = Contact::new("Zed", "Adams", 0, "", 0);
        let b = Contact::new("Amy", "Brown", 0, "", 0);
        let c = Contact::new("Bob", "Brown", 0, "", 0);
        assert_eq!(cmp_by_name(&a, &b), Ordering::Less);
        assert_eq!(cmp_by_name(&b, &c), Ordering::Less);
        assert_eq!(cmp_by_name(&c, &c), Ordering::Equal);
    }

    #[test]
    fn test_cmp_by_name_is_case_sensitive() {
        let upper = Contact::new("Ann", "Zeta", 0, "", 0);
        let lower = Contact::new("Ann", "alpha", 0, "", 0);
        // 'Z' (0x5a) sorts before 'a' (0x61)
        assert_eq!(cmp_by_name(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn test_set_field_rejects_invalid_value() {
        let mut contact = ada();
        assert!(contact.set_field(ContactField::Phone, "123").is_err());
        assert!(contact.set_field(ContactField::Age, "200").is_err());
        assert!(contact.set_field(ContactField::FamilyName, "").is_err());
        assert_eq!(contact, ada());
    }

    #[test]
    fn test_set_field_updates_value() {
        let mut contact = ada();
        contact.set_field(ContactField::Address, "12 St James's Sq").unwrap();
        contact.set_field(ContactField::Age, "37").unwrap();
        contact.set_field(ContactField::Phone, "2025550000").unwrap();
        assert_eq!(contact.address, "12 St James's Sq");
        assert_eq!(contact.age, 37);
        assert_eq!(contact.phone, 2025550000);
    }

    #[test]
    fn test_has_name_exact_match() {
        let contact = ada();
        assert!(contact.has_name("Ada", "Lovelace"));
        assert!(!contact.has_name("ada", "Lovelace"));
        assert_eq!(contact.full_name(), "Ada Lovelace");
    }
}
